//! OpenSSH public-key lines and SSH wire encoding.
//!
//! [`openssh_public_line`] formats whatever key blob it is given. OpenSSH
//! itself expects the blob in SSH wire format (RFC 4253 §6.6); for Ed25519
//! that blob is produced by [`ssh_ed25519_wire_blob`] (RFC 8709).

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::CodecError;

/// Algorithm tag for Ed25519 OpenSSH keys.
pub const SSH_ED25519_TAG: &str = "ssh-ed25519";

/// Formats a single-line OpenSSH public key: `{tag} {base64(blob)} {comment}`.
///
/// The base64 is the standard alphabet with padding retained.
pub fn openssh_public_line(algorithm_tag: &str, key_blob: &[u8], comment: &str) -> String {
    format!("{} {} {}", algorithm_tag, STANDARD.encode(key_blob), comment)
}

/// Encodes `bytes` as an SSH `string`: a big-endian u32 length followed by the
/// bytes themselves.
///
/// # Errors
///
/// Returns [`CodecError::SshStringTooLong`] if the length does not fit in a u32.
pub fn ssh_wire_string(bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    let len = u32::try_from(bytes.len()).map_err(|_| CodecError::SshStringTooLong(bytes.len()))?;

    let mut out = Vec::with_capacity(4 + bytes.len());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(bytes);
    Ok(out)
}

/// Builds the RFC 8709 public key blob for an Ed25519 key:
/// `string "ssh-ed25519" || string public_key`.
pub fn ssh_ed25519_wire_blob(public_key: &[u8; 32]) -> Result<Vec<u8>, CodecError> {
    let mut blob = ssh_wire_string(SSH_ED25519_TAG.as_bytes())?;
    blob.extend(ssh_wire_string(public_key)?);
    Ok(blob)
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_public_line_format() {
        let line = openssh_public_line("ssh-ed25519", b"test", "user@host");
        assert_eq!(line, "ssh-ed25519 dGVzdA== user@host");
    }

    #[test]
    fn test_public_line_is_single_line() {
        let line = openssh_public_line("ssh-ed25519", &[0xff; 200], "me@box");
        assert!(!line.contains('\n'));
        assert_eq!(line.split(' ').count(), 3);
    }

    #[test]
    fn test_wire_string() {
        assert_eq!(ssh_wire_string(b"abc").unwrap(), vec![0, 0, 0, 3, b'a', b'b', b'c']);
        assert_eq!(ssh_wire_string(b"").unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_ed25519_wire_blob_layout() {
        let key = [0x11u8; 32];
        let blob = ssh_ed25519_wire_blob(&key).unwrap();

        assert_eq!(blob.len(), 4 + 11 + 4 + 32);
        assert_eq!(&blob[..4], &[0, 0, 0, 11]);
        assert_eq!(&blob[4..15], b"ssh-ed25519");
        assert_eq!(&blob[15..19], &[0, 0, 0, 32]);
        assert_eq!(&blob[19..], &key);
    }

    #[test]
    fn test_wire_string_length_is_big_endian() {
        let data = vec![0u8; 0x0102];
        let encoded = ssh_wire_string(&data).unwrap();
        assert_eq!(&encoded[..4], &[0, 0, 1, 2]);
        assert_eq!(encoded.len(), 4 + 0x0102);
    }
}
