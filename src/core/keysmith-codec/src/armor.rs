//! PEM armor: wrapping and unwrapping.
//!
//! Only the textual container is handled here: the DER payload is treated as
//! opaque bytes. Encoding goes through the `pem` crate. Decoding is done here
//! because `pem::parse` requires the BEGIN and END labels to match, and
//! blocks with differing labels must still be accepted.

use base64::{engine::general_purpose::STANDARD, Engine};
use pem::{EncodeConfig, LineEnding, Pem};

use crate::error::CodecError;

/// Number of base64 characters per PEM body line.
pub const PEM_LINE_WIDTH: usize = 64;

const BEGIN_PREFIX: &str = "-----BEGIN ";
const END_PREFIX: &str = "-----END ";
const DASHES: &str = "-----";

/// Wraps DER bytes in a PEM block.
///
/// The body is standard padded base64 folded into lines of exactly
/// [`PEM_LINE_WIDTH`] characters (the last line may be shorter). Lines are
/// joined with `\n` and there is no newline after the footer. Empty input
/// yields an empty body line between the markers.
pub fn pem_wrap(label: &str, der: &[u8]) -> String {
    if der.is_empty() {
        return format!("{BEGIN_PREFIX}{label}{DASHES}\n\n{END_PREFIX}{label}{DASHES}");
    }

    // The crate folds at 64 columns, which is PEM_LINE_WIDTH.
    let config = EncodeConfig::new().set_line_ending(LineEnding::LF);
    let mut text = pem::encode_config(&Pem::new(label, der), config);
    text.truncate(text.trim_end_matches('\n').len());
    text
}

/// Extracts and decodes the body of the first PEM block in `pem`.
///
/// The block is located with a label-agnostic match: `-----BEGIN <label>-----`
/// followed by the nearest `-----END <label>-----`, where each label is a
/// non-empty run of characters other than `-`. The two labels are not
/// required to agree. All whitespace is removed from the body before it is
/// decoded as standard base64.
///
/// # Errors
///
/// Returns [`CodecError::MalformedPem`] if no BEGIN/END pair is present or the
/// body is not valid base64.
pub fn pem_unwrap(pem: &str) -> Result<Vec<u8>, CodecError> {
    let block = find_block(pem)
        .ok_or_else(|| CodecError::MalformedPem("no BEGIN/END marker pair found".into()))?;

    let compact: String = block.body.chars().filter(|c| !c.is_whitespace()).collect();

    STANDARD
        .decode(compact)
        .map_err(|e| CodecError::MalformedPem(format!("body is not valid base64: {e}")))
}

/// Returns the label of the first complete PEM block in `pem`.
pub fn pem_label(pem: &str) -> Option<&str> {
    find_block(pem).map(|block| block.label)
}

struct Block<'a> {
    label: &'a str,
    body: &'a str,
}

fn find_block(text: &str) -> Option<Block<'_>> {
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find(BEGIN_PREFIX) {
        let marker_start = search_from + offset;
        search_from = marker_start + 1;

        let Some((label, body_start)) = parse_marker_tail(text, marker_start + BEGIN_PREFIX.len())
        else {
            continue;
        };

        let mut end_from = body_start;
        while let Some(end_offset) = text[end_from..].find(END_PREFIX) {
            let end_start = end_from + end_offset;
            end_from = end_start + 1;

            if parse_marker_tail(text, end_start + END_PREFIX.len()).is_some() {
                return Some(Block {
                    label,
                    body: &text[body_start..end_start],
                });
            }
        }

        // No END marker after this BEGIN, so none after any later BEGIN.
        return None;
    }

    None
}

/// Parses `<label>-----` starting at `start`. Returns the label and the index
/// just past the closing dashes.
fn parse_marker_tail(text: &str, start: usize) -> Option<(&str, usize)> {
    let rest = &text[start..];
    let label_len = rest.find('-').unwrap_or(rest.len());
    if label_len == 0 || !rest[label_len..].starts_with(DASHES) {
        return None;
    }
    Some((&rest[..label_len], start + label_len + DASHES.len()))
}
