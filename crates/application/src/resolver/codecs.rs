//! Text codecs: base64, CSV records, form-urlencoding and trimming.

use std::sync::LazyLock;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use regex::Regex;

static BASE64_FOREIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^A-Za-z0-9+/=]").expect("valid regex"));

const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Why a base64 payload was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base64Failure {
    /// A character outside the base64 alphabet.
    Charset,
    /// The payload is malformed.
    Decode,
}

/// Decodes standard or URL-safe base64. Padding is optional.
///
/// # Errors
///
/// Returns [`Base64Failure`] when the payload contains foreign characters or
/// cannot be decoded.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, Base64Failure> {
    let standard = encoded.replace('-', "+").replace('_', "/");
    if BASE64_FOREIGN.is_match(&standard) {
        return Err(Base64Failure::Charset);
    }
    LENIENT_BASE64
        .decode(standard)
        .map_err(|_| Base64Failure::Decode)
}

/// Splits one CSV record: comma delimited, `"` enclosed, `""` for a literal
/// quote inside an enclosure, no escape character.
///
/// Blanks before an opening quote are skipped. Unquoted fields keep their
/// leading blanks. Text following a closing quote up to the next comma is
/// kept verbatim.
#[must_use]
pub fn split_csv_record(record: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = record.chars().peekable();
    let mut at_field_start = true;
    let mut quoted = false;

    while let Some(ch) = chars.next() {
        if quoted {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    quoted = false;
                }
            } else {
                field.push(ch);
            }
            continue;
        }

        match ch {
            ',' => {
                fields.push(std::mem::take(&mut field));
                at_field_start = true;
                continue;
            }
            '"' if at_field_start => {
                field.clear();
                quoted = true;
            }
            ' ' | '\t' if at_field_start => {
                field.push(ch);
                continue;
            }
            _ => field.push(ch),
        }
        at_field_start = false;
    }

    fields.push(field);
    fields
}

/// Percent-encodes for `application/x-www-form-urlencoded`: space becomes `+`.
#[must_use]
pub fn form_urlencode(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

/// Strips spaces, tabs, newlines, carriage returns, NUL and vertical tabs.
#[must_use]
pub fn trim_whitespace(text: &str) -> &str {
    text.trim_matches([' ', '\t', '\n', '\r', '\0', '\x0B'])
}
