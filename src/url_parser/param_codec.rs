use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::error::{Result, UrlError};

/// Characters left unescaped when encoding a parameter: ASCII alphanumerics
/// plus `- _ . ! ~ * ' ( )`, the same set a browser's `encodeURIComponent`
/// leaves alone.
const COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// How `+` and space are translated in parameter text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlusMode {
    /// Only the first `+` decodes to a space. Spaces always encode as `%20`.
    /// This is what the URL editor has always done, so it stays the default.
    #[default]
    FirstOnly,
    /// Form-urlencoded behaviour: every `+` decodes to a space and every
    /// space encodes as `+`.
    All,
}

/// Encoder/decoder for query parameter names and values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamCodec {
    #[serde(default)]
    pub plus_mode: PlusMode,
}

impl ParamCodec {
    pub fn new(plus_mode: PlusMode) -> Self {
        Self { plus_mode }
    }

    /// Decodes one raw parameter name or value
    ///
    /// Plus substitution runs first, so an escaped `%2B` always survives as
    /// a literal `+`.
    pub fn decode(&self, raw: &str) -> Result<String> {
        let spaced = match self.plus_mode {
            PlusMode::FirstOnly => raw.replacen('+', " ", 1),
            PlusMode::All => raw.replace('+', " "),
        };

        if let Some(at) = find_bad_escape(&spaced) {
            trace!(input = raw, position = at, "invalid percent-escape");
            return Err(UrlError::MalformedEncoding {
                input: raw.to_string(),
            });
        }

        urlencoding::decode(&spaced)
            .map(Cow::into_owned)
            .map_err(|_| UrlError::MalformedEncoding {
                input: raw.to_string(),
            })
    }

    /// Encodes one decoded parameter name or value
    pub fn encode(&self, text: &str) -> String {
        let encoded = utf8_percent_encode(text, COMPONENT_SET).to_string();
        match self.plus_mode {
            PlusMode::FirstOnly => encoded,
            // A literal `%` is escaped to `%25`, so every `%20` here came from a space.
            PlusMode::All => encoded.replace("%20", "+"),
        }
    }
}

/// Decodes with the default (first-`+`-only) codec
pub fn decode_param(raw: &str) -> Result<String> {
    ParamCodec::default().decode(raw)
}

/// Encodes with the default codec
pub fn encode_param(text: &str) -> String {
    ParamCodec::default().encode(text)
}

/// Byte offset of the first `%` not followed by two hex digits
fn find_bad_escape(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Some(i);
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_plus_only() {
        assert_eq!(decode_param("a+b+c").unwrap(), "a b+c");
        assert_eq!(decode_param("%2B+x").unwrap(), "+ x");
    }

    #[test]
    fn test_all_plus() {
        let codec = ParamCodec::new(PlusMode::All);
        assert_eq!(codec.decode("a+b+c").unwrap(), "a b c");
        assert_eq!(codec.encode("a b c+"), "a+b+c%2B");
    }

    #[test]
    fn test_encode_component_set() {
        assert_eq!(encode_param("hello world"), "hello%20world");
        assert_eq!(encode_param("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_param("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_param("100%"), "100%25");
        assert_eq!(encode_param("é"), "%C3%A9");
    }

    #[test]
    fn test_malformed_escapes() {
        for bad in ["%", "%4", "%zz", "abc%g1", "%C3"] {
            let err = decode_param(bad).unwrap_err();
            assert_eq!(
                err,
                UrlError::MalformedEncoding {
                    input: bad.to_string()
                },
                "expected failure for {bad:?}"
            );
        }
    }

    #[test]
    fn test_valid_escapes() {
        assert_eq!(decode_param("%41%62").unwrap(), "Ab");
        assert_eq!(decode_param("caf%C3%A9").unwrap(), "café");
        assert_eq!(decode_param("").unwrap(), "");
    }
}
