use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use super::components::{Parameter, ParsedUrl, UrlComponents};
use super::error::Result;
use super::param_codec::ParamCodec;
use super::url_validator::{validate_components, validate_url};

/// Whether decomposition may reject input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Every string decomposes; unmatched groups are simply absent
    #[default]
    Lenient,
    /// Empty, oversized and structureless input is rejected
    Strict,
}

/// Options for [`decompose_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    #[serde(default)]
    pub codec: ParamCodec,
    #[serde(default)]
    pub mode: ParseMode,
}

/// Decomposes a URL into components and decoded parameters
///
/// The grammar is total, so the only failure in lenient mode is a malformed
/// percent-escape inside the query.
pub fn decompose(url: &str) -> Result<ParsedUrl> {
    decompose_with(url, &ParseOptions::default())
}

/// Decomposes a URL with explicit codec and validation options
///
/// This function performs the following steps:
/// 1. In strict mode, rejects empty or oversized input
/// 2. Splits the string into raw components with one forward scan
/// 3. In strict mode, rejects a split with no scheme, authority or path
/// 4. Splits the raw query on `&` and decodes every name and value
///
/// # Arguments
/// * `url` - Any string; lenient mode accepts all of them
/// * `options` - Plus/space handling and lenient or strict parsing
///
/// # Returns
/// * `Result<ParsedUrl>` - Raw components plus the ordered, decoded parameters,
///   or `MalformedEncoding` when a query escape is invalid
#[instrument(level = "debug", skip_all, fields(url = %url))]
pub fn decompose_with(url: &str, options: &ParseOptions) -> Result<ParsedUrl> {
    if options.mode == ParseMode::Strict {
        validate_url(url)?;
    }

    // Grammar match never fails; unmatched groups stay None
    let components = split_components(url);
    if options.mode == ParseMode::Strict {
        validate_components(&components)?;
    }
    debug!(?components, "Split URL into components");

    let parameters = match components.raw_query.as_deref() {
        Some(query) => split_query(query, &options.codec)?,
        None => Vec::new(),
    };
    debug!("Decoded {} query parameters", parameters.len());

    Ok(ParsedUrl {
        components,
        parameters,
    })
}

/// Splits a URL into raw components without decoding anything
///
/// Follows the anchored grammar
/// `^(scheme:)?(//(userInfo@)?domain(:port)?)?(path)?(?query)?(#fragment)?$`
/// left to right. Each later group accepts whatever the earlier ones leave,
/// so a single forward pass gives the same captures as the pattern would.
pub fn split_components(url: &str) -> UrlComponents {
    let mut components = UrlComponents::default();
    let mut rest = url;

    // scheme: [^:/?#.]+ followed by ':'
    if let Some(end) = rest.find(&[':', '/', '?', '#', '.'][..]) {
        if end > 0 && rest.as_bytes()[end] == b':' {
            components.scheme = Some(rest[..end].to_string());
            rest = &rest[end + 1..];
        }
    }

    if let Some(authority) = rest.strip_prefix("//") {
        rest = authority;

        // userInfo: [^/?#]* up to the last '@' of that run
        let run_end = rest.find(&['/', '?', '#'][..]).unwrap_or(rest.len());
        if let Some(at) = rest[..run_end].rfind('@') {
            components.user_info = Some(rest[..at].to_string());
            rest = &rest[at + 1..];
        }

        let domain_end = rest
            .char_indices()
            .find(|&(_, c)| !is_domain_char(c))
            .map_or(rest.len(), |(i, _)| i);
        components.domain = Some(rest[..domain_end].to_string());
        rest = &rest[domain_end..];

        if let Some(after_colon) = rest.strip_prefix(':') {
            let digits = after_colon
                .bytes()
                .take_while(u8::is_ascii_digit)
                .count();
            if digits > 0 {
                components.port = Some(after_colon[..digits].to_string());
                rest = &after_colon[digits..];
            }
        }
    }

    let path_end = rest.find(&['?', '#'][..]).unwrap_or(rest.len());
    if path_end > 0 {
        components.path = Some(rest[..path_end].to_string());
    }
    rest = &rest[path_end..];

    if let Some(query) = rest.strip_prefix('?') {
        let query_end = query.find('#').unwrap_or(query.len());
        components.raw_query = Some(query[..query_end].to_string());
        rest = &query[query_end..];
    }

    if let Some(fragment) = rest.strip_prefix('#') {
        components.fragment = Some(fragment.to_string());
    }

    components
}

/// Splits a raw query on `&` and decodes each token
///
/// Empty tokens (`a&&b`, a trailing `&`) come back as empty-named bare
/// parameters. An entirely empty query yields no parameters.
pub fn split_query(query: &str, codec: &ParamCodec) -> Result<Vec<Parameter>> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    query
        .split('&')
        .map(|token| {
            trace!("Decoding query token: {}", token);
            match token.split_once('=') {
                Some((name, value)) => Ok(Parameter {
                    name: codec.decode(name)?,
                    value: Some(codec.decode(value)?),
                }),
                None => Ok(Parameter {
                    name: codec.decode(token)?,
                    value: None,
                }),
            }
        })
        .collect()
}

/// Letters, digits, `_ - . %` and anything from U+0100 upward
fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '%') || u32::from(c) >= 0x100
}
