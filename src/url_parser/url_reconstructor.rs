use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use super::components::{Parameter, UrlComponents};
use super::param_codec::ParamCodec;

/// Options for [`compose_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeOptions {
    #[serde(default)]
    pub codec: ParamCodec,
    /// Drop parameters whose encoded name is empty instead of emitting
    /// them as empty tokens
    #[serde(default)]
    pub skip_unnamed: bool,
}

/// Reconstructs a URL from components and an ordered parameter list
pub fn compose(components: &UrlComponents, parameters: &[Parameter]) -> String {
    compose_with(components, parameters, &ComposeOptions::default())
}

/// Reconstructs a URL, appending in fixed order:
/// `scheme://domain[:port]path[?query][#fragment]`
///
/// Scheme, domain, port, path and fragment are emitted verbatim. `user_info`
/// and `raw_query` are never emitted; the parameter list replaces the query.
///
/// # Arguments
/// * `components` - Raw URL parts; an absent or empty path becomes `/`
/// * `parameters` - Decoded parameters, emitted in order with duplicates kept
/// * `options` - Plus/space handling and whether unnamed parameters are dropped
///
/// # Returns
/// * `String` - The rebuilt URL. Composition cannot fail.
#[instrument(level = "debug", skip_all)]
pub fn compose_with(
    components: &UrlComponents,
    parameters: &[Parameter],
    options: &ComposeOptions,
) -> String {
    let mut url = String::new();
    url.push_str(components.scheme_str());
    url.push_str("://");
    url.push_str(components.domain_str());

    let port = components.port_str();
    if !port.is_empty() {
        url.push(':');
        url.push_str(port);
    }

    url.push_str(components.path_or_default());

    // Empty or absent values are emitted as bare names
    let query = build_query(parameters, options);
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query.join("&"));
    }

    let fragment = components.fragment_str();
    if !fragment.is_empty() {
        url.push('#');
        url.push_str(fragment);
    }

    debug!("Composed URL: {}", url);
    url
}

/// Encodes each parameter into a `name` or `name=value` token
fn build_query(parameters: &[Parameter], options: &ComposeOptions) -> Vec<String> {
    let codec = &options.codec;
    let mut tokens = Vec::with_capacity(parameters.len());

    for parameter in parameters {
        let name = codec.encode(&parameter.name);
        if name.is_empty() && options.skip_unnamed {
            trace!("Skipping unnamed parameter");
            continue;
        }

        match parameter.value.as_deref() {
            Some(value) if !value.is_empty() => {
                tokens.push(format!("{}={}", name, codec.encode(value)));
            }
            _ => tokens.push(name),
        }
    }

    tokens
}
