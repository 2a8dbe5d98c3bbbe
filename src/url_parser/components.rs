use serde::{Deserialize, Serialize};

/// Path used when a URL has no path, or an empty one
pub const DEFAULT_PATH: &str = "/";

/// The structural slots of a URL, as raw text
///
/// Nothing here is decoded. An absent slot (`None`) means the grammar did not
/// match that group at all, which is different from a slot that matched
/// empty text (only `domain` can match empty, e.g. `file:///etc`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlComponents {
    pub scheme: Option<String>,
    pub user_info: Option<String>,
    pub domain: Option<String>,
    pub port: Option<String>,
    pub path: Option<String>,
    /// Undecoded text between `?` and `#`. Kept for inspection only; the
    /// parameter list is what gets composed.
    pub raw_query: Option<String>,
    pub fragment: Option<String>,
}

impl UrlComponents {
    pub fn scheme_str(&self) -> &str {
        self.scheme.as_deref().unwrap_or("")
    }

    pub fn domain_str(&self) -> &str {
        self.domain.as_deref().unwrap_or("")
    }

    pub fn port_str(&self) -> &str {
        self.port.as_deref().unwrap_or("")
    }

    pub fn fragment_str(&self) -> &str {
        self.fragment.as_deref().unwrap_or("")
    }

    /// The path, or `/` when it is absent or empty
    pub fn path_or_default(&self) -> &str {
        match self.path.as_deref() {
            Some(path) if !path.is_empty() => path,
            _ => DEFAULT_PATH,
        }
    }

    /// Whether an authority block (`//...`) was present
    pub fn has_authority(&self) -> bool {
        self.domain.is_some()
    }
}

/// One decoded query parameter
///
/// `value: None` is a bare name (`?flag`), `Some("")` is an explicit empty
/// value (`?flag=`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            value: value.map(Into::into),
        }
    }

    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn pair(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// Result of decomposing a URL and input to composing one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedUrl {
    #[serde(default)]
    pub components: UrlComponents,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl ParsedUrl {
    /// Decomposes `url` with default options
    pub fn new(url: &str) -> super::Result<Self> {
        super::parser::decompose(url)
    }

    /// Composes this value back into a URL string with default options
    pub fn to_url(&self) -> String {
        super::url_reconstructor::compose(&self.components, &self.parameters)
    }

    /// All values for `name`, in query order
    pub fn values_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = Option<&'a str>> + 'a {
        self.parameters
            .iter()
            .filter(move |p| p.name == name)
            .map(|p| p.value.as_deref())
    }
}
