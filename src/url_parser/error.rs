use thiserror::Error;

/// Errors produced while decomposing a URL
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// A parameter name or value contained an invalid percent-escape,
    /// or its escapes decoded to bytes that are not UTF-8
    #[error("Malformed percent-encoding in query parameter: {input}")]
    MalformedEncoding { input: String },

    /// Strict mode only: the input was empty
    #[error("URL cannot be empty")]
    Empty,

    /// Strict mode only: the input exceeded the length limit, counted in bytes
    #[error("URL exceeds maximum length of {max} bytes (got {len})")]
    TooLong { len: usize, max: usize },

    /// Strict mode only: no scheme, no authority and no path were found
    #[error("URL has no scheme, authority or path")]
    NoStructure,
}

pub type Result<T> = std::result::Result<T, UrlError>;
