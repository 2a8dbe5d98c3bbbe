//! URL decomposition and reconstruction
//!
//! [`decompose`] splits any string into raw [`UrlComponents`] with one
//! lenient grammar and decodes its query into an ordered list of
//! [`Parameter`]s. [`compose`] goes the other way, re-encoding the parameter
//! list and filling in a default `/` path.
//!
//! ```
//! use url_editor::url_parser::{compose, decompose};
//!
//! let parsed = decompose("https://example.com:8080/search?q=hello+world#top").unwrap();
//! assert_eq!(parsed.components.port.as_deref(), Some("8080"));
//! assert_eq!(parsed.parameters[0].value.as_deref(), Some("hello world"));
//! assert_eq!(
//!     compose(&parsed.components, &parsed.parameters),
//!     "https://example.com:8080/search?q=hello%20world#top"
//! );
//! ```

pub mod components;
pub mod error;
pub mod param_codec;
pub mod parser;
pub mod url_reconstructor;
pub mod url_validator;


pub use components::{Parameter, ParsedUrl, UrlComponents, DEFAULT_PATH};
pub use error::{Result, UrlError};
pub use param_codec::{decode_param, encode_param, ParamCodec, PlusMode};
pub use parser::{decompose, decompose_with, split_components, split_query, ParseMode, ParseOptions};
pub use url_reconstructor::{compose, compose_with, ComposeOptions};
pub use url_validator::MAX_URL_LENGTH;
