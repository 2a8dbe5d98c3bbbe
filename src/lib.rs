//! Decompose a URL into editable parts and rebuild it
//!
//! [`url_parser`] holds the pure decomposition/composition functions,
//! [`editor`] the edit state built on top of them.

pub mod config;
pub mod editor;
pub mod url_parser;
pub mod utils;

pub use editor::{Disposition, EditSession, Navigator, UrlSource};
pub use url_parser::{compose, decompose, Parameter, ParsedUrl, UrlComponents, UrlError};
