//! Editable view of one URL: plain text fields plus ordered parameter rows

pub mod host;

use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::url_parser::{
    compose_with, decompose_with, ComposeOptions, Parameter, ParseOptions, ParsedUrl, UrlComponents,
    UrlError, DEFAULT_PATH,
};

pub use host::{Disposition, Navigator, RecordingNavigator, UrlSource};

/// Identifier of a parameter row, unique within one load of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParamId(pub u64);

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "param_{}", self.0)
    }
}

/// One editable name/value row
///
/// Rows hold plain text. An empty `value` is emitted as a bare name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamRow {
    pub id: ParamId,
    pub name: String,
    pub value: String,
}

impl ParamRow {
    fn to_parameter(&self) -> Parameter {
        Parameter {
            name: self.name.clone(),
            value: Some(self.value.clone()).filter(|v| !v.is_empty()),
        }
    }
}

/// The text fields shown for a URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditFields {
    pub scheme: String,
    pub domain: String,
    pub port: String,
    pub path: String,
    pub fragment: String,
}

impl Default for EditFields {
    fn default() -> Self {
        Self {
            scheme: String::new(),
            domain: String::new(),
            port: String::new(),
            path: DEFAULT_PATH.to_string(),
            fragment: String::new(),
        }
    }
}

impl From<&UrlComponents> for EditFields {
    fn from(components: &UrlComponents) -> Self {
        Self {
            scheme: components.scheme_str().to_string(),
            domain: components.domain_str().to_string(),
            port: components.port_str().to_string(),
            path: components.path_or_default().to_string(),
            fragment: components.fragment_str().to_string(),
        }
    }
}

impl EditFields {
    fn to_components(&self) -> UrlComponents {
        let non_empty = |s: &str| Some(s.to_string()).filter(|s| !s.is_empty());
        UrlComponents {
            scheme: non_empty(&self.scheme),
            user_info: None,
            domain: non_empty(&self.domain),
            port: non_empty(&self.port),
            path: non_empty(&self.path),
            raw_query: None,
            fragment: non_empty(&self.fragment),
        }
    }
}

/// Edit state for a single URL
///
/// Loading replaces every field and row. Row ids restart at 0 on each load,
/// so they are only meaningful until the next [`EditSession::load`] or
/// [`EditSession::reset`].
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    fields: EditFields,
    rows: Vec<ParamRow>,
    next_id: u64,
    options: ParseOptions,
}

impl EditSession {
    /// Creates an empty session that loads URLs with `options`
    ///
    /// In [`ParseMode::Strict`](crate::url_parser::ParseMode::Strict) a load rejects structureless input the same
    /// way [`decompose_with`] does.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Creates a session already loaded with `url`
    pub fn from_url(url: &str, options: ParseOptions) -> Result<Self, UrlError> {
        let mut session = Self::new(options);
        session.load(url)?;
        Ok(session)
    }

    /// Replaces the session contents with the decomposition of `url`
    ///
    /// On a decoding error the session is left untouched rather than
    /// holding a partial parameter list.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&mut self, url: &str) -> Result<(), UrlError> {
        let parsed = match decompose_with(url, &self.options) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Keeping previous edit state: {}", e);
                return Err(e);
            }
        };

        self.fields = EditFields::from(&parsed.components);
        self.rows.clear();
        self.next_id = 0;
        for parameter in parsed.parameters {
            self.add_param(parameter.name, parameter.value.unwrap_or_default());
        }

        debug!("Loaded {} parameter rows", self.rows.len());
        Ok(())
    }

    /// Reloads from the host's current URL
    pub fn reset(&mut self, source: &dyn UrlSource) -> Result<()> {
        let url = source.current_url().context("Failed to read current URL")?;
        self.load(&url)
            .with_context(|| format!("Failed to load URL '{}'", url))
    }

    pub fn fields(&self) -> &EditFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut EditFields {
        &mut self.fields
    }

    pub fn params(&self) -> &[ParamRow] {
        &self.rows
    }

    pub fn param(&self, id: ParamId) -> Option<&ParamRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Appends a row and returns its id
    pub fn add_param(&mut self, name: impl Into<String>, value: impl Into<String>) -> ParamId {
        let id = ParamId(self.next_id);
        self.next_id += 1;
        self.rows.push(ParamRow {
            id,
            name: name.into(),
            value: value.into(),
        });
        id
    }

    /// Removes a row; returns `false` if no row has that id
    pub fn remove_param(&mut self, id: ParamId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        before != self.rows.len()
    }

    /// Overwrites a row's text in place, keeping its position
    pub fn update_param(
        &mut self,
        id: ParamId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> bool {
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.name = name.into();
                row.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Removes every row named `name`, returning how many were removed
    pub fn remove_params_named(&mut self, name: &str) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| row.name != name);
        before - self.rows.len()
    }

    /// Sets the first row named `name`, or appends one when there is none
    pub fn set_param(&mut self, name: &str, value: impl Into<String>) -> ParamId {
        let value = value.into();
        match self.rows.iter_mut().find(|row| row.name == name) {
            Some(row) => {
                row.value = value;
                row.id
            }
            None => self.add_param(name, value),
        }
    }

    /// Current state as components plus parameters
    pub fn to_parsed(&self) -> ParsedUrl {
        ParsedUrl {
            components: self.fields.to_components(),
            parameters: self.rows.iter().map(ParamRow::to_parameter).collect(),
        }
    }

    /// Rebuilds the URL; rows whose name is empty are left out
    pub fn build_url(&self) -> String {
        let parsed = self.to_parsed();
        let options = ComposeOptions {
            codec: self.options.codec,
            skip_unnamed: true,
        };
        compose_with(&parsed.components, &parsed.parameters, &options)
    }

    /// Builds the URL and hands it to `navigator`
    pub fn launch(&self, navigator: &mut dyn Navigator, disposition: Disposition) -> Result<String> {
        let url = self.build_url();
        info!(?disposition, "Launching {}", url);
        navigator
            .navigate(&url, disposition)
            .with_context(|| format!("Failed to navigate to '{}'", url))?;
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url_parser::ParseMode;

    #[test]
    fn test_load_fills_fields_and_rows() {
        let session =
            EditSession::from_url("https://example.com:8080?a=1&flag#top", ParseOptions::default())
                .unwrap();

        let fields = session.fields();
        assert_eq!(fields.scheme, "https");
        assert_eq!(fields.domain, "example.com");
        assert_eq!(fields.port, "8080");
        assert_eq!(fields.path, "/");
        assert_eq!(fields.fragment, "top");

        let rows = session.params();
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].id, rows[0].name.as_str(), rows[0].value.as_str()), (ParamId(0), "a", "1"));
        assert_eq!((rows[1].id, rows[1].name.as_str(), rows[1].value.as_str()), (ParamId(1), "flag", ""));
    }

    #[test]
    fn test_ids_restart_on_reload() {
        let mut session = EditSession::from_url("http://a/?x=1&y=2", ParseOptions::default()).unwrap();
        let added = session.add_param("z", "3");
        assert_eq!(added, ParamId(2));

        session.reset(&"http://b/?k=v").unwrap();
        assert_eq!(session.params()[0].id, ParamId(0));
        assert_eq!(session.fields().domain, "b");
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let mut session = EditSession::from_url("http://a/?x=1", ParseOptions::default()).unwrap();
        let err = session.load("http://b/?bad=%zz").unwrap_err();
        assert!(matches!(err, UrlError::MalformedEncoding { .. }));
        assert_eq!(session.fields().domain, "a");
        assert_eq!(session.params().len(), 1);
    }

    #[test]
    fn test_edit_and_build() {
        let mut session =
            EditSession::from_url("https://example.com/search?q=rust&page=2", ParseOptions::default())
                .unwrap();
        let page = session.params()[1].id;

        assert!(session.remove_param(page));
        assert!(!session.remove_param(page));
        session.add_param("lang", "en us");
        session.add_param("", "ignored");
        session.fields_mut().port = "8443".to_string();

        assert_eq!(
            session.build_url(),
            "https://example.com:8443/search?q=rust&lang=en%20us"
        );
    }

    #[test]
    fn test_update_and_set_param() {
        let mut session = EditSession::from_url("http://h/?a=1&a=2", ParseOptions::default()).unwrap();
        let first = session.params()[0].id;
        assert!(session.update_param(first, "b", "9"));
        assert!(!session.update_param(ParamId(99), "c", "0"));

        session.set_param("a", "3");
        session.set_param("new", "x");
        assert_eq!(session.build_url(), "http://h/?b=9&a=3&new=x");

        assert_eq!(session.remove_params_named("b"), 1);
        assert_eq!(session.build_url(), "http://h/?a=3&new=x");
    }

    #[test]
    fn test_launch_reaches_navigator() {
        let session = EditSession::from_url("http://h/p?x=1", ParseOptions::default()).unwrap();
        let mut navigator = RecordingNavigator::default();

        let url = session.launch(&mut navigator, Disposition::NewTab).unwrap();
        assert_eq!(url, "http://h/p?x=1");
        assert_eq!(navigator.visits, vec![(url, Disposition::NewTab)]);
    }

    #[test]
    fn test_strict_session_rejects_structureless_url() {
        let strict = ParseOptions {
            mode: ParseMode::Strict,
            ..ParseOptions::default()
        };
        let mut session = EditSession::from_url("http://a/?x=1", strict).unwrap();

        assert_eq!(session.load("?a=1").unwrap_err(), UrlError::NoStructure);
        assert_eq!(session.load("").unwrap_err(), UrlError::Empty);
        assert!(session.reset(&"#top").is_err());
        assert_eq!(session.build_url(), "http://a/?x=1");

        // The same input is accepted by a lenient session
        let lenient = EditSession::from_url("?a=1", ParseOptions::default()).unwrap();
        assert_eq!(lenient.params().len(), 1);
    }

    #[test]
    fn test_param_id_display() {
        assert_eq!(ParamId(4).to_string(), "param_4");
    }
}
