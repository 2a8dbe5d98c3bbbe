use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

use crate::url_parser::{ComposeOptions, ParamCodec, ParseMode, ParseOptions, PlusMode};

/// Prefix for environment overrides, e.g. `URL_EDITOR_PLUS_MODE=all`
pub const ENV_PREFIX: &str = "URL_EDITOR";

/// Settings for the URL editor
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// How `+` and space are translated in parameters
    pub plus_mode: PlusMode,

    /// Lenient (never reject) or strict parsing
    pub parse_mode: ParseMode,

    /// Drop parameters with an empty name in the `compose` command. Edit
    /// sessions always drop them, whatever this is set to.
    pub skip_unnamed: bool,

    /// Directory for log files; logs go to stderr when unset
    pub log_dir: Option<String>,
}

impl EditorConfig {
    /// Layers an optional config file and `URL_EDITOR_*` variables over the defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(true));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));

        let config: Self = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;
        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    pub fn codec(&self) -> ParamCodec {
        ParamCodec::new(self.plus_mode)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            codec: self.codec(),
            mode: self.parse_mode,
        }
    }

    pub fn compose_options(&self) -> ComposeOptions {
        ComposeOptions {
            codec: self.codec(),
            skip_unnamed: self.skip_unnamed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditSession;
    use crate::url_parser::UrlError;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.plus_mode, PlusMode::FirstOnly);
        assert_eq!(config.parse_mode, ParseMode::Lenient);
        assert!(!config.skip_unnamed);
        assert_eq!(config.compose_options(), ComposeOptions::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("url_editor_cfg_{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "plus_mode = \"all\"\nparse_mode = \"strict\"\nskip_unnamed = true").unwrap();

        let config = EditorConfig::load(path.to_str()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.plus_mode, PlusMode::All);
        assert_eq!(config.parse_options().mode, ParseMode::Strict);
        assert!(config.compose_options().skip_unnamed);
    }

    #[test]
    fn test_env_overrides_file() {
        let path = std::env::temp_dir().join(format!("url_editor_env_{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "plus_mode = \"first_only\"\nparse_mode = \"lenient\"").unwrap();

        std::env::set_var("URL_EDITOR_PLUS_MODE", "all");
        std::env::set_var("URL_EDITOR_PARSE_MODE", "strict");
        let from_file = EditorConfig::load(path.to_str());
        let env_only = EditorConfig::load(None);
        std::env::remove_var("URL_EDITOR_PLUS_MODE");
        std::env::remove_var("URL_EDITOR_PARSE_MODE");
        std::fs::remove_file(&path).unwrap();

        for config in [from_file.unwrap(), env_only.unwrap()] {
            assert_eq!(config.plus_mode, PlusMode::All);
            assert_eq!(config.parse_mode, ParseMode::Strict);
            assert_eq!(config.codec().decode("a+b+c").unwrap(), "a b c");
        }
    }

    #[test]
    fn test_strict_config_reaches_edit_session() {
        let config = EditorConfig {
            parse_mode: ParseMode::Strict,
            ..EditorConfig::default()
        };
        let mut session = EditSession::new(config.parse_options());
        let err = session.reset(&"?a=1").unwrap_err();
        assert_eq!(
            err.downcast_ref::<UrlError>(),
            Some(&UrlError::NoStructure)
        );

        let mut lenient = EditSession::new(EditorConfig::default().parse_options());
        assert!(lenient.reset(&"?a=1").is_ok());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(EditorConfig::load(Some("/nonexistent/url_editor.toml")).is_err());
    }
}
