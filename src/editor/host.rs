use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Where a rebuilt URL should be opened
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Replace the current document's location
    #[default]
    CurrentTab,
    /// Open a new document at the URL
    NewTab,
}

/// Supplies the URL of the active document
pub trait UrlSource {
    fn current_url(&self) -> Result<String>;
}

/// Receives the rebuilt URL
pub trait Navigator {
    fn navigate(&mut self, url: &str, disposition: Disposition) -> Result<()>;
}

impl UrlSource for String {
    fn current_url(&self) -> Result<String> {
        Ok(self.clone())
    }
}

impl UrlSource for &str {
    fn current_url(&self) -> Result<String> {
        Ok((*self).to_string())
    }
}

/// Navigator that only records what it was asked to open
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    pub visits: Vec<(String, Disposition)>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, url: &str, disposition: Disposition) -> Result<()> {
        self.visits.push((url.to_string(), disposition));
        Ok(())
    }
}
