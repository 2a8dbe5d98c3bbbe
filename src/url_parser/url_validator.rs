use tracing::error;

use super::components::UrlComponents;
use super::error::{Result, UrlError};

// Constants for strict-mode validation
pub const MAX_URL_LENGTH: usize = 2048; // Maximum allowable URL length

/// Validates the raw input before it is split (strict mode only)
pub fn validate_url(url: &str) -> Result<()> {
    if url.is_empty() {
        error!("Received empty URL");
        return Err(UrlError::Empty);
    }

    if url.len() > MAX_URL_LENGTH {
        error!("URL exceeds maximum length: {} > {}", url.len(), MAX_URL_LENGTH);
        return Err(UrlError::TooLong {
            len: url.len(),
            max: MAX_URL_LENGTH,
        });
    }

    Ok(())
}

/// Rejects a split that found no scheme, no authority and no path
///
/// Such input is only a query and/or fragment (`?a=1`, `#top`), which the
/// lenient grammar accepts but strict mode does not.
pub fn validate_components(components: &UrlComponents) -> Result<()> {
    if components.scheme.is_none() && !components.has_authority() && components.path.is_none() {
        error!("URL has no scheme, authority or path");
        return Err(UrlError::NoStructure);
    }
    Ok(())
}
