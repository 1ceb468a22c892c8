//! Upload source classification
//!
//! An upload reference is either an http(s) URL ending in a supported image
//! extension, which is fetched before upload, or a local path that is read
//! directly. Any other http(s) URL is rejected rather than read as a path.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use psnlink_domain::{PsnError, ResourceSource, Result};
use regex::Regex;

static IMAGE_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://\S+?\.(?:png|jpe?g)$")
        .expect("IMAGE_URL_REGEX should compile - this is a bug")
});

/// Classify an upload reference.
///
/// # Errors
/// Returns `InvalidInput` for an empty reference
pub fn classify_source(reference: &str) -> Result<ResourceSource> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(PsnError::InvalidInput("resource path is required".to_string()));
    }

    if IMAGE_URL_REGEX.is_match(reference) {
        return Ok(ResourceSource::RemoteImage(reference.to_string()));
    }

    let lower = reference.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Ok(ResourceSource::UnsupportedUrl(reference.to_string()));
    }

    Ok(ResourceSource::LocalPath(PathBuf::from(reference)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_urls_are_remote() {
        for url in [
            "https://example.com/pic.png",
            "http://example.com/a/b/photo.JPG",
            "https://cdn.example.com/x.jpeg",
        ] {
            assert_eq!(
                classify_source(url).expect("classified"),
                ResourceSource::RemoteImage(url.to_string())
            );
        }
    }

    #[test]
    fn local_paths_are_read_directly() {
        assert_eq!(
            classify_source("/local/pic.jpg").expect("classified"),
            ResourceSource::LocalPath(PathBuf::from("/local/pic.jpg"))
        );
    }

    #[test]
    fn non_image_urls_are_unsupported() {
        for url in ["https://example.com/video.mp4", "https://example.com/pic.png?size=2"] {
            assert!(matches!(
                classify_source(url).expect("classified"),
                ResourceSource::UnsupportedUrl(_)
            ));
        }
    }

    #[test]
    fn empty_reference_is_invalid() {
        assert!(matches!(classify_source("  "), Err(PsnError::InvalidInput(_))));
    }
}
