//! Media served from a static prefix (a local directory behind a web server or a CDN).

use blog_core::ports::MediaStorage;

/// Resolves stored file names against a base URL such as `/media/`.
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    base_url: String,
}

impl LocalMediaStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for LocalMediaStorage {
    fn default() -> Self {
        Self::new("/media/")
    }
}

impl MediaStorage for LocalMediaStorage {
    fn url(&self, name: &str) -> Option<String> {
        let name = name.trim().trim_start_matches('/');
        if name.is_empty() {
            return None;
        }

        Some(format!("{}/{}", self.base_url.trim_end_matches('/'), name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_base_and_name() {
        let media = LocalMediaStorage::default();
        assert_eq!(
            media.url("posts/cover.jpg").as_deref(),
            Some("/media/posts/cover.jpg")
        );
    }

    #[test]
    fn test_handles_slashes_on_both_sides() {
        let media = LocalMediaStorage::new("https://cdn.example.com/blog/");
        assert_eq!(
            media.url("/cover.jpg").as_deref(),
            Some("https://cdn.example.com/blog/cover.jpg")
        );
    }

    #[test]
    fn test_blank_name_has_no_url() {
        let media = LocalMediaStorage::default();
        assert_eq!(media.url(""), None);
        assert_eq!(media.url("  "), None);
    }
}
