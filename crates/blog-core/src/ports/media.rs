/// Media storage - resolves a stored file name to a public URL.
pub trait MediaStorage: Send + Sync {
    /// URL of the stored file, or `None` when the name does not point at a file.
    fn url(&self, name: &str) -> Option<String>;
}
