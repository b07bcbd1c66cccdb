/// Configuration for locating package files.
///
/// The defaults match question-pool exports: the manifest name contains
/// `qpl`, the item document name contains `qti`, both end in `.xml`, and a
/// single wrapper folder is looked through once.
///
/// # Examples
///
/// ```rust
/// use quizpack::package::LocatorOptions;
///
/// // Create with defaults
/// let options = LocatorOptions::default();
/// assert_eq!(options.manifest_marker, "qpl");
///
/// // Or customize
/// let options = LocatorOptions::new()
///     .with_manifest_marker("tst")
///     .with_flatten_single_dir(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Substring the manifest file name must contain (case-sensitive)
    pub manifest_marker: String,
    /// Substring the item document file name must contain (case-sensitive)
    pub assessment_marker: String,
    /// Required file name suffix
    pub extension: String,
    /// Whether a lone subfolder is descended into once
    pub flatten_single_dir: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            manifest_marker: "qpl".to_string(),
            assessment_marker: "qti".to_string(),
            extension: ".xml".to_string(),
            flatten_single_dir: true,
        }
    }
}

impl LocatorOptions {
    /// Create a new `LocatorOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the substring identifying the manifest file.
    #[inline]
    pub fn with_manifest_marker(mut self, marker: impl Into<String>) -> Self {
        self.manifest_marker = marker.into();
        self
    }

    /// Set the substring identifying the item document.
    #[inline]
    pub fn with_assessment_marker(mut self, marker: impl Into<String>) -> Self {
        self.assessment_marker = marker.into();
        self
    }

    /// Set the required file name suffix.
    #[inline]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set whether a single wrapper folder is looked through.
    ///
    /// Even when enabled, only one level is ever flattened.
    #[inline]
    pub fn with_flatten_single_dir(mut self, flatten: bool) -> Self {
        self.flatten_single_dir = flatten;
        self
    }
}
