//! Source text registry for rendering diagnostics with code snippets.

/// One registered source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// The name locations refer to, as stored in [`crate::SourceInfo::file`]
    pub name: String,
    /// Full text of the file
    pub content: String,
}

/// The source texts a set of diagnostics may point into.
///
/// Diagnostics only carry locations. Passing a context to
/// [`crate::DiagnosticMessage::to_text`] lets the renderer quote the
/// offending line.
///
/// # Example
///
/// ```
/// use pigment_error_reporting::SourceContext;
///
/// let mut ctx = SourceContext::new();
/// ctx.add_file("pigment.yaml", "plugins: [forms]\n");
/// assert_eq!(ctx.get_file("pigment.yaml").unwrap().content, "plugins: [forms]\n");
/// assert!(ctx.get_file("other.yaml").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceContext {
    files: Vec<SourceFile>,
}

impl SourceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file. A second file with the same name replaces the first.
    pub fn add_file(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let file = SourceFile {
            name: name.into(),
            content: content.into(),
        };
        match self.files.iter_mut().find(|f| f.name == file.name) {
            Some(existing) => *existing = file,
            None => self.files.push(file),
        }
    }

    pub fn get_file(&self, name: &str) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.name == name)
    }
}
