// Named regex fragments for common path pieces

/// Non-greedy patterns
pub struct SafePatterns;

impl SafePatterns {
    /// Filename characters including the separators `-`, `_` and `.`
    pub const FILENAME: &'static str = r"[-_.a-zA-Z0-9]+?";
    /// Filename characters plus the directory separator
    pub const DIRPATH: &'static str = r"[-_.a-zA-Z0-9/]+?";
    /// A single field without separator characters
    pub const FIELD: &'static str = r"[a-zA-Z0-9]+?";
    /// Dots allowed for sub extensions such as `tar.gz`
    pub const EXTENSION: &'static str = r"[.a-zA-Z0-9]+?";
    /// Folder or product names: `-` and `_` but no dots
    pub const NAME: &'static str = r"[-_a-zA-Z0-9]+?";

    /// Look up a pattern by its lower-case name, as written after `@` in YAML models
    pub fn by_name(name: &str) -> Option<&'static str> {
        match name {
            "filename" => Some(Self::FILENAME),
            "dirpath" => Some(Self::DIRPATH),
            "field" => Some(Self::FIELD),
            "extension" => Some(Self::EXTENSION),
            "name" => Some(Self::NAME),
            _ => None,
        }
    }
}
