//! Ignore rule matching.
//!
//! Rules are paths relative to the root being walked. They match by exact
//! equality of the cleaned relative path: `file.txt` ignores the file at
//! the top of the root, not every file named `file.txt`.

use crate::paths;
use std::collections::HashSet;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Lookup set of cleaned ignore rules.
///
/// Built once per traversal and consulted for both files and directories.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipstage_core::IgnoreSet;
///
/// let ignore = IgnoreSet::new(&["node_modules/", "src/docs/README.md"]);
/// assert!(ignore.is_ignored(Path::new("node_modules")));
/// assert!(ignore.is_ignored(Path::new("src/docs/README.md")));
/// assert!(!ignore.is_ignored(Path::new("src/node_modules")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    rules: HashSet<PathBuf>,
}

impl IgnoreSet {
    /// Builds the lookup set from raw rule strings.
    ///
    /// Every rule is cleaned and kept. Rules that clean to `.` refer to the
    /// root itself, which is never checked. Absolute rules and rules that
    /// climb out of the root (`../x`) can never equal a root-relative path.
    /// All of these are accepted and stay inert.
    #[must_use]
    pub fn new<S: AsRef<str>>(rules: &[S]) -> Self {
        let mut set = HashSet::with_capacity(rules.len());

        for rule in rules {
            let cleaned = paths::clean(Path::new(rule.as_ref()));

            if cleaned.has_root()
                || matches!(cleaned.components().next(), Some(Component::ParentDir))
            {
                tracing::debug!(
                    rule = rule.as_ref(),
                    "ignore rule lies outside the source root and never matches"
                );
            }

            set.insert(cleaned);
        }

        Self { rules: set }
    }

    /// Returns `true` if the root-relative path is exactly an ignore rule.
    #[must_use]
    pub fn is_ignored(&self, relative: &Path) -> bool {
        !self.rules.is_empty() && self.rules.contains(relative)
    }

    /// Number of distinct rules after cleaning.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
