//! Provenance-tagged option values.

use std::fmt;

/// Where a raw option value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// A command-line argument, identified as written (`--out-dir`, `TARGET`).
    CommandLine { key: String },
    /// A key inside a config file section.
    ConfigFile { section: String, key: String },
    /// A directive in a targets file (1-based line number).
    TargetsFile { line: usize, key: String },
}

impl Origin {
    pub fn command_line(key: impl Into<String>) -> Self {
        Origin::CommandLine { key: key.into() }
    }

    pub fn config_file(section: impl Into<String>, key: impl Into<String>) -> Self {
        Origin::ConfigFile {
            section: section.into(),
            key: key.into(),
        }
    }

    pub fn targets_file(line: usize, key: impl Into<String>) -> Self {
        Origin::TargetsFile {
            line,
            key: key.into(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::CommandLine { key } => write!(f, "command-line option '{}'", key),
            Origin::ConfigFile { section, key } => {
                write!(f, "config file section '{}', key '{}'", section, key)
            }
            Origin::TargetsFile { line, key } => {
                write!(f, "targets file line {}, key '{}'", line, key)
            }
        }
    }
}

/// A raw option value tagged with its origin.
///
/// An entry without a value, or with an empty one, counts as unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub origin: Origin,
    pub value: Option<String>,
}

impl OptionEntry {
    pub fn new(origin: Origin, value: impl Into<String>) -> Self {
        Self {
            origin,
            value: Some(value.into()),
        }
    }

    /// Tag an optional command-line value, returning `None` when unset.
    pub fn from_command_line(key: &str, value: Option<impl Into<String>>) -> Option<Self> {
        value.map(|v| Self::new(Origin::command_line(key), v))
    }

    /// The raw value if it is set and non-empty.
    pub fn defined_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn is_defined(&self) -> bool {
        self.defined_value().is_some()
    }
}

/// Pick the first candidate that carries a defined value.
///
/// Candidates are given in priority order, e.g. `[cli, config_file]`.
pub fn first_defined<'a, I>(candidates: I) -> Option<&'a OptionEntry>
where
    I: IntoIterator<Item = Option<&'a OptionEntry>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|entry| entry.is_defined())
}

/// Owned variant of [`first_defined`] for merging raw option sets.
pub(crate) fn first_defined_cloned<'a, I>(candidates: I) -> Option<OptionEntry>
where
    I: IntoIterator<Item = Option<&'a OptionEntry>>,
{
    first_defined(candidates).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(value: &str) -> OptionEntry {
        OptionEntry::new(Origin::command_line("--out-dir"), value)
    }

    fn cfg(value: &str) -> OptionEntry {
        OptionEntry::new(Origin::config_file("output", "out.dir"), value)
    }

    #[test]
    fn test_first_defined_prefers_earlier() {
        let a = cli("/cli");
        let b = cfg("/cfg");
        let picked = first_defined([Some(&a), Some(&b)]).unwrap();
        assert_eq!(picked.defined_value(), Some("/cli"));
    }

    #[test]
    fn test_first_defined_skips_unset_and_empty() {
        let empty = cli("");
        let unset = OptionEntry {
            origin: Origin::command_line("--out-dir"),
            value: None,
        };
        let b = cfg("/cfg");
        let picked = first_defined([Some(&empty), Some(&unset), None, Some(&b)]).unwrap();
        assert_eq!(picked.origin, Origin::config_file("output", "out.dir"));
    }

    #[test]
    fn test_first_defined_none() {
        assert!(first_defined([None, None]).is_none());
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(
            Origin::command_line("--cookie").to_string(),
            "command-line option '--cookie'"
        );
        assert_eq!(
            Origin::config_file("output", "out.dir").to_string(),
            "config file section 'output', key 'out.dir'"
        );
        assert_eq!(
            Origin::targets_file(4, "include.preview.media").to_string(),
            "targets file line 4, key 'include.preview.media'"
        );
    }
}
