//! Targets file parsing.
//!
//! A targets file lists one target URL per line. Lines starting with one of
//! the `include.*` directive keys attach a per-target override to the most
//! recently listed URL:
//!
//! ```text
//! # comments and blank lines are ignored
//! https://www.patreon.com/johndoe/posts
//! include.locked.content = false
//! include.posts.with.media.type = image, video
//!
//! https://www.patreon.com/posts/123456
//! ```

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::config::include::{IncludeEntries, IncludeField, IncludeOptions};
use crate::config::source::{OptionEntry, Origin};
use crate::config::validation::validate_target_url;
use crate::error::{Error, Result};

/// A target URL as declared, with unvalidated per-target overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDeclaration {
    pub url: String,
    pub overrides: Option<IncludeEntries>,
}

impl TargetDeclaration {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            overrides: None,
        }
    }
}

/// A resolved download target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetEntry {
    pub url: String,
    /// Target-specific include options, layered over the global group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<IncludeOptions>,
}

/// Line-by-line scanner state.
///
/// `current` indexes the target that directive lines attach to.
#[derive(Debug, Default)]
pub struct TargetsScanner {
    targets: Vec<TargetDeclaration>,
    current: Option<usize>,
}

impl TargetsScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one line. `line_number` is 1-based and only used for
    /// provenance and error reporting.
    pub fn feed(&mut self, line_number: usize, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        if let Some((field, key)) = match_directive(line) {
            self.attach(line_number, field, &key, directive_value(line, &key));
            return Ok(());
        }

        let url = validate_target_url(line).map_err(|e| Error::TargetsFileParse {
            line: line_number,
            source: Box::new(e),
        })?;
        self.targets.push(TargetDeclaration::new(url));
        self.current = Some(self.targets.len() - 1);
        Ok(())
    }

    fn attach(&mut self, line_number: usize, field: IncludeField, key: &str, value: Option<&str>) {
        let Some(value) = value else {
            debug!(line = line_number, key, "Ignoring directive without a value");
            return;
        };
        let Some(index) = self.current else {
            debug!(line = line_number, key, "Ignoring directive before any target URL");
            return;
        };

        let overrides = self.targets[index]
            .overrides
            .get_or_insert_with(IncludeEntries::default);
        overrides.set(
            field,
            Some(OptionEntry::new(Origin::targets_file(line_number, key), value)),
        );
    }

    pub fn finish(self) -> Vec<TargetDeclaration> {
        self.targets
    }
}

fn match_directive(line: &str) -> Option<(IncludeField, String)> {
    IncludeField::ALL.iter().find_map(|field| {
        let key = field.directive_key();
        line.starts_with(&key).then_some((*field, key))
    })
}

/// Value after the first `=`, provided that `=` comes after the key.
fn directive_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let eq = line.find('=')?;
    if eq < key.len() {
        return None;
    }
    Some(line[eq + 1..].trim()).filter(|v| !v.is_empty())
}

/// Scan a sequence of lines. Line numbers are assigned from 1.
pub fn parse_targets<'a, I>(lines: I) -> Result<Vec<TargetDeclaration>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scanner = TargetsScanner::new();
    for (index, line) in lines.into_iter().enumerate() {
        scanner.feed(index + 1, line)?;
    }
    Ok(scanner.finish())
}

/// Parse targets file content, accepting LF or CRLF line endings and a
/// leading byte-order mark.
pub fn parse_targets_str(content: &str) -> Result<Vec<TargetDeclaration>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let normalized = content.replace("\r\n", "\n");
    parse_targets(normalized.split('\n'))
}

/// Read and parse a targets file.
pub fn read_targets_file(path: &Path) -> Result<Vec<TargetDeclaration>> {
    let content = fs::read_to_string(path).map_err(|source| Error::TargetsFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let targets = parse_targets_str(&content)?;
    debug!(path = %path.display(), count = targets.len(), "Parsed targets file");
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bare_urls_keep_order() {
        let targets = parse_targets_str(
            "https://example.com/a\nhttps://example.com/b\nhttps://example.com/c\n",
        )
        .unwrap();
        let urls: Vec<&str> = targets.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c"
            ]
        );
        assert!(targets.iter().all(|t| t.overrides.is_none()));
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let targets =
            parse_targets_str("# my targets\n\n   \nhttps://example.com/a\n  # indented\n").unwrap();
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn test_directive_attaches_to_preceding_url_only() {
        let targets = parse_targets_str(
            "https://example.com/a\ninclude.preview.media = lockedOnly\nhttps://example.com/b\n",
        )
        .unwrap();
        assert_eq!(targets.len(), 2);

        let overrides = targets[0].overrides.as_ref().unwrap();
        let entry = overrides.preview_media.as_ref().unwrap();
        assert_eq!(entry.defined_value(), Some("lockedOnly"));
        assert_eq!(
            entry.origin,
            Origin::targets_file(2, "include.preview.media")
        );
        assert!(targets[1].overrides.is_none());
    }

    #[test]
    fn test_orphan_directive_is_dropped() {
        // No target to attach to yet: intentionally a no-op, not an error.
        let targets =
            parse_targets_str("include.locked.content = true\nhttps://example.com/a\n").unwrap();
        assert_eq!(targets.len(), 1);
        assert!(targets[0].overrides.is_none());
    }

    #[test]
    fn test_directive_without_value_is_absent() {
        let targets = parse_targets_str(
            "https://example.com/a\ninclude.locked.content\ninclude.campaign.info =\n",
        )
        .unwrap();
        assert!(targets[0].overrides.is_none());
    }

    #[test]
    fn test_crlf_line_endings() {
        let targets =
            parse_targets_str("https://example.com/a\r\ninclude.content.info = false\r\n").unwrap();
        let overrides = targets[0].overrides.as_ref().unwrap();
        assert_eq!(
            overrides.content_info.as_ref().unwrap().defined_value(),
            Some("false")
        );
    }

    #[test]
    fn test_leading_byte_order_mark() {
        let content = "\u{feff}https://example.com/a\r\nhttps://example.com/b\r\n";
        let targets = parse_targets_str(content).unwrap();
        let urls: Vec<&str> = targets.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(urls, vec!["https://example.com/a", "https://example.com/b"]);
    }

    #[test]
    fn test_later_directive_overrides_earlier() {
        let targets = parse_targets_str(
            "https://example.com/a\ninclude.locked.content = true\ninclude.locked.content = false\n",
        )
        .unwrap();
        let entry = targets[0]
            .overrides
            .as_ref()
            .unwrap()
            .locked_content
            .clone()
            .unwrap();
        assert_eq!(entry.defined_value(), Some("false"));
        assert_eq!(entry.origin, Origin::targets_file(3, "include.locked.content"));
    }

    #[test]
    fn test_malformed_url_reports_line() {
        let err = parse_targets_str("https://example.com/a\n\nnot-a-url\nhttps://example.com/b\n")
            .unwrap_err();
        match err {
            Error::TargetsFileParse { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(*source, Error::InvalidTargetUrl { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_scanner_in_isolation() {
        let mut scanner = TargetsScanner::new();
        scanner.feed(10, "https://example.com/a").unwrap();
        scanner.feed(11, "include.posts.in.tier = 42").unwrap();
        let targets = scanner.finish();
        let entry = targets[0]
            .overrides
            .as_ref()
            .unwrap()
            .posts_in_tier
            .clone()
            .unwrap();
        assert_eq!(entry.origin, Origin::targets_file(11, "include.posts.in.tier"));
    }

    #[test]
    fn test_read_targets_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "https://example.com/a").unwrap();
        writeln!(file, "include.all.media.variants = true").unwrap();
        let targets = read_targets_file(file.path()).unwrap();
        assert_eq!(targets.len(), 1);
        assert!(targets[0].overrides.is_some());
    }

    #[test]
    fn test_read_missing_targets_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_targets_file(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, Error::TargetsFileRead { .. }));
    }
}
