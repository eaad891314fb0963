//! Enumerated option values.

use serde::{Serialize, Serializer};
use std::fmt;

/// An option whose legal values form a fixed, case-sensitive set of names.
pub trait ConfigEnum: Sized + Copy + PartialEq + 'static {
    /// Legal names paired with their values, in display order.
    const VARIANTS: &'static [(&'static str, Self)];

    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    fn name(self) -> &'static str {
        Self::VARIANTS
            .iter()
            .find(|(_, v)| *v == self)
            .map(|(n, _)| *n)
            .unwrap_or("")
    }

    fn names() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|(n, _)| *n).collect()
    }
}

/// What to do when a downloaded artifact already exists on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileExistsAction {
    Overwrite,
    Skip,
    SaveAsCopy,
    SaveAsCopyIfNewer,
}

impl ConfigEnum for FileExistsAction {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("overwrite", FileExistsAction::Overwrite),
        ("skip", FileExistsAction::Skip),
        ("saveAsCopy", FileExistsAction::SaveAsCopy),
        ("saveAsCopyIfNewer", FileExistsAction::SaveAsCopyIfNewer),
    ];
}

/// What a file logger does when its log file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFileExistsAction {
    Append,
    Overwrite,
}

impl ConfigEnum for LogFileExistsAction {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("append", LogFileExistsAction::Append),
        ("overwrite", LogFileExistsAction::Overwrite),
    ];
}

/// Minimum level a logger emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Debug,
    Warn,
    Error,
}

impl ConfigEnum for LogLevel {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("info", LogLevel::Info),
        ("debug", LogLevel::Debug),
        ("warn", LogLevel::Warn),
        ("error", LogLevel::Error),
    ];
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Media types a post may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostMediaType {
    Image,
    Video,
    Audio,
    Attachment,
    Podcast,
}

impl ConfigEnum for PostMediaType {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("image", PostMediaType::Image),
        ("video", PostMediaType::Video),
        ("audio", PostMediaType::Audio),
        ("attachment", PostMediaType::Attachment),
        ("podcast", PostMediaType::Podcast),
    ];
}

/// Media types that have preview variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewMediaType {
    Image,
    Video,
    Audio,
}

impl ConfigEnum for PreviewMediaType {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("image", PreviewMediaType::Image),
        ("video", PreviewMediaType::Video),
        ("audio", PreviewMediaType::Audio),
    ];
}

/// Media types found in content bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMediaType {
    Image,
    Video,
    Audio,
    Attachment,
    File,
}

impl ConfigEnum for ContentMediaType {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("image", ContentMediaType::Image),
        ("video", ContentMediaType::Video),
        ("audio", ContentMediaType::Audio),
        ("attachment", ContentMediaType::Attachment),
        ("file", ContentMediaType::File),
    ];
}

/// Filter on the media types a post must contain to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostsWithMediaType {
    Any,
    None,
    Only(Vec<PostMediaType>),
}

/// Filter on the tiers a post must belong to, by tier id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostsInTier {
    Any,
    Only(Vec<String>),
}

/// Which preview media to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewMedia {
    All,
    None,
    /// Previews only for content the user cannot access.
    LockedOnly,
    Only(Vec<PreviewMediaType>),
}

/// Which content media to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentMedia {
    All,
    None,
    Only(Vec<ContentMediaType>),
}

fn write_list<T: ConfigEnum>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    let names: Vec<&str> = items.iter().map(|i| i.name()).collect();
    f.write_str(&names.join(","))
}

macro_rules! display_by_name {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }

            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.name())
                }
            }
        )+
    };
}

display_by_name!(
    FileExistsAction,
    LogFileExistsAction,
    LogLevel,
    PostMediaType,
    PreviewMediaType,
    ContentMediaType
);

impl fmt::Display for PostsWithMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostsWithMediaType::Any => f.write_str("any"),
            PostsWithMediaType::None => f.write_str("none"),
            PostsWithMediaType::Only(types) => write_list(f, types),
        }
    }
}

impl fmt::Display for PostsInTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostsInTier::Any => f.write_str("any"),
            PostsInTier::Only(tiers) => f.write_str(&tiers.join(",")),
        }
    }
}

impl fmt::Display for PreviewMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewMedia::All => f.write_str("true"),
            PreviewMedia::None => f.write_str("false"),
            PreviewMedia::LockedOnly => f.write_str("lockedOnly"),
            PreviewMedia::Only(types) => write_list(f, types),
        }
    }
}

impl fmt::Display for ContentMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentMedia::All => f.write_str("true"),
            ContentMedia::None => f.write_str("false"),
            ContentMedia::Only(types) => write_list(f, types),
        }
    }
}

macro_rules! serialize_by_display {
    ($($ty:ty),+) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }
        )+
    };
}

serialize_by_display!(PostsWithMediaType, PostsInTier, PreviewMedia, ContentMedia);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_case_sensitive() {
        assert_eq!(
            FileExistsAction::from_name("saveAsCopy"),
            Some(FileExistsAction::SaveAsCopy)
        );
        assert_eq!(FileExistsAction::from_name("saveascopy"), None);
    }

    #[test]
    fn test_names_in_order() {
        assert_eq!(LogFileExistsAction::names(), vec!["append", "overwrite"]);
    }

    #[test]
    fn test_display_lists() {
        let media = PostsWithMediaType::Only(vec![PostMediaType::Image, PostMediaType::Podcast]);
        assert_eq!(media.to_string(), "image,podcast");
        assert_eq!(PreviewMedia::LockedOnly.to_string(), "lockedOnly");
        assert_eq!(ContentMedia::All.to_string(), "true");
    }

    #[test]
    fn test_log_level_to_tracing() {
        assert_eq!(tracing::Level::from(LogLevel::Warn), tracing::Level::WARN);
    }
}
