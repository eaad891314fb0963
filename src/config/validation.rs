//! Value validation and coercion.
//!
//! Every validator takes the winning [`OptionEntry`] for a field (or `None`
//! when no source set it) and either returns the typed value or an error that
//! names the entry's origin.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::source::OptionEntry;
use crate::config::values::{
    ConfigEnum, ContentMedia, PostsInTier, PostsWithMediaType, PreviewMedia,
};
use crate::error::{Error, Result};

/// Separators accepted between literal target URLs.
static TARGET_URL_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").expect("target URL separator pattern is valid"));

fn defined(entry: Option<&OptionEntry>) -> Option<(&OptionEntry, &str)> {
    entry.and_then(|e| e.defined_value().map(|v| (e, v)))
}

/// Return the raw value, failing with `message` if it is unset.
pub fn validate_required(entry: Option<&OptionEntry>, message: &str) -> Result<String> {
    match defined(entry) {
        Some((_, value)) => Ok(value.to_string()),
        None => Err(Error::MissingRequiredValue(message.to_string())),
    }
}

/// Return the raw value as-is, if set.
pub fn validate_string(entry: Option<&OptionEntry>) -> Option<String> {
    defined(entry).map(|(_, value)| value.to_string())
}

/// Return the raw value, or `default` if unset.
pub fn validate_string_or(entry: Option<&OptionEntry>, default: &str) -> String {
    validate_string(entry).unwrap_or_else(|| default.to_string())
}

fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Coerce a case-insensitive `true`/`false`.
///
/// Returns `Ok(None)` when unset; callers apply their own default.
pub fn validate_boolean(entry: Option<&OptionEntry>) -> Result<Option<bool>> {
    let Some((entry, value)) = defined(entry) else {
        return Ok(None);
    };
    parse_bool(value)
        .map(Some)
        .ok_or_else(|| Error::InvalidBooleanValue {
            origin: entry.origin.clone(),
            value: value.to_string(),
        })
}

/// Parse a numeric value into `T`.
pub fn validate_number<T: FromStr>(entry: Option<&OptionEntry>) -> Result<Option<T>> {
    let Some((entry, value)) = defined(entry) else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| Error::InvalidNumericValue {
            origin: entry.origin.clone(),
            value: value.to_string(),
        })
}

fn invalid_enum(entry: &OptionEntry, value: &str, allowed: &[&str]) -> Error {
    Error::InvalidEnumValue {
        origin: entry.origin.clone(),
        value: value.to_string(),
        allowed: allowed.join(", "),
    }
}

/// Check the value is a case-sensitive member of `allowed`.
pub fn validate_one_of(entry: Option<&OptionEntry>, allowed: &[&str]) -> Result<Option<String>> {
    let Some((entry, value)) = defined(entry) else {
        return Ok(None);
    };
    if allowed.contains(&value) {
        Ok(Some(value.to_string()))
    } else {
        Err(invalid_enum(entry, value, allowed))
    }
}

/// Typed form of [`validate_one_of`].
pub fn validate_enum<T: ConfigEnum>(entry: Option<&OptionEntry>) -> Result<Option<T>> {
    let Some((entry, value)) = defined(entry) else {
        return Ok(None);
    };
    T::from_name(value)
        .map(Some)
        .ok_or_else(|| invalid_enum(entry, value, &T::names()))
}

/// Parse a comma-separated list of `T` names. `keywords` are the
/// non-list forms also accepted by the field, reported in the error.
fn parse_enum_list<T: ConfigEnum>(
    entry: &OptionEntry,
    value: &str,
    keywords: &[&str],
) -> Result<Vec<T>> {
    let allowed = || {
        let mut all = keywords.to_vec();
        all.extend(T::names());
        all
    };

    let items: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        return Err(invalid_enum(entry, value, &allowed()));
    }

    items
        .into_iter()
        .map(|item| T::from_name(item).ok_or_else(|| invalid_enum(entry, item, &allowed())))
        .collect()
}

/// `any`, `none`, or a list of post media types.
pub fn validate_posts_with_media_type(
    entry: Option<&OptionEntry>,
) -> Result<Option<PostsWithMediaType>> {
    let Some((entry, value)) = defined(entry) else {
        return Ok(None);
    };
    let parsed = match value.trim() {
        "any" => PostsWithMediaType::Any,
        "none" => PostsWithMediaType::None,
        list => PostsWithMediaType::Only(parse_enum_list(entry, list, &["any", "none"])?),
    };
    Ok(Some(parsed))
}

/// `any`, or a list of tier ids.
pub fn validate_posts_in_tier(entry: Option<&OptionEntry>) -> Result<Option<PostsInTier>> {
    let Some((entry, value)) = defined(entry) else {
        return Ok(None);
    };
    if value.trim() == "any" {
        return Ok(Some(PostsInTier::Any));
    }
    let tiers: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if tiers.is_empty() {
        return Err(invalid_enum(entry, value, &["any", "<tier id>[,<tier id>...]"]));
    }
    Ok(Some(PostsInTier::Only(tiers)))
}

/// `true`, `false`, `lockedOnly`, or a list of preview media types.
pub fn validate_preview_media(entry: Option<&OptionEntry>) -> Result<Option<PreviewMedia>> {
    let Some((entry, value)) = defined(entry) else {
        return Ok(None);
    };
    let parsed = match parse_bool(value) {
        Some(true) => PreviewMedia::All,
        Some(false) => PreviewMedia::None,
        None if value.trim() == "lockedOnly" => PreviewMedia::LockedOnly,
        None => PreviewMedia::Only(parse_enum_list(
            entry,
            value,
            &["true", "false", "lockedOnly"],
        )?),
    };
    Ok(Some(parsed))
}

/// `true`, `false`, or a list of content media types.
pub fn validate_content_media(entry: Option<&OptionEntry>) -> Result<Option<ContentMedia>> {
    let Some((entry, value)) = defined(entry) else {
        return Ok(None);
    };
    let parsed = match parse_bool(value) {
        Some(true) => ContentMedia::All,
        Some(false) => ContentMedia::None,
        None => ContentMedia::Only(parse_enum_list(entry, value, &["true", "false"])?),
    };
    Ok(Some(parsed))
}

/// Check a single target URL: absolute, `http` or `https`, with a host.
///
/// Returns the trimmed input rather than the normalised URL.
pub fn validate_target_url(value: &str) -> Result<String> {
    let value = value.trim();
    let invalid = |reason: String| Error::InvalidTargetUrl {
        url: value.to_string(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    Ok(value.to_string())
}

/// Split a comma/whitespace separated list and validate each URL.
pub fn validate_target_urls(value: &str) -> Result<Vec<String>> {
    let urls = TARGET_URL_SEPARATOR
        .split(value)
        .filter(|s| !s.is_empty())
        .map(validate_target_url)
        .collect::<Result<Vec<_>>>()?;

    if urls.is_empty() {
        return Err(Error::InvalidTargetUrl {
            url: value.to_string(),
            reason: "no URL found".to_string(),
        });
    }

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source::Origin;
    use crate::config::values::{FileExistsAction, PostMediaType, PreviewMediaType};

    fn cfg(value: &str) -> OptionEntry {
        OptionEntry::new(Origin::config_file("output", "content.file.exists.action"), value)
    }

    #[test]
    fn test_required_missing() {
        let err = validate_required(None, "No target URL specified").unwrap_err();
        assert!(matches!(err, Error::MissingRequiredValue(ref m) if m == "No target URL specified"));

        let empty = cfg("");
        assert!(validate_required(Some(&empty), "missing").is_err());
        assert_eq!(validate_required(Some(&cfg("x")), "missing").unwrap(), "x");
    }

    #[test]
    fn test_string_default() {
        assert_eq!(validate_string(None), None);
        assert_eq!(validate_string_or(None, "."), ".");
        assert_eq!(validate_string_or(Some(&cfg("/out")), "."), "/out");
    }

    #[test]
    fn test_boolean_accepts_any_case() {
        assert_eq!(validate_boolean(Some(&cfg("true"))).unwrap(), Some(true));
        assert_eq!(validate_boolean(Some(&cfg("TRUE"))).unwrap(), Some(true));
        assert_eq!(validate_boolean(Some(&cfg("false"))).unwrap(), Some(false));
        assert_eq!(validate_boolean(None).unwrap(), None);
    }

    #[test]
    fn test_boolean_rejects_yes() {
        let err = validate_boolean(Some(&cfg("yes"))).unwrap_err();
        match err {
            Error::InvalidBooleanValue { origin, value } => {
                assert_eq!(value, "yes");
                assert_eq!(
                    origin,
                    Origin::config_file("output", "content.file.exists.action")
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_number() {
        assert_eq!(validate_number::<u32>(Some(&cfg("10"))).unwrap(), Some(10));
        assert_eq!(validate_number::<u32>(None).unwrap(), None);
        let err = validate_number::<u32>(Some(&cfg("ten"))).unwrap_err();
        assert!(matches!(err, Error::InvalidNumericValue { .. }));
        assert!(err.to_string().contains("section 'output'"));
    }

    #[test]
    fn test_one_of() {
        let allowed = ["overwrite", "skip"];
        assert_eq!(
            validate_one_of(Some(&cfg("skip")), &allowed).unwrap(),
            Some("skip".to_string())
        );
        let err = validate_one_of(Some(&cfg("rename")), &allowed).unwrap_err();
        match err {
            Error::InvalidEnumValue { allowed, value, .. } => {
                assert_eq!(value, "rename");
                assert_eq!(allowed, "overwrite, skip");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_enum_is_case_sensitive() {
        assert_eq!(
            validate_enum::<FileExistsAction>(Some(&cfg("saveAsCopyIfNewer"))).unwrap(),
            Some(FileExistsAction::SaveAsCopyIfNewer)
        );
        assert!(validate_enum::<FileExistsAction>(Some(&cfg("Skip"))).is_err());
    }

    #[test]
    fn test_posts_with_media_type() {
        assert_eq!(
            validate_posts_with_media_type(Some(&cfg("any"))).unwrap(),
            Some(PostsWithMediaType::Any)
        );
        assert_eq!(
            validate_posts_with_media_type(Some(&cfg("image, video"))).unwrap(),
            Some(PostsWithMediaType::Only(vec![
                PostMediaType::Image,
                PostMediaType::Video
            ]))
        );
        let err = validate_posts_with_media_type(Some(&cfg("image,gif"))).unwrap_err();
        assert!(err.to_string().contains("'gif'"));
    }

    #[test]
    fn test_posts_in_tier() {
        assert_eq!(
            validate_posts_in_tier(Some(&cfg("123, 456"))).unwrap(),
            Some(PostsInTier::Only(vec!["123".into(), "456".into()]))
        );
        assert!(validate_posts_in_tier(Some(&cfg(" , "))).is_err());
    }

    #[test]
    fn test_preview_media() {
        assert_eq!(
            validate_preview_media(Some(&cfg("lockedOnly"))).unwrap(),
            Some(PreviewMedia::LockedOnly)
        );
        assert_eq!(
            validate_preview_media(Some(&cfg("False"))).unwrap(),
            Some(PreviewMedia::None)
        );
        assert_eq!(
            validate_preview_media(Some(&cfg("audio"))).unwrap(),
            Some(PreviewMedia::Only(vec![PreviewMediaType::Audio]))
        );
        assert!(validate_preview_media(Some(&cfg("attachment"))).is_err());
    }

    #[test]
    fn test_content_media() {
        assert_eq!(
            validate_content_media(Some(&cfg("true"))).unwrap(),
            Some(ContentMedia::All)
        );
        assert!(validate_content_media(Some(&cfg("lockedOnly"))).is_err());
    }

    #[test]
    fn test_target_url() {
        assert_eq!(
            validate_target_url(" https://example.com/a ").unwrap(),
            "https://example.com/a"
        );
        assert!(validate_target_url("example.com/a").is_err());
        assert!(validate_target_url("ftp://example.com/a").is_err());
        let err = validate_target_url("not a url").unwrap_err();
        assert!(err.to_string().contains("'not a url'"));
    }

    #[test]
    fn test_target_urls_list() {
        let urls =
            validate_target_urls("https://example.com/a, https://example.com/b\nhttps://example.com/c")
                .unwrap();
        assert_eq!(
            urls,
            vec![
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c"
            ]
        );
        let err = validate_target_urls("https://example.com/a,bogus").unwrap_err();
        assert!(matches!(err, Error::InvalidTargetUrl { ref url, .. } if url == "bogus"));
        assert!(validate_target_urls(" , ").is_err());
    }
}
