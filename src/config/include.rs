//! The `include` option group: content filters.
//!
//! Raw [`IncludeEntries`] are merged field by field before validation, so the
//! same resolver serves the global group (command line over config file) and
//! per-target overrides (targets file over the merged global group).

use serde::Serialize;

use crate::config::source::{first_defined_cloned, OptionEntry};
use crate::config::validation::{
    validate_boolean, validate_content_media, validate_posts_in_tier,
    validate_posts_with_media_type, validate_preview_media,
};
use crate::config::values::{ContentMedia, PostsInTier, PostsWithMediaType, PreviewMedia};
use crate::error::Result;

/// One field of the include group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeField {
    LockedContent,
    PostsWithMediaType,
    PostsInTier,
    CampaignInfo,
    ContentInfo,
    PreviewMedia,
    ContentMedia,
    AllMediaVariants,
}

impl IncludeField {
    /// All fields, in targets-file directive matching order.
    pub const ALL: [IncludeField; 8] = [
        IncludeField::LockedContent,
        IncludeField::PostsWithMediaType,
        IncludeField::PostsInTier,
        IncludeField::CampaignInfo,
        IncludeField::ContentInfo,
        IncludeField::PreviewMedia,
        IncludeField::ContentMedia,
        IncludeField::AllMediaVariants,
    ];

    /// Key inside the config file's `include` section.
    pub fn config_key(self) -> &'static str {
        match self {
            IncludeField::LockedContent => "locked.content",
            IncludeField::PostsWithMediaType => "posts.with.media.type",
            IncludeField::PostsInTier => "posts.in.tier",
            IncludeField::CampaignInfo => "campaign.info",
            IncludeField::ContentInfo => "content.info",
            IncludeField::PreviewMedia => "preview.media",
            IncludeField::ContentMedia => "content.media",
            IncludeField::AllMediaVariants => "all.media.variants",
        }
    }

    /// Directive key in a targets file, e.g. `include.locked.content`.
    pub fn directive_key(self) -> String {
        format!("include.{}", self.config_key())
    }

    /// Long command-line flag, e.g. `--include-locked-content`.
    pub fn flag(self) -> String {
        format!("--include-{}", self.config_key().replace('.', "-"))
    }
}

/// Sparse, unvalidated include values from one or more sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeEntries {
    pub locked_content: Option<OptionEntry>,
    pub posts_with_media_type: Option<OptionEntry>,
    pub posts_in_tier: Option<OptionEntry>,
    pub campaign_info: Option<OptionEntry>,
    pub content_info: Option<OptionEntry>,
    pub preview_media: Option<OptionEntry>,
    pub content_media: Option<OptionEntry>,
    pub all_media_variants: Option<OptionEntry>,
}

impl IncludeEntries {
    pub fn get(&self, field: IncludeField) -> Option<&OptionEntry> {
        match field {
            IncludeField::LockedContent => self.locked_content.as_ref(),
            IncludeField::PostsWithMediaType => self.posts_with_media_type.as_ref(),
            IncludeField::PostsInTier => self.posts_in_tier.as_ref(),
            IncludeField::CampaignInfo => self.campaign_info.as_ref(),
            IncludeField::ContentInfo => self.content_info.as_ref(),
            IncludeField::PreviewMedia => self.preview_media.as_ref(),
            IncludeField::ContentMedia => self.content_media.as_ref(),
            IncludeField::AllMediaVariants => self.all_media_variants.as_ref(),
        }
    }

    pub fn set(&mut self, field: IncludeField, entry: Option<OptionEntry>) {
        let slot = match field {
            IncludeField::LockedContent => &mut self.locked_content,
            IncludeField::PostsWithMediaType => &mut self.posts_with_media_type,
            IncludeField::PostsInTier => &mut self.posts_in_tier,
            IncludeField::CampaignInfo => &mut self.campaign_info,
            IncludeField::ContentInfo => &mut self.content_info,
            IncludeField::PreviewMedia => &mut self.preview_media,
            IncludeField::ContentMedia => &mut self.content_media,
            IncludeField::AllMediaVariants => &mut self.all_media_variants,
        };
        *slot = entry;
    }

    /// True if no field carries a defined value.
    pub fn is_empty(&self) -> bool {
        IncludeField::ALL
            .iter()
            .all(|f| self.get(*f).map_or(true, |e| !e.is_defined()))
    }

    /// Merge field by field: a defined value in `self` wins, otherwise the
    /// value from `fallback` is kept.
    pub fn layer_over(&self, fallback: &IncludeEntries) -> IncludeEntries {
        let mut merged = IncludeEntries::default();
        for field in IncludeField::ALL {
            merged.set(
                field,
                first_defined_cloned([self.get(field), fallback.get(field)]),
            );
        }
        merged
    }

    /// Validate every field.
    pub fn resolve(&self) -> Result<IncludeOptions> {
        Ok(IncludeOptions {
            locked_content: validate_boolean(self.locked_content.as_ref())?,
            posts_with_media_type: validate_posts_with_media_type(
                self.posts_with_media_type.as_ref(),
            )?,
            posts_in_tier: validate_posts_in_tier(self.posts_in_tier.as_ref())?,
            campaign_info: validate_boolean(self.campaign_info.as_ref())?,
            content_info: validate_boolean(self.content_info.as_ref())?,
            preview_media: validate_preview_media(self.preview_media.as_ref())?,
            content_media: validate_content_media(self.content_media.as_ref())?,
            all_media_variants: validate_boolean(self.all_media_variants.as_ref())?,
        })
    }
}

/// Validated include group. Unset fields fall back to the downloader's
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IncludeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_content: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts_with_media_type: Option<PostsWithMediaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts_in_tier: Option<PostsInTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_info: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_info: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_media: Option<PreviewMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_media: Option<ContentMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_media_variants: Option<bool>,
}

/// Resolve an include group from a primary source layered over a fallback.
pub fn resolve_include_options(
    primary: &IncludeEntries,
    fallback: &IncludeEntries,
) -> Result<IncludeOptions> {
    primary.layer_over(fallback).resolve()
}
