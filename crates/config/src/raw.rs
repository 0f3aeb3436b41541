//! The settings document as written, before defaults and validation.

use std::collections::BTreeMap;

use super::*;
use crate::extras::RawExtras;
use crate::feeds::RawFeeds;

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RawSettings {
    pub(crate) author: Option<String>,
    pub(crate) site_name: Option<String>,
    pub(crate) site_url: Option<String>,
    pub(crate) content_path: Option<String>,
    pub(crate) output_path: Option<String>,
    pub(crate) delete_output_directory: Option<bool>,
    pub(crate) timezone: Option<String>,
    pub(crate) default_language: Option<String>,
    pub(crate) feed_settings: Option<RawFeeds>,
    pub(crate) links: Option<Vec<Link>>,
    pub(crate) social_links: Option<Vec<Link>>,
    pub(crate) pagination_size: Option<OptionValue>,
    pub(crate) relative_urls_enabled: Option<bool>,
    pub(crate) enabled_plugins: Option<Vec<String>>,
    pub(crate) code_block_options: Option<BTreeMap<String, OptionValue>>,
    pub(crate) theme_reference: Option<String>,
    pub(crate) site_metadata_extras: Option<RawExtras>,
    pub(crate) profiles: Option<BTreeMap<String, RawSettings>>,
}

impl RawSettings {
    /// Overlay `self` onto `other`.
    ///
    /// Scalars and sequences in `self` replace those in `other`; tables are merged key by key.
    pub(crate) fn merge(self, other: Self) -> Self {
        let RawSettings {
            author,
            site_name,
            site_url,
            content_path,
            output_path,
            delete_output_directory,
            timezone,
            default_language,
            feed_settings,
            links,
            social_links,
            pagination_size,
            relative_urls_enabled,
            enabled_plugins,
            code_block_options,
            theme_reference,
            site_metadata_extras,
            profiles,
        } = self;
        Self {
            author: author.or(other.author),
            site_name: site_name.or(other.site_name),
            site_url: site_url.or(other.site_url),
            content_path: content_path.or(other.content_path),
            output_path: output_path.or(other.output_path),
            delete_output_directory: delete_output_directory.or(other.delete_output_directory),
            timezone: timezone.or(other.timezone),
            default_language: default_language.or(other.default_language),
            feed_settings: merge_map(feed_settings, other.feed_settings),
            links: links.or(other.links),
            social_links: social_links.or(other.social_links),
            pagination_size: pagination_size.or(other.pagination_size),
            relative_urls_enabled: relative_urls_enabled.or(other.relative_urls_enabled),
            enabled_plugins: enabled_plugins.or(other.enabled_plugins),
            code_block_options: merge_map(code_block_options, other.code_block_options),
            theme_reference: theme_reference.or(other.theme_reference),
            site_metadata_extras: match (site_metadata_extras, other.site_metadata_extras) {
                (Some(s), Some(o)) => Some(s.merge(o)),
                (s, o) => s.or(o),
            },
            profiles: profiles.or(other.profiles),
        }
    }

    /// Split off the profile table and apply `profile` on top of the base settings.
    pub(crate) fn apply_profile(mut self, profile: Option<&str>) -> Result<Self> {
        let mut profiles = self.profiles.take().unwrap_or_default();
        let Some(name) = profile else {
            return Ok(self);
        };
        let overlay = profiles.remove(name).ok_or_else(|| {
            let known = profiles.keys().map(String::as_str).collect::<Vec<_>>();
            let reason = if known.is_empty() {
                format!("`{name}` is not defined, no profiles are declared")
            } else {
                format!("`{name}` is not defined, expected one of {}", known.join(", "))
            };
            Error::invalid("profile", reason)
        })?;
        if overlay.profiles.is_some() {
            return Err(Error::invalid(
                format!("profiles.{name}.profiles"),
                "profiles cannot be nested",
            ));
        }
        log::debug!("Applying profile `{name}`");
        Ok(overlay.merge(self))
    }
}

pub(crate) fn merge_map<K: Ord, V>(
    overlay: Option<BTreeMap<K, V>>,
    base: Option<BTreeMap<K, V>>,
) -> Option<BTreeMap<K, V>> {
    match (overlay, base) {
        (Some(overlay), Some(mut base)) => {
            base.extend(overlay);
            Some(base)
        }
        (overlay, base) => overlay.or(base),
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
