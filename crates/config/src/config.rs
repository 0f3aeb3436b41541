use std::fmt;

use itertools::Itertools;

use super::*;
use crate::raw::{RawSettings, non_empty};

const DEFAULT_PAGINATION_SIZE: usize = 10;
const DEFAULT_OUTPUT_PATH: &str = "output";

static TIMEZONE: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
    regex::Regex::new(r"^[A-Za-z][A-Za-z0-9_+\-]*(/[A-Za-z0-9_+\-]+)*$").unwrap()
});

static LANGUAGE: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
    regex::Regex::new(r"^[a-zA-Z]{2,3}([-_][a-zA-Z0-9]{2,8})*$").unwrap()
});

static PLUGIN: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").unwrap());

/// Validated site settings.
///
/// Built once by the loader and read-only afterwards; share it by reference (or in an `Arc`).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SiteConfiguration {
    author: String,
    site_name: String,
    site_url: String,
    content_path: String,
    output_path: String,
    delete_output_directory: bool,
    timezone: String,
    default_language: String,
    pagination_size: usize,
    relative_urls_enabled: bool,
    theme_reference: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    enabled_plugins: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    social_links: Vec<Link>,
    #[serde(skip_serializing_if = "FeedSettings::is_empty")]
    feed_settings: FeedSettings,
    #[serde(skip_serializing_if = "CodeBlockOptions::is_empty")]
    code_block_options: CodeBlockOptions,
    #[serde(skip_serializing_if = "SiteMetadataExtras::is_empty")]
    site_metadata_extras: SiteMetadataExtras,
}

impl SiteConfiguration {
    pub(crate) fn from_raw(raw: RawSettings) -> Result<Self> {
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
            profiles: _,
        } = raw;

        let author = present("author", author)?;
        let site_name = present("site_name", site_name)?;
        let content_path = present("content_path", content_path)?;
        let timezone = present("timezone", timezone)?;
        let default_language = present("default_language", default_language)?;
        let theme_reference = present("theme_reference", theme_reference)?;

        let author = not_blank("author", author)?;
        let site_name = not_blank("site_name", site_name)?;
        let site_url = parse_site_url(site_url.unwrap_or_default())?;
        let content_path = not_blank("content_path", content_path)?;
        let output_path = match output_path {
            Some(path) => not_blank("output_path", path)?,
            None => DEFAULT_OUTPUT_PATH.to_owned(),
        };
        let timezone = matching("timezone", timezone, &TIMEZONE, "an IANA timezone identifier")?;
        let default_language = matching(
            "default_language",
            default_language,
            &LANGUAGE,
            "an ISO language code",
        )?;
        let feed_settings = FeedSettings::from_raw(feed_settings.unwrap_or_default())?;
        let links = links.unwrap_or_default();
        validate_links("links", &links)?;
        let social_links = social_links.unwrap_or_default();
        validate_links("social_links", &social_links)?;
        let pagination_size = parse_pagination_size(pagination_size)?;
        let enabled_plugins = parse_plugins(enabled_plugins.unwrap_or_default())?;
        let code_block_options = CodeBlockOptions::from_raw(code_block_options.unwrap_or_default())?;
        let theme_reference = not_blank("theme_reference", theme_reference)?;
        let site_metadata_extras =
            SiteMetadataExtras::from_raw(site_metadata_extras.unwrap_or_default())?;

        let config = Self {
            author,
            site_name,
            site_url,
            content_path,
            output_path,
            delete_output_directory: delete_output_directory.unwrap_or(false),
            timezone,
            default_language,
            pagination_size,
            relative_urls_enabled: relative_urls_enabled.unwrap_or(false),
            theme_reference,
            enabled_plugins,
            links,
            social_links,
            feed_settings,
            code_block_options,
            site_metadata_extras,
        };
        config.advise();
        Ok(config)
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    /// Canonical base URL without a trailing `/`; empty while URLs are not finalized.
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn content_path(&self) -> &str {
        &self.content_path
    }

    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    pub fn delete_output_directory(&self) -> bool {
        self.delete_output_directory
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn feed_settings(&self) -> &FeedSettings {
        &self.feed_settings
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn social_links(&self) -> &[Link] {
        &self.social_links
    }

    pub fn pagination_size(&self) -> usize {
        self.pagination_size
    }

    pub fn relative_urls_enabled(&self) -> bool {
        self.relative_urls_enabled
    }

    /// Plugin identifiers in evaluation order, without repeats.
    pub fn enabled_plugins(&self) -> &[String] {
        &self.enabled_plugins
    }

    pub fn code_block_options(&self) -> &CodeBlockOptions {
        &self.code_block_options
    }

    pub fn theme_reference(&self) -> &str {
        &self.theme_reference
    }

    pub fn site_metadata_extras(&self) -> &SiteMetadataExtras {
        &self.site_metadata_extras
    }

    pub fn has_plugin_like(&self, needle: &str) -> bool {
        self.enabled_plugins.iter().any(|p| p.contains(needle))
    }

    /// Write the normalized settings back out in `format`.
    pub fn to_source(&self, format: Format) -> Result<String> {
        let serialized = match format {
            Format::Yaml => serde_yaml::to_string(self).map_err(|e| e.to_string()),
            Format::Toml => toml::to_string(self).map_err(|e| e.to_string()),
            Format::Json => serde_json::to_string_pretty(self).map_err(|e| e.to_string()),
        };
        serialized.map_err(|message| Error::Serialize { message })
    }

    fn advise(&self) {
        let extras = &self.site_metadata_extras;
        if extras.sitemap().is_some() && !self.has_plugin_like("sitemap") {
            log::warn!("`site_metadata_extras.sitemap` is set but no sitemap plugin is enabled");
        }
        if extras.seo().any() && !self.has_plugin_like("seo") {
            log::warn!("`site_metadata_extras.seo` is set but no SEO plugin is enabled");
        }
        if !self.social_links.is_empty() && !self.has_plugin_like("social") {
            log::warn!("`social_links` is set but no social plugin is enabled");
        }
        if self.site_url.is_empty() && !self.relative_urls_enabled {
            log::debug!("`site_url` is empty and relative URLs are disabled; links will be root-relative");
        }
    }
}

impl fmt::Display for SiteConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{converted}")
    }
}

fn present(field: &'static str, value: Option<String>) -> Result<String> {
    value.ok_or(Error::MissingRequiredField { field })
}

fn not_blank(field: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::invalid(field, "must not be empty"));
    }
    Ok(value)
}

fn matching(field: &str, value: String, re: &regex::Regex, expected: &str) -> Result<String> {
    let value = not_blank(field, value)?;
    if !re.is_match(&value) {
        return Err(Error::invalid(field, format!("`{value}` is not {expected}")));
    }
    Ok(value)
}

fn parse_site_url(value: String) -> Result<String> {
    let Some(value) = non_empty(Some(value)) else {
        return Ok(String::new());
    };
    let value = value.trim_end_matches('/').to_owned();
    let url = check_absolute_url("site_url", &value)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid(
            "site_url",
            format!("`{value}` must use http or https"),
        ));
    }
    Ok(value)
}

fn parse_pagination_size(value: Option<OptionValue>) -> Result<usize> {
    match value {
        None => Ok(DEFAULT_PAGINATION_SIZE),
        Some(OptionValue::Integer(n)) if n > 0 => usize::try_from(n)
            .map_err(|_| Error::invalid("pagination_size", format!("{n} is too large"))),
        Some(OptionValue::Integer(n)) => Err(Error::invalid(
            "pagination_size",
            format!("must be a positive integer, got {n}"),
        )),
        Some(other) => Err(Error::invalid(
            "pagination_size",
            format!("must be a positive integer, got {}", other.type_name()),
        )),
    }
}

fn parse_plugins(plugins: Vec<String>) -> Result<Vec<String>> {
    for (i, plugin) in plugins.iter().enumerate() {
        if !PLUGIN.is_match(plugin) {
            return Err(Error::invalid(
                format!("enabled_plugins[{i}]"),
                format!("`{plugin}` is not a plugin identifier"),
            ));
        }
    }
    for duplicate in plugins.iter().duplicates() {
        log::warn!("Plugin `{duplicate}` is enabled more than once; keeping the first");
    }
    Ok(plugins.into_iter().unique().collect())
}
