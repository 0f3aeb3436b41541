use std::fmt;
use std::path;
use std::str::FromStr;

use super::*;
use crate::raw::RawSettings;

/// File names searched for by [`SettingsSource::from_cwd`], in order of preference.
pub const SETTINGS_FILE_NAMES: [&str; 4] = ["_site.yml", "_site.yaml", "_site.toml", "_site.json"];

/// Declarative formats a settings source can be written in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Yaml,
    Toml,
    Json,
}

impl Format {
    /// Pick the format from the file extension, falling back to YAML.
    pub fn from_path(path: &path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Format::Toml,
            Some("json") => Format::Json,
            _ => Format::Yaml,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Toml => "toml",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            "json" => Ok(Format::Json),
            _ => Err(Error::invalid("format", format!("`{s}` is not one of yaml, toml, json"))),
        }
    }
}

/// A parsed settings document, not yet resolved against a profile.
#[derive(Debug, Clone)]
pub struct SettingsSource {
    origin: String,
    raw: RawSettings,
}

impl SettingsSource {
    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<Self> {
        Self::from_file_internal(path.into())
    }

    fn from_file_internal(path: path::PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(path.display().to_string(), &content, Format::from_path(&path))
    }

    /// Parse settings held in memory.
    pub fn from_text(content: &str, format: Format) -> Result<Self> {
        Self::parse(format!("<{format}>"), content, format)
    }

    fn parse(origin: String, content: &str, format: Format) -> Result<Self> {
        let raw = if content.trim().is_empty() {
            RawSettings::default()
        } else {
            let parsed = match format {
                Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
                Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
                Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            };
            parsed.map_err(|e| Error::parse(origin.as_str(), e))?
        };
        Ok(Self { origin, raw })
    }

    /// Find the nearest settings file in `cwd` or one of its parents.
    pub fn from_cwd<P: Into<path::PathBuf>>(cwd: P) -> Result<Self> {
        let cwd = cwd.into();
        let file_path = find_project_file(&cwd, &SETTINGS_FILE_NAMES)
            .ok_or(Error::NotFound { dir: cwd })?;
        log::debug!("Using settings file `{}`", file_path.display());
        Self::from_file(file_path)
    }

    /// Where the settings came from, for messages.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Declared profile names, sorted.
    pub fn profiles(&self) -> Vec<&str> {
        self.raw
            .profiles
            .as_ref()
            .map(|p| p.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Apply `profile` (if any) and validate.
    pub fn resolve(&self, profile: Option<&str>) -> Result<SiteConfiguration> {
        let raw = self.raw.clone().apply_profile(profile)?;
        SiteConfiguration::from_raw(raw)
    }
}

/// Load and validate the settings file at `source` with no profile applied.
pub fn load<P: AsRef<path::Path>>(source: P) -> Result<SiteConfiguration> {
    load_profile(source, None)
}

/// Load and validate the settings file at `source`, applying `profile` when given.
pub fn load_profile<P: AsRef<path::Path>>(
    source: P,
    profile: Option<&str>,
) -> Result<SiteConfiguration> {
    SettingsSource::from_file(source.as_ref())?.resolve(profile)
}

fn find_project_file(dir: &path::Path, names: &[&str]) -> Option<path::PathBuf> {
    let mut dir = Some(dir);
    while let Some(current) = dir {
        if let Some(found) = names
            .iter()
            .map(|name| current.join(name))
            .find(|p| p.is_file())
        {
            return Some(found);
        }
        dir = current.parent();
    }
    None
}

#[cfg(test)]
mod test {
    use super::*;

    const FIXTURES: &str = "tests/fixtures";

    fn fixture(name: &str) -> path::PathBuf {
        path::Path::new(FIXTURES).join(name)
    }

    #[test]
    fn load_ok() {
        let actual = load(fixture("site/_site.yml")).unwrap();
        assert_eq!(actual.site_name(), "Principia Nugae");
        assert_eq!(actual.site_url(), "");
        assert_eq!(actual.pagination_size(), 3);
        assert!(!actual.relative_urls_enabled());
        assert_eq!(actual.enabled_plugins(), ["social"]);
        assert_eq!(actual.social_links().len(), 1);
        assert_eq!(actual.social_links()[0].label(), "github");
        assert_eq!(
            actual.social_links()[0].url(),
            "https://github.com/markpbaggett"
        );
        assert_eq!(actual.code_block_options().line_numbers(), LineNumbers::Table);
        assert_eq!(actual.theme_reference(), "themes/plumage");
        assert!(actual.feed_settings().is_empty());
    }

    #[test]
    fn load_is_deterministic() {
        let first = load(fixture("site/_site.yml")).unwrap();
        let second = load(fixture("site/_site.yml")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn load_production_profile() {
        let actual = load_profile(fixture("site/_site.yml"), Some("production")).unwrap();
        assert_eq!(actual.site_url(), "https://markpbaggett.github.io");
        assert!(actual.delete_output_directory());
        assert_eq!(actual.enabled_plugins(), ["social", "sitemap", "seo"]);
        assert_eq!(
            actual.feed_settings().get(FeedKind::AllAtom),
            Some("feeds/all.atom.xml")
        );
        assert!(!actual.feed_settings().is_enabled(FeedKind::CategoryAtom));
        let extras = actual.site_metadata_extras();
        assert_eq!(extras.analytics_tracking_id(), Some("UA-00000000-1"));
        assert!(extras.seo().enhancer);
        let sitemap = extras.sitemap().unwrap();
        assert_eq!(sitemap.priorities.unwrap().articles, 0.5);
        // unchanged from the base section
        assert_eq!(actual.pagination_size(), 3);
        assert_eq!(actual.social_links().len(), 1);
    }

    #[test]
    fn profiles_listed() {
        let source = SettingsSource::from_file(fixture("site/_site.yml")).unwrap();
        assert_eq!(source.profiles(), vec!["development", "production"]);
    }

    #[test]
    fn load_missing_theme() {
        let err = load(fixture("missing_theme.yml")).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRequiredField {
                field: "theme_reference"
            }
        ));
    }

    #[test]
    fn load_incomplete_sitemap() {
        let err = load(fixture("incomplete_sitemap.yml")).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }));
        assert!(err.field().unwrap().contains("sitemap"));
    }

    #[test]
    fn load_empty_reports_first_required_field() {
        let err = load(fixture("empty.yml")).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField { field: "author" }));
    }

    #[test]
    fn load_invalid_syntax() {
        let err = load(fixture("invalid_syntax.yml")).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn load_unknown_key() {
        let err = load(fixture("unknown_key.yml")).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("sitename"));
    }

    #[test]
    fn load_not_found() {
        let err = load(fixture("does_not_exist.yml")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn toml_and_json_match_yaml() {
        let yaml = load(fixture("site/_site.yml")).unwrap();
        let toml = load(fixture("site.toml")).unwrap();
        let json = load(fixture("site.json")).unwrap();
        assert_eq!(toml, yaml);
        assert_eq!(json, yaml);
    }

    #[test]
    fn round_trip() {
        for profile in [None, Some("production")] {
            let expected = load_profile(fixture("site/_site.yml"), profile).unwrap();
            for format in [Format::Yaml, Format::Json, Format::Toml] {
                let written = expected.to_source(format).unwrap();
                let actual = SettingsSource::from_text(&written, format)
                    .unwrap()
                    .resolve(None)
                    .unwrap();
                assert_eq!(actual, expected, "{format}:\n{written}");
            }
        }
    }

    #[test]
    fn scenario_social_only() {
        let source = SettingsSource::from_text(
            "
author: A
site_name: S
site_url: ''
content_path: content
timezone: UTC
default_language: en
theme_reference: themes/plain
pagination_size: 3
enabled_plugins: [social]
social_links:
  - [github, 'https://github.com/example']
",
            Format::Yaml,
        )
        .unwrap();
        let actual = source.resolve(None).unwrap();
        assert!(!actual.relative_urls_enabled());
        assert_eq!(actual.social_links(), [Link::new("github", "https://github.com/example")]);
    }

    #[test]
    fn from_cwd_parent_dir() {
        let source = SettingsSource::from_cwd(fixture("site/child")).unwrap();
        assert_eq!(
            path::Path::new(source.origin()),
            fixture("site/_site.yml").as_path()
        );
    }

    #[test]
    fn from_cwd_not_found() {
        // nothing above the filesystem root to fall back to
        let err = SettingsSource::from_cwd("/").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn find_project_file_prefers_yml() {
        let actual = find_project_file(&fixture("site"), &SETTINGS_FILE_NAMES).unwrap();
        assert_eq!(actual, fixture("site/_site.yml"));
    }

    #[test]
    fn format_from_path() {
        assert_eq!(Format::from_path(path::Path::new("a.toml")), Format::Toml);
        assert_eq!(Format::from_path(path::Path::new("a.json")), Format::Json);
        assert_eq!(Format::from_path(path::Path::new("settings")), Format::Yaml);
        assert_eq!("yml".parse::<Format>().unwrap(), Format::Yaml);
        assert!("ini".parse::<Format>().is_err());
    }
}
