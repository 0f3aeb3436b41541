use std::collections::BTreeMap;

use super::*;
use crate::raw::{merge_map, non_empty};

const ARTICLES: &str = "articles";
const INDEXES: &str = "indexes";
const PAGES: &str = "pages";
const CONTENT_TYPES: [&str; 3] = [ARTICLES, INDEXES, PAGES];

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub(crate) struct RawExtras {
    pub(crate) disclaimer: Option<String>,
    pub(crate) thumbnail: Option<String>,
    pub(crate) analytics_tracking_id: Option<String>,
    pub(crate) site_verification: Option<String>,
    pub(crate) seo: Option<RawSeo>,
    pub(crate) sitemap: Option<RawSitemap>,
    #[serde(flatten)]
    pub(crate) other: BTreeMap<String, serde_json::Value>,
}

impl RawExtras {
    pub(crate) fn merge(self, other: Self) -> Self {
        let RawExtras {
            disclaimer,
            thumbnail,
            analytics_tracking_id,
            site_verification,
            seo,
            sitemap,
            other: rest,
        } = self;
        Self {
            disclaimer: disclaimer.or(other.disclaimer),
            thumbnail: thumbnail.or(other.thumbnail),
            analytics_tracking_id: analytics_tracking_id.or(other.analytics_tracking_id),
            site_verification: site_verification.or(other.site_verification),
            seo: match (seo, other.seo) {
                (Some(s), Some(o)) => Some(s.merge(o)),
                (s, o) => s.or(o),
            },
            sitemap: match (sitemap, other.sitemap) {
                (Some(s), Some(o)) => Some(s.merge(o)),
                (s, o) => s.or(o),
            },
            other: merge_map(Some(rest), Some(other.other)).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RawSeo {
    pub(crate) report: Option<bool>,
    pub(crate) enhancer: Option<bool>,
    pub(crate) open_graph: Option<bool>,
    pub(crate) twitter_cards: Option<bool>,
}

impl RawSeo {
    fn merge(self, other: Self) -> Self {
        Self {
            report: self.report.or(other.report),
            enhancer: self.enhancer.or(other.enhancer),
            open_graph: self.open_graph.or(other.open_graph),
            twitter_cards: self.twitter_cards.or(other.twitter_cards),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RawSitemap {
    pub(crate) format: Option<SitemapFormat>,
    pub(crate) priorities: Option<BTreeMap<String, f64>>,
    pub(crate) changefreqs: Option<BTreeMap<String, ChangeFrequency>>,
}

impl RawSitemap {
    fn merge(self, other: Self) -> Self {
        Self {
            format: self.format.or(other.format),
            priorities: merge_map(self.priorities, other.priorities),
            changefreqs: merge_map(self.changefreqs, other.changefreqs),
        }
    }
}

/// Supplementary site metadata consumed by theme and plugins.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct SiteMetadataExtras {
    #[serde(skip_serializing_if = "Option::is_none")]
    disclaimer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    analytics_tracking_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    site_verification: Option<String>,
    #[serde(skip_serializing_if = "SeoOptions::is_default")]
    seo: SeoOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    sitemap: Option<Sitemap>,
    #[serde(flatten)]
    other: BTreeMap<String, OptionValue>,
}

impl SiteMetadataExtras {
    pub(crate) fn from_raw(raw: RawExtras) -> Result<Self> {
        let RawExtras {
            disclaimer,
            thumbnail,
            analytics_tracking_id,
            site_verification,
            seo,
            sitemap,
            other,
        } = raw;

        let thumbnail = non_empty(thumbnail);
        if let Some(thumbnail) = &thumbnail {
            check_absolute_url("site_metadata_extras.thumbnail", thumbnail)?;
        }
        let seo = seo.map(SeoOptions::from_raw).unwrap_or_default();
        let sitemap = sitemap.map(Sitemap::from_raw).transpose()?;
        let mut scalars = BTreeMap::new();
        for (key, value) in other {
            if let Some(value) = other_value(&key, value)? {
                scalars.insert(key, value);
            }
        }

        Ok(Self {
            disclaimer: non_empty(disclaimer),
            thumbnail,
            analytics_tracking_id: non_empty(analytics_tracking_id),
            site_verification: non_empty(site_verification),
            seo,
            sitemap,
            other: scalars,
        })
    }

    pub fn disclaimer(&self) -> Option<&str> {
        self.disclaimer.as_deref()
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    pub fn analytics_tracking_id(&self) -> Option<&str> {
        self.analytics_tracking_id.as_deref()
    }

    pub fn site_verification(&self) -> Option<&str> {
        self.site_verification.as_deref()
    }

    pub fn seo(&self) -> &SeoOptions {
        &self.seo
    }

    pub fn sitemap(&self) -> Option<&Sitemap> {
        self.sitemap.as_ref()
    }

    /// Unrecognized entries, kept apart from the typed settings.
    pub fn other(&self) -> &BTreeMap<String, OptionValue> {
        &self.other
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A null entry is dropped, so a profile can unset an extra the base declared.
fn other_value(key: &str, value: serde_json::Value) -> Result<Option<OptionValue>> {
    use serde_json::Value;

    let value = match value {
        Value::Null => return Ok(None),
        Value::Bool(b) => Some(OptionValue::Bool(b)),
        Value::Number(n) => n
            .as_i64()
            .map(OptionValue::Integer)
            .or_else(|| n.as_f64().map(OptionValue::Float)),
        Value::String(s) => Some(OptionValue::String(s)),
        Value::Array(_) | Value::Object(_) => None,
    };
    value.map(Some).ok_or_else(|| {
        Error::invalid(
            format!("site_metadata_extras.{key}"),
            "must be a string, number or boolean",
        )
    })
}

/// SEO plugin feature toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct SeoOptions {
    pub report: bool,
    pub enhancer: bool,
    pub open_graph: bool,
    pub twitter_cards: bool,
}

impl SeoOptions {
    fn from_raw(raw: RawSeo) -> Self {
        Self {
            report: raw.report.unwrap_or(false),
            enhancer: raw.enhancer.unwrap_or(false),
            open_graph: raw.open_graph.unwrap_or(false),
            twitter_cards: raw.twitter_cards.unwrap_or(false),
        }
    }

    pub fn any(&self) -> bool {
        self.report || self.enhancer || self.open_graph || self.twitter_cards
    }

    fn is_default(&self) -> bool {
        !self.any()
    }
}

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SitemapFormat {
    #[default]
    Xml,
    Txt,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

/// One value per recognized content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SitemapTable<T> {
    pub articles: T,
    pub indexes: T,
    pub pages: T,
}

impl<T> SitemapTable<T> {
    fn from_map(field: &str, mut map: BTreeMap<String, T>) -> Result<Self> {
        if let Some(unknown) = map.keys().find(|k| !CONTENT_TYPES.contains(&k.as_str())) {
            return Err(Error::invalid(
                field,
                format!("unknown content type `{unknown}`, expected one of articles, indexes, pages"),
            ));
        }
        let mut take = |key: &str| {
            map.remove(key)
                .ok_or_else(|| Error::invalid(field, format!("missing content type `{key}`")))
        };
        Ok(Self {
            articles: take(ARTICLES)?,
            indexes: take(INDEXES)?,
            pages: take(PAGES)?,
        })
    }
}

/// Sitemap plugin settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Sitemap {
    pub format: SitemapFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priorities: Option<SitemapTable<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changefreqs: Option<SitemapTable<ChangeFrequency>>,
}

impl Sitemap {
    fn from_raw(raw: RawSitemap) -> Result<Self> {
        let priorities = raw
            .priorities
            .map(|p| SitemapTable::from_map("site_metadata_extras.sitemap.priorities", p))
            .transpose()?;
        if let Some(p) = &priorities {
            for (key, value) in [(ARTICLES, p.articles), (INDEXES, p.indexes), (PAGES, p.pages)] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(Error::invalid(
                        format!("site_metadata_extras.sitemap.priorities.{key}"),
                        format!("{value} is outside 0.0..=1.0"),
                    ));
                }
            }
        }
        let changefreqs = raw
            .changefreqs
            .map(|c| SitemapTable::from_map("site_metadata_extras.sitemap.changefreqs", c))
            .transpose()?;
        Ok(Self {
            format: raw.format.unwrap_or_default(),
            priorities,
            changefreqs,
        })
    }
}
