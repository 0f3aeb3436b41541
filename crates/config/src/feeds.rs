use std::collections::BTreeMap;
use std::fmt;

use super::*;

/// A feed the generator can emit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeedKind {
    AllAtom,
    AllRss,
    CategoryAtom,
    CategoryRss,
    TranslationAtom,
    TranslationRss,
    AuthorAtom,
    AuthorRss,
    TagAtom,
    TagRss,
}

impl FeedKind {
    pub const ALL: [FeedKind; 10] = [
        FeedKind::AllAtom,
        FeedKind::AllRss,
        FeedKind::CategoryAtom,
        FeedKind::CategoryRss,
        FeedKind::TranslationAtom,
        FeedKind::TranslationRss,
        FeedKind::AuthorAtom,
        FeedKind::AuthorRss,
        FeedKind::TagAtom,
        FeedKind::TagRss,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FeedKind::AllAtom => "all_atom",
            FeedKind::AllRss => "all_rss",
            FeedKind::CategoryAtom => "category_atom",
            FeedKind::CategoryRss => "category_rss",
            FeedKind::TranslationAtom => "translation_atom",
            FeedKind::TranslationRss => "translation_rss",
            FeedKind::AuthorAtom => "author_atom",
            FeedKind::AuthorRss => "author_rss",
            FeedKind::TagAtom => "tag_atom",
            FeedKind::TagRss => "tag_rss",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FeedKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FeedKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| Error::invalid(format!("feed_settings.{s}"), "unknown feed type"))
    }
}

/// `feed_settings` as written; a `None` or empty path disables the feed.
pub(crate) type RawFeeds = BTreeMap<String, Option<String>>;

/// Output path per enabled feed.  Feeds not listed are disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSettings {
    feeds: BTreeMap<FeedKind, String>,
}

impl FeedSettings {
    pub(crate) fn from_raw(raw: RawFeeds) -> Result<Self> {
        let mut feeds = BTreeMap::new();
        for (key, path) in raw {
            let kind: FeedKind = key.parse()?;
            let Some(path) = path.filter(|p| !p.trim().is_empty()) else {
                continue;
            };
            if path.starts_with('/') || path.starts_with('\\') {
                return Err(Error::invalid(
                    format!("feed_settings.{kind}"),
                    format!("`{path}` must be relative to the output directory"),
                ));
            }
            feeds.insert(kind, path);
        }
        Ok(Self { feeds })
    }

    pub fn get(&self, kind: FeedKind) -> Option<&str> {
        self.feeds.get(&kind).map(String::as_str)
    }

    pub fn is_enabled(&self, kind: FeedKind) -> bool {
        self.feeds.contains_key(&kind)
    }

    /// Enabled feeds in [`FeedKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (FeedKind, &str)> + '_ {
        self.feeds.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}

impl serde::Serialize for FeedSettings {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.feeds.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn raw(yaml: &str) -> RawFeeds {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn absent_null_and_empty_disable() {
        let feeds = FeedSettings::from_raw(raw(
            "all_atom: feeds/all.atom.xml\ncategory_atom: ~\nauthor_rss: ''\n",
        ))
        .unwrap();
        assert_eq!(feeds.get(FeedKind::AllAtom), Some("feeds/all.atom.xml"));
        assert!(!feeds.is_enabled(FeedKind::CategoryAtom));
        assert!(!feeds.is_enabled(FeedKind::AuthorRss));
        assert!(!feeds.is_enabled(FeedKind::TagRss));
        assert_eq!(feeds.iter().count(), 1);
    }

    #[test]
    fn absolute_path_rejected() {
        let err = FeedSettings::from_raw(raw("tag_rss: /feeds/tags.xml\n")).unwrap_err();
        assert_eq!(err.field(), Some("feed_settings.tag_rss"));
    }

    #[test]
    fn unknown_feed_rejected() {
        let err = FeedSettings::from_raw(raw("podcast: feeds/pod.xml\n")).unwrap_err();
        assert_eq!(err.field(), Some("feed_settings.podcast"));
    }

    #[test]
    fn iter_follows_declaration_order() {
        let feeds = FeedSettings::from_raw(raw(
            "tag_atom: feeds/{slug}.tag.atom.xml\nall_atom: feeds/all.atom.xml\n",
        ))
        .unwrap();
        let kinds: Vec<_> = feeds.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![FeedKind::AllAtom, FeedKind::TagAtom]);
    }
}
