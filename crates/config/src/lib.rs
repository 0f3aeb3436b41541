//! Typed, validated settings for a static site.
//!
//! A settings file is parsed into a [`SettingsSource`], resolved against an optional profile and
//! validated into an immutable [`SiteConfiguration`].

mod code_block;
mod config;
mod error;
mod extras;
mod feeds;
mod link;
mod raw;
mod source;
mod value;

pub use self::code_block::*;
pub use self::config::*;
pub use self::error::*;
pub use self::extras::{
    ChangeFrequency, SeoOptions, SiteMetadataExtras, Sitemap, SitemapFormat, SitemapTable,
};
pub use self::feeds::{FeedKind, FeedSettings};
pub use self::link::Link;
pub use self::source::*;
pub use self::value::*;

use self::link::{check_absolute_url, validate_links};

type Result<T, E = Error> = std::result::Result<T, E>;
