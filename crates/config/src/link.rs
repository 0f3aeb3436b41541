use super::*;

/// A labelled external link, written as a `[label, url]` pair.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Link {
    label: String,
    url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl From<(String, String)> for Link {
    fn from((label, url): (String, String)) -> Self {
        Self { label, url }
    }
}

impl From<Link> for (String, String) {
    fn from(link: Link) -> Self {
        (link.label, link.url)
    }
}

pub(crate) fn validate_links(field: &str, links: &[Link]) -> Result<()> {
    for (i, link) in links.iter().enumerate() {
        let field = format!("{field}[{i}]");
        if link.label.trim().is_empty() {
            return Err(Error::invalid(field, "label must not be empty"));
        }
        check_absolute_url(&field, &link.url)?;
    }
    Ok(())
}

pub(crate) fn check_absolute_url(field: &str, value: &str) -> Result<url::Url> {
    url::Url::parse(value).map_err(|e| Error::invalid(field, format!("`{value}` is not a URL: {e}")))
}
