use std::path;

/// Failure to produce a [`SiteConfiguration`][crate::SiteConfiguration].
///
/// None of these are recoverable by retrying; the settings source has to be fixed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Failed to read config `{}`", path.display())]
    Read {
        path: path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No settings file found in `{}` or any parent directory", dir.display())]
    NotFound { dir: path::PathBuf },

    #[error("Failed to parse config `{origin}`: {message}")]
    Parse { origin: String, message: String },

    #[error("Missing required field `{field}`")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to serialize config: {message}")]
    Serialize { message: String },
}

impl Error {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(origin: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: err.to_string(),
        }
    }

    /// The setting this error is about, when it is about one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { field } => Some(field),
            Self::InvalidValue { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_field_names_field() {
        let err = Error::MissingRequiredField { field: "author" };
        assert_eq!(err.to_string(), "Missing required field `author`");
        assert_eq!(err.field(), Some("author"));
    }

    #[test]
    fn invalid_value_names_field() {
        let err = Error::invalid("pagination_size", "must be a positive integer");
        assert_eq!(
            err.to_string(),
            "Invalid value for `pagination_size`: must be a positive integer"
        );
        assert_eq!(err.field(), Some("pagination_size"));
    }

    #[test]
    fn read_error_has_no_field() {
        let err = Error::Read {
            path: "_site.yml".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.field(), None);
        assert!(err.to_string().contains("_site.yml"));
    }
}
