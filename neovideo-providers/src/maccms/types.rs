//! MacCMS source settings

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProviderClientError;

/// Wire format a MacCMS endpoint answers in (`resp_type` of a source).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseFormat {
    type Err = ProviderClientError;

    /// An empty tag means JSON, the MacCMS default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            other => Err(ProviderClientError::InvalidConfig(format!(
                "unknown response format '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_format() {
        assert_eq!("json".parse::<ResponseFormat>().unwrap(), ResponseFormat::Json);
        assert_eq!(" JSON ".parse::<ResponseFormat>().unwrap(), ResponseFormat::Json);
        assert_eq!("".parse::<ResponseFormat>().unwrap(), ResponseFormat::Json);
        assert_eq!("xml".parse::<ResponseFormat>().unwrap(), ResponseFormat::Xml);
        assert!(matches!(
            "yaml".parse::<ResponseFormat>(),
            Err(ProviderClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_display_round_trips_tag() {
        assert_eq!(ResponseFormat::Xml.to_string(), "xml");
        assert_eq!(ResponseFormat::Json.as_str(), "json");
    }
}
