//! Binding kinds

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The wire protocol a binding talks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingType {
    AtomPub,
    WebServices,
    Browser,
    Local,
    Custom,
}

impl BindingType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AtomPub => "atompub",
            Self::WebServices => "webservices",
            Self::Browser => "browser",
            Self::Local => "local",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for BindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BindingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atompub" => Ok(Self::AtomPub),
            "webservices" => Ok(Self::WebServices),
            "browser" => Ok(Self::Browser),
            "local" => Ok(Self::Local),
            "custom" => Ok(Self::Custom),
            other => Err(Error::configuration(format!(
                "unknown binding type: {other}"
            ))),
        }
    }
}
