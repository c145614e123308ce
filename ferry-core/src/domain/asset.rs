//! Asset domain types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named orchestrator-managed value
///
/// The payload is always string-encoded, whatever the declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetValue {
    pub name: String,
    #[serde(rename = "type", default)]
    pub asset_type: AssetType,
    pub value: String,
}

impl AssetValue {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            asset_type: AssetType::Text,
            value: value.into(),
        }
    }
}

/// Declared type of an asset value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    #[default]
    Text,
    Integer,
    Bool,
    Credential,
}

impl AssetType {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetType::Text => "Text",
            AssetType::Integer => "Integer",
            AssetType::Bool => "Bool",
            AssetType::Credential => "Credential",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Text" => Ok(AssetType::Text),
            "Integer" => Ok(AssetType::Integer),
            "Bool" => Ok(AssetType::Bool),
            "Credential" => Ok(AssetType::Credential),
            other => Err(format!("unknown asset type '{}'", other)),
        }
    }
}
