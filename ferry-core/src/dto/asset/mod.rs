//! Asset DTOs

use serde::{Deserialize, Serialize};

use crate::domain::asset::{AssetType, AssetValue};

/// Body of `POST /api/akabot/assets`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetAssetBody {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub asset_type: Option<AssetType>,
    pub value: Option<String>,
}

/// Query of `GET /api/akabot/assets`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetQuery {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetResponse {
    pub ok: bool,
    pub mock: bool,
    pub asset: AssetValue,
}
