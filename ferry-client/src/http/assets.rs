//! Asset-related orchestrator endpoints

use ferry_core::domain::asset::AssetValue;
use reqwest::Method;
use serde_json::json;

use super::HttpBackend;
use super::odata::{Collection, ODataAsset, asset_filter_expression};
use crate::error::{GatewayError, Result};

impl HttpBackend {
    pub(super) async fn write_asset(&self, asset: &AssetValue) -> Result<()> {
        let response = self
            .request(Method::POST, "/odata/Assets")
            .json(&json!({
                "Name": asset.name,
                "ValueType": asset.asset_type.as_str(),
                "Value": asset.value,
            }))
            .send()
            .await?;

        self.handle_empty_response(response).await?;
        tracing::debug!("Asset {} written", asset.name);
        Ok(())
    }

    /// Reads an asset by exact name; an empty result set means not found
    pub(super) async fn read_asset(&self, name: &str) -> Result<AssetValue> {
        let response = self
            .request(Method::GET, "/odata/Assets")
            .query(&[("$filter", asset_filter_expression(name))])
            .send()
            .await?;
        let assets: Collection<ODataAsset> = self.handle_response(response, None).await?;

        assets
            .value
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::NotFound(format!("Asset not found: {}", name)))?
            .into_asset()
    }
}
