//! Asset API Handlers

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection, rejection::QueryRejection},
};
use ferry_core::domain::asset::AssetValue;
use ferry_core::dto::AckResponse;
use ferry_core::dto::asset::{AssetQuery, AssetResponse, SetAssetBody};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// GET /api/akabot/assets?name=
pub async fn get_asset(
    State(state): State<AppState>,
    query: Result<Query<AssetQuery>, QueryRejection>,
) -> ApiResult<Json<AssetResponse>> {
    let Query(query) = query?;
    let name = query
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::BadRequest("name is required".to_string()))?;

    let asset = state.gateway.get_asset(&name).await?;

    Ok(Json(AssetResponse {
        ok: true,
        mock: state.gateway.is_mock(),
        asset,
    }))
}

/// POST /api/akabot/assets
/// Create or overwrite an asset; `type` defaults to Text
pub async fn set_asset(
    State(state): State<AppState>,
    payload: Result<Json<SetAssetBody>, JsonRejection>,
) -> ApiResult<Json<AckResponse>> {
    let Json(body) = payload?;

    let (Some(name), Some(value)) = (body.name, body.value) else {
        return Err(ApiError::BadRequest(
            "name and value are required".to_string(),
        ));
    };

    tracing::info!("Setting asset: {}", name);

    state
        .gateway
        .set_asset(AssetValue {
            name,
            asset_type: body.asset_type.unwrap_or_default(),
            value,
        })
        .await?;

    Ok(Json(AckResponse {
        ok: true,
        mock: state.gateway.is_mock(),
    }))
}
