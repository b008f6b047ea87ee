//! OCR settings API handlers.
//!
//! ```text
//! GET /settings-ocr
//! POST /settings-ocr {"value":"lang=jpn"}
//! POST /delete-settings-ocr {"id":"<uuid>"}
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{ApiResult, Error, OcrSetting};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::present;

/// List every stored OCR setting.
#[get("/settings-ocr")]
pub async fn list_settings(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<OcrSetting>>> {
    Ok(web::Json(state.settings.list().await?))
}

#[derive(Deserialize)]
pub struct AddSettingRequest {
    pub value: Option<String>,
}

/// Store a new OCR setting value.
#[post("/settings-ocr")]
pub async fn add_setting(
    state: web::Data<HttpState>,
    payload: web::Json<AddSettingRequest>,
) -> ApiResult<web::Json<OcrSetting>> {
    let Some(value) = present(payload.into_inner().value) else {
        return Err(Error::invalid_request("Value is required"));
    };
    Ok(web::Json(state.settings.add(value).await?))
}

#[derive(Deserialize)]
pub struct DeleteSettingRequest {
    pub id: Option<String>,
}

/// Delete one OCR setting by identifier.
#[post("/delete-settings-ocr")]
pub async fn delete_setting(
    state: web::Data<HttpState>,
    payload: web::Json<DeleteSettingRequest>,
) -> ApiResult<HttpResponse> {
    let Some(id) = present(payload.into_inner().id) else {
        return Err(Error::invalid_request("id is required"));
    };
    let id = Uuid::parse_str(&id).map_err(|_| Error::invalid_request("id is invalid"))?;
    state.settings.remove(id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
