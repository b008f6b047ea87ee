//! Checklist API handlers.
//!
//! ```text
//! GET /checklists
//! POST /create-checklist {"jancodes":["4901234567890"]}
//! POST /update-product {"checklistId":1,"jancode":"4901234567890","dateline":"2026-09-01"}
//! GET /search-checklists
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    ApiResult, ChecklistOverview, CreatedChecklist, Error, JanCode, SampledProduct,
};
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::present;

/// List the caller's checklists with their details.
#[get("/checklists")]
pub async fn list_checklists(
    identity: Identity,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ChecklistOverview>>> {
    Ok(web::Json(state.checklists.list(&identity.username).await?))
}

#[derive(Deserialize)]
pub struct CreateChecklistRequest {
    pub jancodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct CreateChecklistResponse {
    pub success: bool,
    pub data: CreatedChecklist,
}

/// Create a checklist from a batch of barcodes.
#[post("/create-checklist")]
pub async fn create_checklist(
    identity: Identity,
    state: web::Data<HttpState>,
    payload: web::Json<CreateChecklistRequest>,
) -> ApiResult<web::Json<CreateChecklistResponse>> {
    let codes = payload.into_inner().jancodes.unwrap_or_default();
    let jancodes: Vec<JanCode> = codes
        .into_iter()
        .map(JanCode::new)
        .collect::<Result<_, _>>()
        .map_err(|_| Error::invalid_request("jancodes must be a non-empty array"))?;

    let data = state
        .checklists
        .create(&identity.username, jancodes)
        .await?;
    Ok(web::Json(CreateChecklistResponse {
        success: true,
        data,
    }))
}

/// Update request. `checklistId` is accepted as either a JSON number or a
/// numeric string, matching existing clients.
#[derive(Deserialize)]
pub struct UpdateDetailRequest {
    #[serde(rename = "checklistId")]
    pub checklist_id: Option<serde_json::Value>,
    pub jancode: Option<String>,
    pub dateline: Option<String>,
}

fn checklist_id_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) if !text.is_empty() => Some(text),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Record a dateline on one checklist detail.
#[post("/update-product")]
pub async fn update_detail(
    _identity: Identity,
    state: web::Data<HttpState>,
    payload: web::Json<UpdateDetailRequest>,
) -> ApiResult<HttpResponse> {
    let UpdateDetailRequest {
        checklist_id,
        jancode,
        dateline,
    } = payload.into_inner();
    let missing = || Error::invalid_request("checklistId, jancode, and dateline are required");
    let id_text = checklist_id.and_then(checklist_id_text).ok_or_else(missing)?;
    let jancode = JanCode::new(present(jancode).ok_or_else(missing)?).map_err(|_| missing())?;
    let dateline = present(dateline).ok_or_else(missing)?;

    state
        .checklists
        .update_detail(&id_text, &jancode, &dateline)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Sample random catalog products for an ad-hoc spot check.
#[get("/search-checklists")]
pub async fn search_checklists(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<SampledProduct>>> {
    Ok(web::Json(state.checklists.sample_random().await?))
}
