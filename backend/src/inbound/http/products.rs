//! Product catalog API handlers.
//!
//! ```text
//! GET /products
//! GET /product/{jancode}
//! POST /create-product {"jancode":"4901234567890","dateline":"2026-09-01"}
//! GET /custom-products
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{
    ApiResult, CustomProduct, Error, JanCode, Product,
};
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::present;

/// List the full product catalog.
#[get("/products")]
pub async fn list_products(
    _identity: Identity,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Product>>> {
    Ok(web::Json(state.catalog.list_all().await?))
}

/// Fetch one product by barcode.
#[get("/product/{jancode}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Product>> {
    let jancode = JanCode::new(path.into_inner())
        .map_err(|_| Error::not_found("Product not found"))?;
    Ok(web::Json(state.catalog.find(&jancode).await?))
}

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub jancode: Option<String>,
    pub dateline: Option<String>,
}

#[derive(Serialize)]
pub struct CreateProductResponse {
    pub success: bool,
    pub product: Product,
    #[serde(rename = "customProduct")]
    pub custom_product: CustomProduct,
}

/// Register a scanned code that has no master record.
#[post("/create-product")]
pub async fn create_product(
    identity: Identity,
    state: web::Data<HttpState>,
    payload: web::Json<CreateProductRequest>,
) -> ApiResult<web::Json<CreateProductResponse>> {
    let CreateProductRequest { jancode, dateline } = payload.into_inner();
    let (Some(jancode), Some(dateline)) = (present(jancode), present(dateline)) else {
        return Err(Error::invalid_request("jancode and dateline are required"));
    };
    let jancode = JanCode::new(jancode)
        .map_err(|_| Error::invalid_request("jancode and dateline are required"))?;

    let (product, custom_product) = state
        .catalog
        .register_unknown(jancode, &dateline, &identity.username)
        .await?;
    Ok(web::Json(CreateProductResponse {
        success: true,
        product,
        custom_product,
    }))
}

/// List the caller's unknown-code registrations.
#[get("/custom-products")]
pub async fn list_custom_products(
    identity: Identity,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let rows = state.catalog.list_custom(&identity.username).await?;
    Ok(HttpResponse::Ok().json(rows))
}
