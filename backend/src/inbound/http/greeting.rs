//! Root greeting handler.

use actix_web::{get, HttpResponse};

/// Plain-text liveness greeting at the root path.
#[get("/")]
pub async fn greet() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Hello, World!")
}
