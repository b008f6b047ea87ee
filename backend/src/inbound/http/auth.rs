//! Bearer-token authentication for HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! credential extraction and verification here. Handlers that need the caller
//! take an [`Identity`] parameter; the extractor rejects unauthenticated
//! requests before the handler body runs.

use std::future::{ready, Ready};

use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};

use super::state::HttpState;
use crate::domain::{Error, Mode};

/// The authenticated caller, derived from the `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub mode: Mode,
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::unauthorized("Token required"))?;
    // Expected shape is `Bearer <token>`; a bare scheme carries no token.
    header
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| Error::unauthorized("Token required"))
}

fn identify(req: &HttpRequest) -> Result<Identity, Error> {
    let token = bearer_token(req)?;
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("Internal server error"))?;
    let claims = state.tokens.verify(token)?;
    let mode =
        Mode::new(claims.mode).map_err(|_| Error::forbidden("Invalid token"))?;
    Ok(Identity {
        username: claims.sub,
        mode,
    })
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(identify(req))
    }
}
