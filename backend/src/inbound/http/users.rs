//! User API handlers.
//!
//! ```text
//! POST /login {"username":"alice","password":"pw123"}
//! GET /all-user
//! POST /change-mode {"username":"alice"}
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{ApiResult, Error, User};
use crate::inbound::http::state::HttpState;

/// Treat absent and empty fields alike, as existing clients expect.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// Login request body. Fields are optional so a missing field is reported as
/// validation, not as a deserialisation failure.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Login response: the user record with the issued bearer token attached.
#[derive(Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

/// Authenticate a user and issue a bearer token.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginRequest { username, password } = payload.into_inner();
    let (Some(username), Some(password)) = (present(username), present(password)) else {
        return Err(Error::invalid_request("Username and password are required"));
    };
    let (user, token) = state.accounts.login(&username, &password).await?;
    Ok(web::Json(LoginResponse { user, token }))
}

/// List every account, passwords stripped.
#[get("/all-user")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.accounts.list_all().await?))
}

#[derive(Deserialize)]
pub struct ChangeModeRequest {
    pub username: Option<String>,
}

/// Flip a user's mode flag and return the updated record.
#[post("/change-mode")]
pub async fn change_mode(
    state: web::Data<HttpState>,
    payload: web::Json<ChangeModeRequest>,
) -> ApiResult<HttpResponse> {
    let Some(username) = present(payload.into_inner().username) else {
        return Err(Error::invalid_request("Username is required"));
    };
    let user = state.accounts.toggle_mode(&username).await?;
    Ok(HttpResponse::Ok().json(user))
}
