//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppConfig, DEFAULT_BIND_ADDR, DEFAULT_CORS_ORIGINS};
pub use state_builders::{http_state_in_memory, http_state_with_pool};

use actix_cors::Cors;
use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{web, App, HttpServer};

use crate::domain::Error;
use crate::inbound::http::checklists::{
    create_checklist, list_checklists, search_checklists, update_detail,
};
use crate::inbound::http::greeting::greet;
use crate::inbound::http::products::{
    create_product, get_product, list_custom_products, list_products,
};
use crate::inbound::http::settings::{add_setting, delete_setting, list_settings};
use crate::inbound::http::users::{change_mode, list_users, login};
use crate::inbound::http::HttpState;
use crate::middleware::RequestLog;

fn cors_for(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .supports_credentials();
    for origin in origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}

/// Keep body deserialisation failures on the flat `{"error": ...}` shape.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| Error::invalid_request(err.to_string()).into())
}

/// Assemble the application with all routes and middleware.
///
/// Public so integration tests can run the full HTTP surface in-process.
pub fn build_app(
    http_state: web::Data<HttpState>,
    cors_origins: &[String],
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(http_state)
        .app_data(json_config())
        .wrap(cors_for(cors_origins))
        .wrap(RequestLog)
        .service(greet)
        .service(login)
        .service(list_users)
        .service(change_mode)
        .service(list_products)
        .service(get_product)
        .service(create_product)
        .service(list_custom_products)
        .service(list_checklists)
        .service(create_checklist)
        .service(update_detail)
        .service(search_checklists)
        .service(list_settings)
        .service(add_setting)
        .service(delete_setting)
}

/// Construct the Actix HTTP server bound to the configured address.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(http_state: web::Data<HttpState>, config: &AppConfig) -> std::io::Result<Server> {
    let origins = config.cors_origins.clone();
    let server = HttpServer::new(move || build_app(http_state.clone(), &origins))
        .bind(config.bind_addr)?
        .run();
    Ok(server)
}
