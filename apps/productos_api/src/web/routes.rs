// productos_api/src/web/routes.rs

use actix_web::web;

use crate::errors::AppError;
use crate::web::handlers::producto_handlers;

/// Root of the producto resource.
pub const PRODUCTOS_PATH: &str = "/v1/api/productos";

/// Route name used to build the `Location` header after a create.
pub const GET_PRODUCTO_BY_ID_ROUTE: &str = "get_producto_by_id";

// Liveness probe; does not touch the database.
async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Body-binding failures (bad JSON, wrong types, missing fields) answer 400.
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| {
    tracing::warn!(error = %err, "Rejecting malformed request body.");
    AppError::Validation(err.to_string()).into()
  })
}

// This function is called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(json_config())
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope(PRODUCTOS_PATH)
        .service(
          web::resource("")
            .route(web::get().to(producto_handlers::get_productos_handler))
            .route(web::post().to(producto_handlers::create_producto_handler)),
        )
        // `{id}` must parse as i32; anything else fails path extraction with 404.
        .service(
          web::resource("/{id}")
            .name(GET_PRODUCTO_BY_ID_ROUTE)
            .route(web::get().to(producto_handlers::get_producto_by_id_handler))
            .route(web::put().to(producto_handlers::update_producto_handler))
            .route(web::patch().to(producto_handlers::patch_producto_handler))
            .route(web::delete().to(producto_handlers::delete_producto_handler)),
        ),
    );
}
