// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use actix_web::test::TestRequest;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use productos_api::db::{InMemoryProductoRepository, ProductoRepository, SharedProductoRepository};
use productos_api::errors::{AppError, Result};
use productos_api::models::{NewProducto, Producto};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::Level;

pub const PRODUCTOS: &str = "/v1/api/productos";

static TRACING: Lazy<()> = Lazy::new(|| {
  let _ = tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING);
}

/// Builds the actix test service over the given gateway.
macro_rules! productos_app {
  ($repository:expr) => {{
    $crate::common::setup_tracing();
    let state = productos_api::state::AppState::new($repository).expect("handlers register");
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new(state))
        .configure(productos_api::web::configure_app_routes),
    )
    .await
  }};
}

pub fn in_memory() -> SharedProductoRepository {
  Arc::new(InMemoryProductoRepository::new())
}

pub fn producto_body(codigo: &str) -> Value {
  json!({
    "Codigo": codigo,
    "Nombre": "Widget",
    "Descripcion": "Un widget",
    "Precio": 9.99,
    "Activo": true,
    "CategoriaId": 1
  })
}

pub fn create_request(codigo: &str) -> TestRequest {
  TestRequest::post().uri(PRODUCTOS).set_json(producto_body(codigo))
}

pub fn item_uri(id: i32) -> String {
  format!("{}/{}", PRODUCTOS, id)
}

/// Gateway whose every call fails with an internal detail that must never be
/// shown to clients.
pub struct BrokenRepository;

pub const BROKEN_DETAIL: &str = "connection refused by 10.1.2.3:5432";

fn broken<T>() -> Result<T> {
  Err(AppError::Internal(BROKEN_DETAIL.to_string()))
}

#[async_trait]
impl ProductoRepository for BrokenRepository {
  async fn find_all(&self) -> Result<Vec<Producto>> {
    broken()
  }

  async fn find_by_id(&self, _id: i32) -> Result<Option<Producto>> {
    broken()
  }

  async fn insert(&self, _producto: NewProducto) -> Result<Producto> {
    broken()
  }

  async fn update(&self, _producto: &Producto) -> Result<Option<Producto>> {
    broken()
  }

  async fn delete(&self, _id: i32) -> Result<bool> {
    broken()
  }
}
