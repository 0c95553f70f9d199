// productos_api/src/web/handlers/producto_handlers.rs

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::application::{
  CreateProductoCommand, DeleteProductoCommand, GetProductoByIdQuery, GetProductosQuery, PatchProductoCommand,
  UpdateProductoCommand,
};
use crate::errors::{AppError, Result as AppResult};
use crate::state::AppState;
use crate::web::routes::{GET_PRODUCTO_BY_ID_ROUTE, PRODUCTOS_PATH};

const LIST_FAILED: &str = "Error interno al procesar la lista";
const GET_FAILED: &str = "Error al consultar el producto";
const CREATE_FAILED: &str = "Error al crear el producto. Verifique si el código ya existe.";
const UPDATE_FAILED: &str = "Error al actualizar el producto";
const PATCH_FAILED: &str = "Error parcial al actualizar";
const DELETE_FAILED: &str = "Error al eliminar el producto";

// --- Request bodies ---

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct CreateProductoRequest {
  pub codigo: String,
  pub nombre: String,
  pub descripcion: Option<String>,
  pub precio: Decimal,
  pub activo: bool,
  pub categoria_id: i32,
}

/// Full replacement. A missing or null `Descripcion` is stored as `""`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateProductoRequest {
  pub codigo: String,
  pub nombre: String,
  pub descripcion: Option<String>,
  pub precio: Decimal,
  pub activo: bool,
  pub categoria_id: i32,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct PatchProductoRequest {
  pub codigo: Option<String>,
  pub nombre: Option<String>,
  /// Distinguishes an absent key from an explicit `null`, which clears the field.
  #[serde(default, deserialize_with = "present_or_null")]
  pub descripcion: Option<Option<String>>,
  pub precio: Option<Decimal>,
  pub activo: Option<bool>,
  pub categoria_id: Option<i32>,
}

fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}

fn require_text(field: &str, value: &str) -> AppResult<()> {
  if value.trim().is_empty() {
    return Err(AppError::Validation(format!("El campo {} es obligatorio.", field)));
  }
  Ok(())
}

impl CreateProductoRequest {
  fn validate(&self) -> AppResult<()> {
    require_text("Codigo", &self.codigo)?;
    require_text("Nombre", &self.nombre)
  }
}

impl UpdateProductoRequest {
  fn validate(&self) -> AppResult<()> {
    require_text("Codigo", &self.codigo)?;
    require_text("Nombre", &self.nombre)
  }
}

impl PatchProductoRequest {
  // Only fields that are present are checked.
  fn validate(&self) -> AppResult<()> {
    if let Some(codigo) = &self.codigo {
      require_text("Codigo", codigo)?;
    }
    if let Some(nombre) = &self.nombre {
      require_text("Nombre", nombre)?;
    }
    Ok(())
  }
}

impl From<CreateProductoRequest> for CreateProductoCommand {
  fn from(body: CreateProductoRequest) -> Self {
    Self {
      codigo: body.codigo,
      nombre: body.nombre,
      descripcion: body.descripcion,
      precio: body.precio,
      activo: body.activo,
      categoria_id: body.categoria_id,
    }
  }
}

impl UpdateProductoRequest {
  fn into_command(self, id: i32) -> UpdateProductoCommand {
    UpdateProductoCommand {
      id,
      codigo: self.codigo,
      nombre: self.nombre,
      descripcion: self.descripcion.unwrap_or_default(),
      precio: self.precio,
      activo: self.activo,
      categoria_id: self.categoria_id,
    }
  }
}

impl PatchProductoRequest {
  fn into_command(self, id: i32) -> PatchProductoCommand {
    PatchProductoCommand {
      id,
      codigo: self.codigo,
      nombre: self.nombre,
      descripcion: self.descripcion,
      precio: self.precio,
      activo: self.activo,
      categoria_id: self.categoria_id,
    }
  }
}

// --- Handlers ---

#[instrument(name = "handler::get_productos", skip(app_state))]
pub async fn get_productos_handler(app_state: web::Data<AppState>) -> AppResult<HttpResponse> {
  info!("Listing productos.");
  let started = Instant::now();

  let productos = app_state
    .dispatcher
    .send(GetProductosQuery)
    .await
    .map_err(|e| e.into_public(LIST_FAILED))?;

  info!(
    count = productos.len(),
    elapsed_ms = started.elapsed().as_millis() as u64,
    "Productos listed."
  );

  if productos.is_empty() {
    warn!("No productos found.");
    return Ok(HttpResponse::NoContent().finish());
  }
  Ok(HttpResponse::Ok().json(productos))
}

#[instrument(name = "handler::get_producto_by_id", skip(app_state, path), fields(producto_id = *path.as_ref()))]
pub async fn get_producto_by_id_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i32>,
) -> AppResult<HttpResponse> {
  let id = path.into_inner();

  let found = app_state
    .dispatcher
    .send(GetProductoByIdQuery { id })
    .await
    .map_err(|e| e.into_public(GET_FAILED))?;

  match found {
    Some(producto) => Ok(HttpResponse::Ok().json(producto)),
    None => {
      warn!("Producto with ID {} not found.", id);
      Err(AppError::NotFound(format!("Producto with ID {} not found.", id)))
    }
  }
}

#[instrument(name = "handler::create_producto", skip(req, app_state, payload), fields(codigo = %payload.codigo))]
pub async fn create_producto_handler(
  req: HttpRequest,
  app_state: web::Data<AppState>,
  payload: web::Json<CreateProductoRequest>,
) -> AppResult<HttpResponse> {
  let body = payload.into_inner();
  body.validate()?;

  let created = app_state
    .dispatcher
    .send(CreateProductoCommand::from(body))
    .await
    .map_err(|e| e.into_public(CREATE_FAILED))?;

  info!(producto_id = created.id, "Producto created.");

  let location = req
    .url_for(GET_PRODUCTO_BY_ID_ROUTE, [created.id.to_string()])
    .map(|url| url.to_string())
    .unwrap_or_else(|_| format!("{}/{}", PRODUCTOS_PATH, created.id));

  Ok(
    HttpResponse::Created()
      .insert_header((header::LOCATION, location))
      .json(created),
  )
}

#[instrument(name = "handler::update_producto", skip(app_state, path, payload), fields(producto_id = *path.as_ref()))]
pub async fn update_producto_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i32>,
  payload: web::Json<UpdateProductoRequest>,
) -> AppResult<HttpResponse> {
  let id = path.into_inner();
  let body = payload.into_inner();
  body.validate()?;

  let updated = app_state
    .dispatcher
    .send(body.into_command(id))
    .await
    .map_err(|e| e.into_public(UPDATE_FAILED))?;

  match updated {
    Some(producto) => {
      info!("Producto {} updated.", id);
      Ok(HttpResponse::Ok().json(producto))
    }
    None => {
      warn!("Producto with ID {} not found for update.", id);
      Err(AppError::NotFound(format!("Producto with ID {} not found.", id)))
    }
  }
}

#[instrument(name = "handler::patch_producto", skip(app_state, path, payload), fields(producto_id = *path.as_ref()))]
pub async fn patch_producto_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i32>,
  payload: web::Json<PatchProductoRequest>,
) -> AppResult<HttpResponse> {
  let id = path.into_inner();
  let body = payload.into_inner();
  body.validate()?;

  let patched = app_state
    .dispatcher
    .send(body.into_command(id))
    .await
    .map_err(|e| e.into_public(PATCH_FAILED))?;

  match patched {
    Some(producto) => {
      info!("Producto {} patched.", id);
      Ok(HttpResponse::Ok().json(producto))
    }
    None => {
      warn!("Producto with ID {} not found for patch.", id);
      Err(AppError::NotFound(format!("Producto with ID {} not found.", id)))
    }
  }
}

#[instrument(name = "handler::delete_producto", skip(app_state, path), fields(producto_id = *path.as_ref()))]
pub async fn delete_producto_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i32>,
) -> AppResult<HttpResponse> {
  let id = path.into_inner();

  let deleted = app_state
    .dispatcher
    .send(DeleteProductoCommand { id })
    .await
    .map_err(|e| e.into_public(DELETE_FAILED))?;

  if deleted {
    info!("Producto {} deleted.", id);
    Ok(HttpResponse::NoContent().finish())
  } else {
    warn!("Producto with ID {} not found for delete.", id);
    Err(AppError::NotFound(format!("Producto with ID {} not found.", id)))
  }
}
