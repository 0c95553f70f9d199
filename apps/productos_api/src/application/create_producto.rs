// productos_api/src/application/create_producto.rs

use crate::db::SharedProductoRepository;
use crate::errors::{AppError, Result as AppResult};
use crate::models::{NewProducto, ProductoResponse};
use async_trait::async_trait;
use chrono::Utc;
use dispatch::{DispatchResult, Dispatcher, Request, RequestHandler};
use rust_decimal::Decimal;
use tracing::{event, instrument, Level};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductoCommand {
  pub codigo: String,
  pub nombre: String,
  /// Stored as `""` when absent.
  pub descripcion: Option<String>,
  pub precio: Decimal,
  pub activo: bool,
  pub categoria_id: i32,
}

impl Request for CreateProductoCommand {
  type Response = ProductoResponse;
}

pub struct CreateProductoHandler {
  repository: SharedProductoRepository,
}

#[async_trait]
impl RequestHandler<CreateProductoCommand, AppError> for CreateProductoHandler {
  #[instrument(name = "command::create_producto", skip_all, fields(codigo = %command.codigo), err)]
  async fn handle(&self, command: CreateProductoCommand) -> AppResult<ProductoResponse> {
    let nuevo = NewProducto {
      codigo: command.codigo,
      nombre: command.nombre,
      descripcion: command.descripcion.unwrap_or_default(),
      precio: command.precio,
      activo: command.activo,
      categoria_id: command.categoria_id,
      fecha_creacion: Utc::now(),
      cantidad_stock: 0,
    };

    let stored = self.repository.insert(nuevo).await?;
    event!(Level::INFO, producto_id = stored.id, "Producto persisted.");
    Ok(ProductoResponse::from(stored))
  }
}

pub fn register_create_producto(
  dispatcher: &Dispatcher<AppError>,
  repository: SharedProductoRepository,
) -> DispatchResult<()> {
  dispatcher.register::<CreateProductoCommand, _>(CreateProductoHandler { repository })
}
