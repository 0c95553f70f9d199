// productos_api/src/application/update_producto.rs

use crate::db::SharedProductoRepository;
use crate::errors::{AppError, Result as AppResult};
use crate::models::ProductoResponse;
use async_trait::async_trait;
use chrono::Utc;
use dispatch::{DispatchResult, Dispatcher, Request, RequestHandler};
use rust_decimal::Decimal;
use tracing::{event, instrument, Level};

/// Full replacement of the six mutable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProductoCommand {
  pub id: i32,
  pub codigo: String,
  pub nombre: String,
  pub descripcion: String,
  pub precio: Decimal,
  pub activo: bool,
  pub categoria_id: i32,
}

impl Request for UpdateProductoCommand {
  /// `None` when no producto has this id.
  type Response = Option<ProductoResponse>;
}

pub struct UpdateProductoHandler {
  repository: SharedProductoRepository,
}

#[async_trait]
impl RequestHandler<UpdateProductoCommand, AppError> for UpdateProductoHandler {
  #[instrument(name = "command::update_producto", skip_all, fields(producto_id = command.id), err)]
  async fn handle(&self, command: UpdateProductoCommand) -> AppResult<Option<ProductoResponse>> {
    let Some(mut producto) = self.repository.find_by_id(command.id).await? else {
      event!(Level::DEBUG, "Producto not found, nothing to update.");
      return Ok(None);
    };

    // Overwritten unconditionally, even when equal to the stored values.
    producto.codigo = command.codigo;
    producto.nombre = command.nombre;
    producto.descripcion = Some(command.descripcion);
    producto.precio = command.precio;
    producto.activo = command.activo;
    producto.categoria_id = command.categoria_id;
    producto.touch(Utc::now());

    let updated = self.repository.update(&producto).await?;
    Ok(updated.map(ProductoResponse::from))
  }
}

pub fn register_update_producto(
  dispatcher: &Dispatcher<AppError>,
  repository: SharedProductoRepository,
) -> DispatchResult<()> {
  dispatcher.register::<UpdateProductoCommand, _>(UpdateProductoHandler { repository })
}
