// productos_api/src/application/delete_producto.rs

use crate::db::SharedProductoRepository;
use crate::errors::{AppError, Result as AppResult};
use async_trait::async_trait;
use dispatch::{DispatchResult, Dispatcher, Request, RequestHandler};
use tracing::{event, instrument, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteProductoCommand {
  pub id: i32,
}

impl Request for DeleteProductoCommand {
  /// `true` when a row was removed.
  type Response = bool;
}

pub struct DeleteProductoHandler {
  repository: SharedProductoRepository,
}

#[async_trait]
impl RequestHandler<DeleteProductoCommand, AppError> for DeleteProductoHandler {
  #[instrument(name = "command::delete_producto", skip_all, fields(producto_id = command.id), err)]
  async fn handle(&self, command: DeleteProductoCommand) -> AppResult<bool> {
    if self.repository.find_by_id(command.id).await?.is_none() {
      event!(Level::DEBUG, "Producto not found, nothing to delete.");
      return Ok(false);
    }
    self.repository.delete(command.id).await
  }
}

pub fn register_delete_producto(
  dispatcher: &Dispatcher<AppError>,
  repository: SharedProductoRepository,
) -> DispatchResult<()> {
  dispatcher.register::<DeleteProductoCommand, _>(DeleteProductoHandler { repository })
}
