// productos_api/src/application/mod.rs

//! Command and query handlers for the producto catalog, and their registration
//! with the dispatcher.

use crate::db::SharedProductoRepository;
use crate::errors::AppError;
use dispatch::{DispatchResult, Dispatcher};

// Queries
pub mod get_producto_by_id;
pub mod get_productos;

// Commands
pub mod create_producto;
pub mod delete_producto;
pub mod patch_producto;
pub mod update_producto;

pub use create_producto::CreateProductoCommand;
pub use delete_producto::DeleteProductoCommand;
pub use get_producto_by_id::GetProductoByIdQuery;
pub use get_productos::GetProductosQuery;
pub use patch_producto::PatchProductoCommand;
pub use update_producto::UpdateProductoCommand;

/// Registers every command/query handler with the dispatcher, each holding its
/// own handle to the persistence gateway.
///
/// Called once at application startup. A failure here is a wiring bug.
pub fn register_all_handlers(
  dispatcher: &Dispatcher<AppError>,
  repository: SharedProductoRepository,
) -> DispatchResult<()> {
  tracing::info!("Registering producto handlers...");

  get_productos::register_get_productos(dispatcher, repository.clone())?;
  get_producto_by_id::register_get_producto_by_id(dispatcher, repository.clone())?;
  create_producto::register_create_producto(dispatcher, repository.clone())?;
  update_producto::register_update_producto(dispatcher, repository.clone())?;
  patch_producto::register_patch_producto(dispatcher, repository.clone())?;
  delete_producto::register_delete_producto(dispatcher, repository)?;

  tracing::info!(handlers = dispatcher.len(), "All producto handlers registered.");
  Ok(())
}
