// productos_api/src/db/mod.rs

//! Persistence gateway for the `productos` table.
//!
//! Every operation is a single atomic statement; no multi-row transactions are
//! exposed to the application handlers.

use crate::errors::Result;
use crate::models::{NewProducto, Producto};
use async_trait::async_trait;
use std::sync::Arc;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProductoRepository;
pub use postgres::PgProductoRepository;

#[async_trait]
pub trait ProductoRepository: Send + Sync {
  /// All rows in insertion order.
  async fn find_all(&self) -> Result<Vec<Producto>>;

  /// Read-only lookup; `None` when the id does not exist.
  async fn find_by_id(&self, id: i32) -> Result<Option<Producto>>;

  /// Inserts a new row and returns it with its generated id.
  async fn insert(&self, producto: NewProducto) -> Result<Producto>;

  /// Replaces the mutable fields of the row with `producto.id`.
  /// Returns `None` if that row no longer exists.
  async fn update(&self, producto: &Producto) -> Result<Option<Producto>>;

  /// Removes the row; `true` when a row was removed.
  async fn delete(&self, id: i32) -> Result<bool>;
}

/// The gateway handle injected into every command/query handler.
pub type SharedProductoRepository = Arc<dyn ProductoRepository>;
