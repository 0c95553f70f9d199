// productos_api/src/db/memory.rs

use crate::db::ProductoRepository;
use crate::errors::{AppError, Result};
use crate::models::{NewProducto, Producto};
use async_trait::async_trait;
use parking_lot::RwLock;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

// Column limits from schema.sql.
const CODIGO_MAX_CHARS: usize = 50;
const NOMBRE_MAX_CHARS: usize = 200;
const PRECIO_SCALE: u32 = 2;
const PRECIO_INTEGER_DIGITS_LIMIT: i64 = 10_000_000_000_000_000; // NUMERIC(18, 2): 16 integer digits

#[derive(Debug, Default)]
struct MemoryState {
  last_id: i32,
  rows: BTreeMap<i32, Producto>, // Ordered by id, i.e. insertion order
}

/// A process-local gateway with the same contract as the Postgres one,
/// including the unique `codigo` constraint and never-reused ids.
#[derive(Debug, Default)]
pub struct InMemoryProductoRepository {
  state: RwLock<MemoryState>,
}

impl InMemoryProductoRepository {
  pub fn new() -> Self {
    Self::default()
  }

  fn check_length(column: &str, value: &str, max_chars: usize) -> Result<()> {
    if value.chars().count() > max_chars {
      return Err(AppError::Internal(format!(
        "value too long for {} (character varying({}))",
        column, max_chars
      )));
    }
    Ok(())
  }

  /// Coerces a row the way the Postgres column types would: text lengths are
  /// enforced and `precio` is rounded half away from zero to two places.
  fn fit_columns(codigo: &str, nombre: &str, precio: Decimal) -> Result<Decimal> {
    Self::check_length("codigo", codigo, CODIGO_MAX_CHARS)?;
    Self::check_length("nombre", nombre, NOMBRE_MAX_CHARS)?;
    let rounded = precio.round_dp_with_strategy(PRECIO_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.abs() >= Decimal::new(PRECIO_INTEGER_DIGITS_LIMIT, 0) {
      return Err(AppError::Internal("numeric field overflow on precio".to_string()));
    }
    Ok(rounded)
  }

  fn codigo_taken(state: &MemoryState, codigo: &str, except_id: Option<i32>) -> bool {
    state
      .rows
      .values()
      .any(|p| p.codigo == codigo && Some(p.id) != except_id)
  }
}

#[async_trait]
impl ProductoRepository for InMemoryProductoRepository {
  async fn find_all(&self) -> Result<Vec<Producto>> {
    Ok(self.state.read().rows.values().cloned().collect())
  }

  async fn find_by_id(&self, id: i32) -> Result<Option<Producto>> {
    Ok(self.state.read().rows.get(&id).cloned())
  }

  async fn insert(&self, producto: NewProducto) -> Result<Producto> {
    let precio = Self::fit_columns(&producto.codigo, &producto.nombre, producto.precio)?;
    let mut state = self.state.write();
    if Self::codigo_taken(&state, &producto.codigo, None) {
      return Err(AppError::DuplicateCodigo(producto.codigo));
    }
    let id = state
      .last_id
      .checked_add(1)
      .ok_or_else(|| AppError::Internal("productos id sequence exhausted".to_string()))?;
    state.last_id = id;
    let mut stored = producto.into_producto(id);
    stored.precio = precio;
    state.rows.insert(id, stored.clone());
    Ok(stored)
  }

  async fn update(&self, producto: &Producto) -> Result<Option<Producto>> {
    let precio = Self::fit_columns(&producto.codigo, &producto.nombre, producto.precio)?;
    let mut state = self.state.write();
    if !state.rows.contains_key(&producto.id) {
      return Ok(None);
    }
    if Self::codigo_taken(&state, &producto.codigo, Some(producto.id)) {
      return Err(AppError::DuplicateCodigo(producto.codigo.clone()));
    }
    let row = match state.rows.get_mut(&producto.id) {
      Some(row) => row,
      None => return Ok(None),
    };
    row.codigo = producto.codigo.clone();
    row.nombre = producto.nombre.clone();
    row.descripcion = producto.descripcion.clone();
    row.precio = precio;
    row.activo = producto.activo;
    row.categoria_id = producto.categoria_id;
    row.fecha_actualizacion = producto.fecha_actualizacion;
    Ok(Some(row.clone()))
  }

  async fn delete(&self, id: i32) -> Result<bool> {
    Ok(self.state.write().rows.remove(&id).is_some())
  }
}
