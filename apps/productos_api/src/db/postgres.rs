// productos_api/src/db/postgres.rs

use crate::db::ProductoRepository;
use crate::errors::{AppError, Result};
use crate::models::{NewProducto, Producto};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{event, instrument, Level};

/// Schema of the `productos` table, applied by the operator (or by tests).
pub const SCHEMA_SQL: &str = include_str!("../../schema.sql");

pub struct PgProductoRepository {
  pool: PgPool,
}

impl PgProductoRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
    let pool = PgPoolOptions::new()
      .max_connections(max_connections)
      .connect(database_url)
      .await?;
    Ok(Self::new(pool))
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }
}

// Unique violations on `codigo` become `AppError::DuplicateCodigo`.
fn map_write_error(err: sqlx::Error, codigo: &str) -> AppError {
  match err {
    sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
      event!(Level::WARN, codigo = %codigo, constraint = ?db_err.constraint(), "Unique constraint violated.");
      AppError::DuplicateCodigo(codigo.to_string())
    }
    other => AppError::Sqlx(other),
  }
}

#[async_trait]
impl ProductoRepository for PgProductoRepository {
  #[instrument(name = "pg::productos::find_all", skip(self), err)]
  async fn find_all(&self) -> Result<Vec<Producto>> {
    let productos = sqlx::query_as::<_, Producto>(
      "SELECT id, codigo, nombre, descripcion, precio, activo, categoria_id, fecha_creacion, fecha_actualizacion, cantidad_stock \
       FROM productos ORDER BY id ASC",
    )
    .fetch_all(&self.pool)
    .await?;
    Ok(productos)
  }

  #[instrument(name = "pg::productos::find_by_id", skip(self), err)]
  async fn find_by_id(&self, id: i32) -> Result<Option<Producto>> {
    let producto = sqlx::query_as::<_, Producto>(
      "SELECT id, codigo, nombre, descripcion, precio, activo, categoria_id, fecha_creacion, fecha_actualizacion, cantidad_stock \
       FROM productos WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(producto)
  }

  #[instrument(name = "pg::productos::insert", skip(self, producto), fields(codigo = %producto.codigo), err)]
  async fn insert(&self, producto: NewProducto) -> Result<Producto> {
    sqlx::query_as::<_, Producto>(
      "INSERT INTO productos (codigo, nombre, descripcion, precio, activo, categoria_id, fecha_creacion, cantidad_stock) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
       RETURNING id, codigo, nombre, descripcion, precio, activo, categoria_id, fecha_creacion, fecha_actualizacion, cantidad_stock",
    )
    .bind(&producto.codigo)
    .bind(&producto.nombre)
    .bind(&producto.descripcion)
    .bind(producto.precio)
    .bind(producto.activo)
    .bind(producto.categoria_id)
    .bind(producto.fecha_creacion)
    .bind(producto.cantidad_stock)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| map_write_error(e, &producto.codigo))
  }

  #[instrument(name = "pg::productos::update", skip(self, producto), fields(producto_id = producto.id), err)]
  async fn update(&self, producto: &Producto) -> Result<Option<Producto>> {
    // cantidad_stock and fecha_creacion are never written after insert.
    sqlx::query_as::<_, Producto>(
      "UPDATE productos SET codigo = $2, nombre = $3, descripcion = $4, precio = $5, activo = $6, \
       categoria_id = $7, fecha_actualizacion = $8 \
       WHERE id = $1 \
       RETURNING id, codigo, nombre, descripcion, precio, activo, categoria_id, fecha_creacion, fecha_actualizacion, cantidad_stock",
    )
    .bind(producto.id)
    .bind(&producto.codigo)
    .bind(&producto.nombre)
    .bind(&producto.descripcion)
    .bind(producto.precio)
    .bind(producto.activo)
    .bind(producto.categoria_id)
    .bind(producto.fecha_actualizacion)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| map_write_error(e, &producto.codigo))
  }

  #[instrument(name = "pg::productos::delete", skip(self), err)]
  async fn delete(&self, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM productos WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() > 0)
  }
}
