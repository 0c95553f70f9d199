// productos_api/src/models/producto.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `productos` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Producto {
  pub id: i32,
  pub codigo: String,
  pub nombre: String,
  pub descripcion: Option<String>, // Nullable column; read paths coerce NULL to ""
  pub precio: Decimal,
  pub activo: bool,
  pub categoria_id: i32,
  pub fecha_creacion: DateTime<Utc>,
  pub fecha_actualizacion: Option<DateTime<Utc>>,
  pub cantidad_stock: i32,
}

impl Producto {
  /// Stamps a mutation. `fecha_actualizacion` never moves backwards, even if
  /// the wall clock does.
  pub fn touch(&mut self, now: DateTime<Utc>) {
    let stamped = match self.fecha_actualizacion {
      Some(previous) if previous > now => previous,
      _ => now,
    };
    self.fecha_actualizacion = Some(stamped);
  }
}

/// Values for a row about to be inserted; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProducto {
  pub codigo: String,
  pub nombre: String,
  pub descripcion: String,
  pub precio: Decimal,
  pub activo: bool,
  pub categoria_id: i32,
  pub fecha_creacion: DateTime<Utc>,
  pub cantidad_stock: i32,
}

impl NewProducto {
  pub fn into_producto(self, id: i32) -> Producto {
    Producto {
      id,
      codigo: self.codigo,
      nombre: self.nombre,
      descripcion: Some(self.descripcion),
      precio: self.precio,
      activo: self.activo,
      categoria_id: self.categoria_id,
      fecha_creacion: self.fecha_creacion,
      fecha_actualizacion: None,
      cantidad_stock: self.cantidad_stock,
    }
  }
}

/// The item shape returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductoResponse {
  pub id: i32,
  pub codigo: String,
  pub nombre: String,
  pub descripcion: String,
  pub precio: Decimal,
  pub activo: bool,
  pub categoria_id: i32,
  pub fecha_creacion: DateTime<Utc>,
  pub fecha_actualizacion: Option<DateTime<Utc>>,
  pub cantidad_stock: i32,
}

impl From<Producto> for ProductoResponse {
  fn from(p: Producto) -> Self {
    Self {
      id: p.id,
      codigo: p.codigo,
      nombre: p.nombre,
      descripcion: p.descripcion.unwrap_or_default(),
      precio: p.precio,
      activo: p.activo,
      categoria_id: p.categoria_id,
      fecha_creacion: p.fecha_creacion,
      fecha_actualizacion: p.fecha_actualizacion,
      cantidad_stock: p.cantidad_stock,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  fn sample() -> Producto {
    NewProducto {
      codigo: "P1".to_string(),
      nombre: "Widget".to_string(),
      descripcion: String::new(),
      precio: Decimal::new(999, 2),
      activo: true,
      categoria_id: 1,
      fecha_creacion: Utc::now(),
      cantidad_stock: 0,
    }
    .into_producto(1)
  }

  #[test]
  fn null_descripcion_reads_as_empty_string() {
    let mut p = sample();
    p.descripcion = None;
    let resp = ProductoResponse::from(p);
    assert_eq!(resp.descripcion, "");
  }

  #[test]
  fn touch_never_goes_backwards() {
    let mut p = sample();
    let later = Utc::now() + Duration::seconds(30);
    p.touch(later);
    assert_eq!(p.fecha_actualizacion, Some(later));

    p.touch(later - Duration::seconds(10));
    assert_eq!(p.fecha_actualizacion, Some(later));
  }

  #[test]
  fn response_uses_pascal_case_keys() {
    let json = serde_json::to_value(ProductoResponse::from(sample())).unwrap();
    for key in [
      "Id",
      "Codigo",
      "Nombre",
      "Descripcion",
      "Precio",
      "Activo",
      "CategoriaId",
      "FechaCreacion",
      "FechaActualizacion",
      "CantidadStock",
    ] {
      assert!(json.get(key).is_some(), "missing key {}", key);
    }
    assert!(json["FechaActualizacion"].is_null());
    assert_eq!(json["Precio"].as_f64(), Some(9.99));
  }
}
