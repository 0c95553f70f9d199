// productos_api/src/application/patch_producto.rs

use crate::db::SharedProductoRepository;
use crate::errors::{AppError, Result as AppResult};
use crate::models::{Producto, ProductoResponse};
use async_trait::async_trait;
use chrono::Utc;
use dispatch::{DispatchResult, Dispatcher, Request, RequestHandler};
use rust_decimal::Decimal;
use tracing::{event, instrument, Level};

/// Partial update: only fields that are `Some` are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchProductoCommand {
  pub id: i32,
  pub codigo: Option<String>,
  pub nombre: Option<String>,
  /// `None`: untouched. `Some(None)`: cleared to `""`. `Some(Some(s))`: set to `s`.
  pub descripcion: Option<Option<String>>,
  pub precio: Option<Decimal>,
  pub activo: Option<bool>,
  pub categoria_id: Option<i32>,
}

impl PatchProductoCommand {
  pub fn new(id: i32) -> Self {
    Self {
      id,
      ..Default::default()
    }
  }

  fn apply_to(self, producto: &mut Producto) {
    if let Some(codigo) = self.codigo {
      producto.codigo = codigo;
    }
    if let Some(nombre) = self.nombre {
      producto.nombre = nombre;
    }
    if let Some(descripcion) = self.descripcion {
      producto.descripcion = Some(descripcion.unwrap_or_default());
    }
    if let Some(precio) = self.precio {
      producto.precio = precio;
    }
    if let Some(activo) = self.activo {
      producto.activo = activo;
    }
    if let Some(categoria_id) = self.categoria_id {
      producto.categoria_id = categoria_id;
    }
  }
}

impl Request for PatchProductoCommand {
  /// `None` when no producto has this id.
  type Response = Option<ProductoResponse>;
}

pub struct PatchProductoHandler {
  repository: SharedProductoRepository,
}

#[async_trait]
impl RequestHandler<PatchProductoCommand, AppError> for PatchProductoHandler {
  #[instrument(name = "command::patch_producto", skip_all, fields(producto_id = command.id), err)]
  async fn handle(&self, command: PatchProductoCommand) -> AppResult<Option<ProductoResponse>> {
    let Some(mut producto) = self.repository.find_by_id(command.id).await? else {
      event!(Level::DEBUG, "Producto not found, nothing to patch.");
      return Ok(None);
    };

    command.apply_to(&mut producto);
    // Stamped even when no field was sent.
    producto.touch(Utc::now());

    let patched = self.repository.update(&producto).await?;
    Ok(patched.map(ProductoResponse::from))
  }
}

pub fn register_patch_producto(
  dispatcher: &Dispatcher<AppError>,
  repository: SharedProductoRepository,
) -> DispatchResult<()> {
  dispatcher.register::<PatchProductoCommand, _>(PatchProductoHandler { repository })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::test_support;

  #[tokio::test]
  async fn only_sent_fields_change() {
    let dispatcher = test_support::dispatcher();
    let created = test_support::create(&dispatcher, "P1").await;

    let patch = PatchProductoCommand {
      precio: Some(Decimal::new(1250, 2)),
      ..PatchProductoCommand::new(created.id)
    };
    let patched = dispatcher.send(patch).await.unwrap().unwrap();

    assert_eq!(patched.precio, Decimal::new(1250, 2));
    assert_eq!(patched.codigo, created.codigo);
    assert_eq!(patched.nombre, created.nombre);
    assert_eq!(patched.activo, created.activo);
    assert_eq!(patched.categoria_id, created.categoria_id);
    assert_eq!(patched.descripcion, created.descripcion);
    assert!(patched.fecha_actualizacion.is_some());
  }

  #[tokio::test]
  async fn empty_patch_still_stamps_update() {
    let dispatcher = test_support::dispatcher();
    let created = test_support::create(&dispatcher, "P1").await;

    let first = dispatcher
      .send(PatchProductoCommand::new(created.id))
      .await
      .unwrap()
      .unwrap();
    let second = dispatcher
      .send(PatchProductoCommand::new(created.id))
      .await
      .unwrap()
      .unwrap();

    assert!(first.fecha_actualizacion.is_some());
    assert!(second.fecha_actualizacion >= first.fecha_actualizacion);

    // Everything else is untouched.
    let mut expected = created.clone();
    expected.fecha_actualizacion = second.fecha_actualizacion;
    assert_eq!(second, expected);
  }

  #[tokio::test]
  async fn descripcion_tri_state() {
    let dispatcher = test_support::dispatcher();
    let created = test_support::create(&dispatcher, "P1").await;

    let set = PatchProductoCommand {
      descripcion: Some(Some("Rojo".to_string())),
      ..PatchProductoCommand::new(created.id)
    };
    assert_eq!(dispatcher.send(set).await.unwrap().unwrap().descripcion, "Rojo");

    let untouched = dispatcher.send(PatchProductoCommand::new(created.id)).await.unwrap().unwrap();
    assert_eq!(untouched.descripcion, "Rojo");

    let cleared = PatchProductoCommand {
      descripcion: Some(None),
      ..PatchProductoCommand::new(created.id)
    };
    assert_eq!(dispatcher.send(cleared).await.unwrap().unwrap().descripcion, "");
  }

  #[tokio::test]
  async fn missing_id_is_none() {
    let dispatcher = test_support::dispatcher();
    assert!(dispatcher.send(PatchProductoCommand::new(77)).await.unwrap().is_none());
  }
}
