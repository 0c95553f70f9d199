// productos_api/src/application/get_producto_by_id.rs

use crate::db::SharedProductoRepository;
use crate::errors::{AppError, Result as AppResult};
use crate::models::ProductoResponse;
use async_trait::async_trait;
use dispatch::{DispatchResult, Dispatcher, Request, RequestHandler};
use tracing::instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetProductoByIdQuery {
  pub id: i32,
}

impl Request for GetProductoByIdQuery {
  /// `None` when no producto has this id.
  type Response = Option<ProductoResponse>;
}

pub struct GetProductoByIdHandler {
  repository: SharedProductoRepository,
}

#[async_trait]
impl RequestHandler<GetProductoByIdQuery, AppError> for GetProductoByIdHandler {
  #[instrument(name = "query::get_producto_by_id", skip_all, fields(producto_id = query.id), err)]
  async fn handle(&self, query: GetProductoByIdQuery) -> AppResult<Option<ProductoResponse>> {
    let producto = self.repository.find_by_id(query.id).await?;
    Ok(producto.map(ProductoResponse::from))
  }
}

pub fn register_get_producto_by_id(
  dispatcher: &Dispatcher<AppError>,
  repository: SharedProductoRepository,
) -> DispatchResult<()> {
  dispatcher.register::<GetProductoByIdQuery, _>(GetProductoByIdHandler { repository })
}
