// productos_api/src/application/get_productos.rs

use crate::db::SharedProductoRepository;
use crate::errors::{AppError, Result as AppResult};
use crate::models::ProductoResponse;
use async_trait::async_trait;
use dispatch::{DispatchResult, Dispatcher, Request, RequestHandler};
use tracing::{event, instrument, Level};

/// Lists every producto. An empty catalog is a successful, empty result.
#[derive(Debug, Clone, Default)]
pub struct GetProductosQuery;

impl Request for GetProductosQuery {
  type Response = Vec<ProductoResponse>;
}

pub struct GetProductosHandler {
  repository: SharedProductoRepository,
}

#[async_trait]
impl RequestHandler<GetProductosQuery, AppError> for GetProductosHandler {
  #[instrument(name = "query::get_productos", skip_all, err)]
  async fn handle(&self, _query: GetProductosQuery) -> AppResult<Vec<ProductoResponse>> {
    let productos = self.repository.find_all().await?;
    event!(Level::DEBUG, count = productos.len(), "Productos fetched.");
    Ok(productos.into_iter().map(ProductoResponse::from).collect())
  }
}

pub fn register_get_productos(
  dispatcher: &Dispatcher<AppError>,
  repository: SharedProductoRepository,
) -> DispatchResult<()> {
  dispatcher.register::<GetProductosQuery, _>(GetProductosHandler { repository })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::test_support;

  #[tokio::test]
  async fn empty_store_lists_nothing() {
    let dispatcher = test_support::dispatcher();
    let productos = dispatcher.send(GetProductosQuery).await.unwrap();
    assert!(productos.is_empty());
  }

  #[tokio::test]
  async fn lists_in_insertion_order() {
    let dispatcher = test_support::dispatcher();
    let a = test_support::create(&dispatcher, "A").await;
    let b = test_support::create(&dispatcher, "B").await;

    let productos = dispatcher.send(GetProductosQuery).await.unwrap();
    let ids: Vec<i32> = productos.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
  }
}
