// productos_api/src/state.rs
use crate::application;
use crate::db::SharedProductoRepository;
use crate::errors::AppError;
use dispatch::{DispatchResult, Dispatcher};
use std::sync::Arc;

/// Shared by every actix worker. The persistence gateway is only reachable
/// through the handlers registered in `dispatcher`.
#[derive(Clone)]
pub struct AppState {
  pub dispatcher: Arc<Dispatcher<AppError>>,
}

impl AppState {
  /// Builds the dispatcher and registers all producto handlers against
  /// `repository`.
  pub fn new(repository: SharedProductoRepository) -> DispatchResult<Self> {
    let dispatcher = Dispatcher::<AppError>::new();
    application::register_all_handlers(&dispatcher, repository)?;
    Ok(Self {
      dispatcher: Arc::new(dispatcher),
    })
  }
}
