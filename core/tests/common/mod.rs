// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use dispatch::{DispatchError, Request, RequestHandler};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Request Types ---
#[derive(Clone, Debug, Default)]
pub struct EchoQuery {
  pub message: String,
}

impl Request for EchoQuery {
  type Response = String;
}

#[derive(Clone, Debug, Default)]
pub struct IncrementCommand {
  pub by: usize,
}

impl Request for IncrementCommand {
  type Response = usize;
}

#[derive(Clone, Debug, Default)]
pub struct FailingCommand {
  pub reason: String,
}

impl Request for FailingCommand {
  type Response = ();
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)] // Clone, PartialEq, Eq for assertions
pub enum TestError {
  #[error("Dispatch error: {0}")]
  Dispatch(String), // DispatchError is not PartialEq, keep its Debug output

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<DispatchError> for TestError {
  fn from(de: DispatchError) -> Self {
    TestError::Dispatch(format!("{:?}", de))
  }
}

// --- Common Handlers ---
pub struct EchoHandler;

#[async_trait]
impl RequestHandler<EchoQuery, TestError> for EchoHandler {
  async fn handle(&self, request: EchoQuery) -> Result<String, TestError> {
    tracing::debug!(target: "test_handlers", message = %request.message, "echo");
    Ok(format!("echo: {}", request.message))
  }
}

/// Adds to a shared counter and returns the new total.
pub struct IncrementHandler {
  pub counter: Arc<AtomicUsize>,
}

#[async_trait]
impl RequestHandler<IncrementCommand, TestError> for IncrementHandler {
  async fn handle(&self, request: IncrementCommand) -> Result<usize, TestError> {
    // Yield once so the handler really suspends.
    tokio::task::yield_now().await;
    Ok(self.counter.fetch_add(request.by, Ordering::SeqCst) + request.by)
  }
}

pub struct FailingHandler;

#[async_trait]
impl RequestHandler<FailingCommand, TestError> for FailingHandler {
  async fn handle(&self, request: FailingCommand) -> Result<(), TestError> {
    tracing::warn!(target: "test_handlers", "failing with: '{}'", request.reason);
    Err(TestError::Handler(request.reason))
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counter for checking execution counts ---
pub static HANDLER_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  HANDLER_EXEC_COUNTER.store(0, Ordering::SeqCst);
}
