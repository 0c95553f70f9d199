// tests/error_handling_tests.rs
mod common;
use common::*;
use dispatch::{DispatchError, Dispatcher};

#[tokio::test]
async fn test_handler_error_is_returned_unchanged() {
  setup_tracing();
  let dispatcher = Dispatcher::<TestError>::new();
  dispatcher.register::<FailingCommand, _>(FailingHandler).unwrap();

  let result = dispatcher
    .send(FailingCommand {
      reason: "boom".to_string(),
    })
    .await;
  assert_eq!(result.err().unwrap(), TestError::Handler("boom".to_string()));
}

#[tokio::test]
async fn test_anyhow_failures_become_handler_errors() {
  setup_tracing();
  let dispatcher = Dispatcher::<DispatchError>::new();
  dispatcher
    .register_fn(|_cmd: FailingCommand| async move {
      let parsed: Result<i32, _> = "not a number".parse::<i32>();
      parsed.map_err(anyhow::Error::from)?;
      Ok::<(), DispatchError>(())
    })
    .unwrap();

  let result = dispatcher.send(FailingCommand::default()).await;
  match result {
    Err(DispatchError::HandlerError { source }) => {
      assert!(source.to_string().contains("invalid digit"));
    }
    other => panic!("Expected DispatchError::HandlerError, got {:?}", other),
  }
}

#[test]
fn test_configuration_errors_are_flagged() {
  let not_registered = DispatchError::HandlerNotRegistered {
    request_type: "X".to_string(),
  };
  let duplicate = DispatchError::DuplicateHandler {
    request_type: "X".to_string(),
  };
  let handler_failure = DispatchError::from(anyhow::anyhow!("boom"));

  assert!(not_registered.is_configuration_error());
  assert!(duplicate.is_configuration_error());
  assert!(!handler_failure.is_configuration_error());
  assert!(not_registered.to_string().contains("No handler registered"));
}
