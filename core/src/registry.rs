// dispatch/src/registry.rs

//! Defines the `Dispatcher<E>` struct, a type-keyed registry mapping each
//! request type to exactly one handler.
//! The dispatcher returns results with an application-level error type `E`.

use crate::error::{DispatchError, DispatchResult};
use crate::request::{FnHandler, HandlerFn, Request, RequestHandler};

use async_trait::async_trait;
use parking_lot::RwLock;
use std::any::{type_name, Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Type-erased trait for handler execution by the registry.
#[async_trait]
trait AnyHandlerRunner<ApplicationError>: Send + Sync
where
  ApplicationError: std::error::Error + From<DispatchError> + Send + Sync + 'static,
{
  /// `request` is expected to be a `Box<dyn Any + Send>` containing the
  /// concrete request type. The response is returned boxed the same way.
  async fn run_erased(&self, request: Box<dyn Any + Send>) -> Result<Box<dyn Any + Send>, ApplicationError>;
}

/// Wrapper for a `RequestHandler<R, E>` to make it runnable by `Dispatcher<E>`.
struct HandlerWrapper<R, H, ApplicationError> {
  handler: H,
  _phantom: PhantomData<fn() -> (R, ApplicationError)>,
}

#[async_trait]
impl<R, H, ApplicationError> AnyHandlerRunner<ApplicationError> for HandlerWrapper<R, H, ApplicationError>
where
  R: Request,
  H: RequestHandler<R, ApplicationError> + 'static,
  ApplicationError: std::error::Error + From<DispatchError> + Send + Sync + 'static,
{
  async fn run_erased(&self, request: Box<dyn Any + Send>) -> Result<Box<dyn Any + Send>, ApplicationError> {
    let typed_request = match request.downcast::<R>() {
      Ok(boxed) => *boxed,
      Err(_) => {
        let expected_type = type_name::<R>();
        event!(Level::ERROR, "Request object type mismatch. Expected {}.", expected_type);
        return Err(ApplicationError::from(DispatchError::TypeMismatch {
          expected_type: expected_type.to_string(),
        }));
      }
    };

    let response = self.handler.handle(typed_request).await?;
    Ok(Box::new(response))
  }
}

/// The dispatcher registry.
/// `ApplicationError` is the error type that `Dispatcher::send` will return.
/// It must be constructible from `DispatchError` so that wiring errors
/// (e.g. a request type with no handler) can be reported through it.
pub struct Dispatcher<ApplicationError = DispatchError>
where
  ApplicationError: std::error::Error + From<DispatchError> + Send + Sync + 'static,
{
  registry: RwLock<HashMap<TypeId, Arc<dyn AnyHandlerRunner<ApplicationError>>>>,
}

impl<ApplicationError> Dispatcher<ApplicationError>
where
  ApplicationError: std::error::Error + From<DispatchError> + Send + Sync + 'static,
{
  /// Creates a new, empty dispatcher.
  pub fn new() -> Self {
    Self {
      registry: RwLock::new(HashMap::new()),
    }
  }

  /// Registers the handler for request type `R`.
  ///
  /// Each request type has exactly one handler. A second registration for the
  /// same `R` is rejected with `DispatchError::DuplicateHandler` and the
  /// handler already in place is kept.
  pub fn register<R, H>(&self, handler: H) -> DispatchResult<()>
  where
    R: Request,
    H: RequestHandler<R, ApplicationError> + 'static,
  {
    let request_type = type_name::<R>();
    let wrapper = HandlerWrapper::<R, H, ApplicationError> {
      handler,
      _phantom: PhantomData,
    };

    match self.registry.write().entry(TypeId::of::<R>()) {
      Entry::Occupied(_) => {
        event!(Level::ERROR, request_type = %request_type, "Handler already registered.");
        Err(DispatchError::DuplicateHandler {
          request_type: request_type.to_string(),
        })
      }
      Entry::Vacant(slot) => {
        event!(Level::DEBUG, request_type = %request_type, "Registering handler.");
        slot.insert(Arc::new(wrapper));
        Ok(())
      }
    }
  }

  /// Registers a closure as the handler for request type `R`.
  pub fn register_fn<R, F, Fut>(&self, f: F) -> DispatchResult<()>
  where
    R: Request,
    F: Fn(R) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R::Response, ApplicationError>> + Send + 'static,
  {
    let boxed: HandlerFn<R, ApplicationError> = Box::new(move |request: R| {
      let fut: Pin<Box<dyn Future<Output = Result<R::Response, ApplicationError>> + Send>> = Box::pin(f(request));
      fut
    });
    self.register::<R, _>(FnHandler { f: boxed })
  }

  /// Whether a handler is registered for request type `R`.
  pub fn is_registered<R: Request>(&self) -> bool {
    self.registry.read().contains_key(&TypeId::of::<R>())
  }

  /// Number of registered request types.
  pub fn len(&self) -> usize {
    self.registry.read().len()
  }

  /// Whether no handler has been registered yet.
  pub fn is_empty(&self) -> bool {
    self.registry.read().is_empty()
  }

  /// Sends `request` to the handler registered for its type and returns the
  /// handler's response.
  #[instrument(name = "Dispatcher::send", skip_all, fields(request_type = %type_name::<R>()))]
  pub async fn send<R: Request>(&self, request: R) -> Result<R::Response, ApplicationError> {
    event!(Level::DEBUG, "Dispatching request.");

    // The read guard is released before awaiting the handler.
    let runner = self.registry.read().get(&TypeId::of::<R>()).cloned();
    let runner = runner.ok_or_else(|| {
      let request_type = type_name::<R>();
      event!(Level::ERROR, "No handler registered for request type {}.", request_type);
      ApplicationError::from(DispatchError::HandlerNotRegistered {
        request_type: request_type.to_string(),
      })
    })?;

    let response = runner.run_erased(Box::new(request)).await?;
    match response.downcast::<R::Response>() {
      Ok(boxed) => Ok(*boxed),
      Err(_) => Err(ApplicationError::from(DispatchError::TypeMismatch {
        expected_type: type_name::<R::Response>().to_string(),
      })),
    }
  }
}

impl<ApplicationError> Default for Dispatcher<ApplicationError>
where
  ApplicationError: std::error::Error + From<DispatchError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<ApplicationError> std::fmt::Debug for Dispatcher<ApplicationError>
where
  ApplicationError: std::error::Error + From<DispatchError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Dispatcher")
      .field("registered_handlers", &self.len())
      .finish()
  }
}
