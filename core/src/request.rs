// dispatch/src/request.rs

//! Defines the `Request` trait implemented by commands and queries, and the
//! `RequestHandler<R, E>` trait that executes exactly one request type.

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

/// A command or query that can be sent through a `Dispatcher`.
///
/// `Response` is what the registered handler produces on success. Requests are
/// moved into the handler, so they must be `Send + 'static`.
pub trait Request: Send + 'static {
  type Response: Send + 'static;
}

/// Executes one request type `R`, failing with the application error `E`.
///
/// Handlers are stateless with respect to the dispatcher: any collaborators
/// (database pools, repositories, clients) are owned by the handler value
/// itself and injected when it is registered.
#[async_trait]
pub trait RequestHandler<R, E>: Send + Sync
where
  R: Request,
  E: Send + 'static,
{
  async fn handle(&self, request: R) -> Result<R::Response, E>;
}

/// Type alias for a closure-based handler.
///
/// The closure takes ownership of the request and returns a boxed future
/// resolving to the request's response or `E`.
pub type HandlerFn<R, E> = Box<
  dyn Fn(R) -> Pin<Box<dyn Future<Output = Result<<R as Request>::Response, E>> + Send>>
    + Send
    + Sync,
>;

/// Adapts a `HandlerFn` to the `RequestHandler` trait.
pub(crate) struct FnHandler<R: Request, E> {
  pub(crate) f: HandlerFn<R, E>,
}

#[async_trait]
impl<R, E> RequestHandler<R, E> for FnHandler<R, E>
where
  R: Request,
  E: Send + 'static,
{
  async fn handle(&self, request: R) -> Result<R::Response, E> {
    (self.f)(request).await
  }
}
