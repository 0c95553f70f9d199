// src/lib.rs

//! dispatch: a small, type-keyed async request dispatcher.
//!
//! Each command or query is its own type implementing [`Request`]. A
//! [`Dispatcher`] maps every request type to exactly one [`RequestHandler`]
//! and routes `send(request)` calls to it:
//!  - Registration is keyed by `TypeId`, no reflection or naming conventions.
//!  - Handlers own their collaborators (pools, repositories) and are injected
//!    once at startup.
//!  - The dispatcher is generic over the application's error type, which only
//!    needs to be constructible from [`DispatchError`].
//!  - No middleware and no broadcast: one request, one handler, one response.

pub mod error;
pub mod registry;
pub mod request;

// --- Re-exports for the Public API ---

pub use crate::error::{DispatchError, DispatchResult};
pub use crate::registry::Dispatcher;
pub use crate::request::{HandlerFn, Request, RequestHandler};

/*
    Typical wiring:
    1. Define `struct GetThingQuery { id: i32 }` and `impl Request for GetThingQuery { type Response = Option<Thing>; }`.
    2. Define a handler struct holding its dependencies and implement
       `RequestHandler<GetThingQuery, AppError>` for it.
    3. At startup, create one `Dispatcher::<AppError>::new()` and `register` every handler.
    4. Share the dispatcher (usually in an `Arc`) and call `dispatcher.send(GetThingQuery { id }).await`.
*/
