// productos_api/src/models/mod.rs

//! Contains data structures representing database entities and their API shape.

pub mod producto;

// Re-export the model structs for convenient access
pub use producto::{NewProducto, Producto, ProductoResponse};
