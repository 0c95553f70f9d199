// productos_api/src/web/handlers/mod.rs

pub mod producto_handlers;
