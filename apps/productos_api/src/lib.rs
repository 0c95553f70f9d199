// productos_api/src/lib.rs

//! HTTP service for the producto catalog. Endpoints translate requests into
//! commands and queries that are routed through a [`dispatch::Dispatcher`] to
//! handlers backed by a [`db::ProductoRepository`].

pub mod application;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod state;
pub mod telemetry;
pub mod web;
