//! Authors and books REST API: resource modules, mappers and bootstrap.

pub mod app;
pub mod error;
pub mod mapper;
pub mod modules;

pub use app::App;
