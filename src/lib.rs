//! # Taskboard
//!
//! A minimal task board: an in-memory CRUD API over "task" records plus a
//! static file server for the bundled front-end.
//!
//! ## Task Flow
//! 1. Receive request via the HTTP API
//! 2. Router dispatches on method + path shape
//! 3. Store reads or mutates the shared task map
//! 4. Codec renders the task (or error) to its JSON wire form
//!
//! ## Modules
//! - `api`: HTTP routes, handlers, and the static file responder
//! - `store`: concurrent in-memory task store with atomic id issuance
//! - `codec`: narrow JSON field extraction and wire-exact rendering
//! - `config`: environment-driven configuration

pub mod api;
pub mod codec;
pub mod config;
pub mod store;
pub mod task;

pub use config::Config;
pub use task::Task;
