//! Storage abstraction for DinePass
//!
//! This crate provides a storage abstraction for restaurants, employees,
//! the append-only visit log, and maintenance tickets. It ships an
//! in-memory store for tests and ephemeral deployments and a SQLite
//! store for durable ones. Both emit every appended visit event on a
//! broadcast feed that live subscribers (the cooldown monitor) observe.

mod error;
mod memory;
mod sqlite;
mod traits;

pub use error::*;
pub use memory::*;
pub use sqlite::*;
pub use traits::*;
