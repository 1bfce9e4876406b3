//! API protocol definitions for DinePass client/server communication
//!
//! This crate defines the JSON request and response shapes exchanged
//! between the DinePass server and its clients, plus the stable error
//! codes carried by error responses.

mod error;
mod requests;
mod responses;
mod types;

pub use error::*;
pub use requests::*;
pub use responses::*;
pub use types::*;
