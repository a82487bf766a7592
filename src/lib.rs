pub mod crypto;

pub mod ballot;
pub mod codec;
pub mod context;
pub mod errors;
pub mod guardian;
pub mod manifest;
pub mod scheduler;
pub mod schema;
pub mod service;
pub mod share;

pub use errors::{Error, Result};
