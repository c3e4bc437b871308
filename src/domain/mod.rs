pub mod entities;
pub mod errors;
pub mod normalize;
pub mod ports;

pub use entities::*;
pub use errors::{DomainError, Result};
