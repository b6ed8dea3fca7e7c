pub mod confirmation;
pub mod error;

pub use error::{Error, Result};
