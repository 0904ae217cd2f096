//! Error types

mod export;
mod store;

pub use export::*;
pub use store::*;
