//! Diet Assistant Shared Library
//!
//! This crate contains the metabolic calculator, tracking helpers and the
//! API types shared by the backend and WASM modules.

pub mod errors;
pub mod metabolic;
pub mod tracking;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use metabolic::*;
pub use tracking::*;
pub use types::*;
