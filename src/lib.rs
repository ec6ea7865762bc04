//! Attribute data-mask lifecycle for mesh processing: a declarative bit-set
//! of live optional per-vertex/per-face channels, kept in sync with the
//! imperative enable/disable of the buffers backing them.
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod error;
mod mask;
pub use mask::*;
pub mod io;
mod store;
pub use store::*;
mod controller;
pub use controller::*;
pub mod mem;
mod model;
pub use model::*;

pub use error::Error;
