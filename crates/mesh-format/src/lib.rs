//! Reader and writer for mesh files.
//!
//! A mesh file captures a 2D scalar field sampled over a rectangular domain
//! at one simulation step. See [`decode`] for the record layout.

pub mod decode;
pub mod encode;
pub mod error;
pub mod grid;

pub use decode::{decode, decode_str};
pub use encode::{encode, write};
pub use error::{FormatError, MeshError, MeshResult};
pub use grid::{Bounds, Grid};
