//! Loss landscape sampling.
//!
//! Evaluates an [`Objective`] over a rectangular domain and writes the result
//! as a mesh file, the producer side of what `mesh-plot` renders.

pub mod error;
pub mod objective;
pub mod projection;

pub use error::{LandscapeError, LandscapeResult};
pub use objective::{Benchmark, Objective};
pub use projection::LossProjection;
