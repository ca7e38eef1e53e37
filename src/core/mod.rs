//! Source protocol traits and library-wide error types.

pub mod source;

pub use source::{Parameter, SourceError, SpectralSource};
