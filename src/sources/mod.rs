//! Parametric supernova flux sources and their registry.

pub mod dm15;
pub mod registry;

pub use dm15::Dm15Source;
pub use registry::{SourceFactory, SourceRegistry, TemplateProvider, register_dm15};
