//! The narrow contract a host model framework drives.
//!
//! Any template-based source exposes a fixed, ordered parameter list plus
//! rest-frame flux evaluation on phase and wavelength arrays. Hosts converge
//! on this interface instead of a shared base type, so independent models
//! conform without inheriting from one another.

use nalgebra::DMatrix;

use crate::math::InvalidGridError;

/// Static descriptor of a named scalar model parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameter {
    /// Name used for get/set access.
    pub name: &'static str,
    /// Human-readable LaTeX label.
    pub latex: &'static str,
    /// Value a freshly constructed source starts from.
    pub default: f64,
}

/// Errors surfaced by the source protocol and registry.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// A get/set used a name outside the source's fixed parameter list.
    UnknownParameter(String),
    /// No source registered under the requested name.
    UnknownSource(String),
    /// A (name, version) pair was registered twice.
    DuplicateSource(String),
    /// The base template grid violated its invariants.
    Grid(InvalidGridError),
    /// The template provider could not supply the base grid.
    TemplateUnavailable(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownParameter(name) => write!(f, "unknown parameter `{name}`"),
            Self::UnknownSource(name) => write!(f, "no source registered under `{name}`"),
            Self::DuplicateSource(key) => write!(f, "source `{key}` is already registered"),
            Self::Grid(err) => write!(f, "invalid template grid: {err}"),
            Self::TemplateUnavailable(msg) => write!(f, "template unavailable: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<InvalidGridError> for SourceError {
    fn from(err: InvalidGridError) -> Self {
        Self::Grid(err)
    }
}

/// A spectral time series with named scalar parameters.
pub trait SpectralSource {
    /// Registered source name.
    fn name(&self) -> &str;

    /// Template version, when the source tracks one.
    fn version(&self) -> Option<&str>;

    /// Fixed, ordered parameter descriptors.
    fn parameters(&self) -> &'static [Parameter];

    /// Current parameter values, in `parameters()` order.
    fn param_values(&self) -> &[f64];

    /// Mutable view of the parameter values, in `parameters()` order.
    fn param_values_mut(&mut self) -> &mut [f64];

    /// Rest-frame flux on the outer product of `phases` (days) and
    /// `wavelengths` (angstroms); shape `|phases| x |wavelengths|`.
    fn flux(&self, phases: &[f64], wavelengths: &[f64]) -> DMatrix<f64>;

    /// Current value of the named parameter.
    fn param(&self, name: &str) -> Option<f64> {
        let idx = self.parameters().iter().position(|p| p.name == name)?;
        self.param_values().get(idx).copied()
    }

    /// Sets the named parameter.
    ///
    /// Values are not range-checked: a negative amplitude or a decline rate
    /// far outside the calibrated range flows through the flux formulas
    /// unchanged, matching the reference model's permissiveness.
    fn set_param(&mut self, name: &str, value: f64) -> Result<(), SourceError> {
        let idx = self
            .parameters()
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| SourceError::UnknownParameter(name.to_string()))?;
        self.param_values_mut()[idx] = value;
        Ok(())
    }
}
