//! Spectral template grids and their interpolated surfaces.
//!
//! A [`TemplateGrid`] holds the sampled rest-frame SED of a supernova
//! template: phases in days relative to peak, wavelengths in angstroms, and
//! an N x M flux matrix. [`TemplateSurface`] wraps the grid in a bicubic
//! interpolant built once at construction, so parametric sources can query
//! flux at arbitrary (phase, wavelength) points, including stretched phases
//! just outside the native coverage.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::math::{BicubicSpline, InvalidGridError};

/// Immutable, validated (phase x wavelength) flux grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateGrid {
    phase: Vec<f64>,
    wavelength: Vec<f64>,
    flux: DMatrix<f64>,
}

impl TemplateGrid {
    /// Validates and stores the grid. Both axes must be strictly increasing
    /// with at least 4 samples; `flux[(i, j)]` pairs `phase[i]` with
    /// `wavelength[j]`.
    pub fn new(
        phase: Vec<f64>,
        wavelength: Vec<f64>,
        flux: DMatrix<f64>,
    ) -> Result<Self, InvalidGridError> {
        if phase.len() < 4 {
            return Err(InvalidGridError::Axis("phase axis needs at least 4 samples"));
        }
        if phase.windows(2).any(|w| w[1] <= w[0]) {
            return Err(InvalidGridError::Axis(
                "phase axis must be strictly increasing",
            ));
        }
        if wavelength.len() < 4 {
            return Err(InvalidGridError::Axis(
                "wavelength axis needs at least 4 samples",
            ));
        }
        if wavelength.windows(2).any(|w| w[1] <= w[0]) {
            return Err(InvalidGridError::Axis(
                "wavelength axis must be strictly increasing",
            ));
        }
        if flux.nrows() != phase.len() || flux.ncols() != wavelength.len() {
            return Err(InvalidGridError::Shape(
                "flux must be |phase| rows by |wavelength| columns",
            ));
        }

        Ok(Self {
            phase,
            wavelength,
            flux,
        })
    }

    /// Template phases, in days relative to peak.
    pub fn phase(&self) -> &[f64] {
        &self.phase
    }

    /// Template wavelengths, in angstroms.
    pub fn wavelength(&self) -> &[f64] {
        &self.wavelength
    }

    /// Flux samples, `|phase|` rows by `|wavelength|` columns.
    pub fn flux(&self) -> &DMatrix<f64> {
        &self.flux
    }

    /// First and last template phases.
    pub fn phase_range(&self) -> (f64, f64) {
        (self.phase[0], self.phase[self.phase.len() - 1])
    }

    /// First and last template wavelengths.
    pub fn wavelength_range(&self) -> (f64, f64) {
        (self.wavelength[0], self.wavelength[self.wavelength.len() - 1])
    }
}

/// Serde payload for persisting or transporting a template grid.
///
/// Kept separate from [`TemplateGrid`] so deserialized payloads re-enter
/// through the validating constructor. Flux is row-major:
/// `flux[i * wavelength.len() + j]` pairs `phase[i]` with `wavelength[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateGridData {
    pub phase: Vec<f64>,
    pub wavelength: Vec<f64>,
    pub flux: Vec<f64>,
}

impl From<&TemplateGrid> for TemplateGridData {
    fn from(grid: &TemplateGrid) -> Self {
        let flux = (0..grid.phase.len())
            .flat_map(|i| (0..grid.wavelength.len()).map(move |j| grid.flux[(i, j)]))
            .collect();
        Self {
            phase: grid.phase.clone(),
            wavelength: grid.wavelength.clone(),
            flux,
        }
    }
}

impl TryFrom<TemplateGridData> for TemplateGrid {
    type Error = InvalidGridError;

    fn try_from(data: TemplateGridData) -> Result<Self, Self::Error> {
        if data.flux.len() != data.phase.len() * data.wavelength.len() {
            return Err(InvalidGridError::Shape(
                "flux length must equal |phase| * |wavelength|",
            ));
        }
        let flux = DMatrix::from_row_slice(data.phase.len(), data.wavelength.len(), &data.flux);
        TemplateGrid::new(data.phase, data.wavelength, flux)
    }
}

/// Continuous bivariate view over a [`TemplateGrid`].
#[derive(Debug, Clone)]
pub struct TemplateSurface {
    grid: TemplateGrid,
    spline: BicubicSpline,
}

impl TemplateSurface {
    /// Builds the bicubic interpolant once; the surface owns the grid.
    pub fn new(grid: TemplateGrid) -> Result<Self, InvalidGridError> {
        let spline = BicubicSpline::new(grid.phase.clone(), grid.wavelength.clone(), &grid.flux)?;
        Ok(Self { grid, spline })
    }

    /// The underlying template grid.
    pub fn grid(&self) -> &TemplateGrid {
        &self.grid
    }

    /// Base template flux at a single (phase, wavelength) point.
    pub fn base_flux(&self, phase: f64, wavelength: f64) -> f64 {
        self.spline.value(phase, wavelength)
    }

    /// Full outer-product evaluation, `|phases| x |wavelengths|`. Points
    /// outside the grid continue the boundary spline pieces; no bounds
    /// error is possible.
    pub fn sample(&self, phases: &[f64], wavelengths: &[f64]) -> DMatrix<f64> {
        self.spline.sample(phases, wavelengths)
    }
}
