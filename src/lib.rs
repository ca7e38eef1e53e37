//! Type Ia supernova spectral-template sources.
//!
//! `snsed` evaluates rest-frame supernova flux as a function of phase (days
//! relative to peak brightness) and wavelength (angstroms). A base template
//! SED grid is wrapped in a bicubic interpolated surface, and parametric
//! sources transform queries against it; the bundled
//! [`sources::Dm15Source`] implements the one-parameter decline-rate family
//! of Sako et al. (2008) on top of a canonical template such as
//! Hsiao et al. (2007).
//!
//! References used across modules:
//! - Sako et al. (2008), ApJ 676, 868, Appendix C (dm15 model, Eq. C4).
//! - Hsiao et al. (2007), ApJ 663, 1187 (canonical spectral template).
//! - Phillips (1993), ApJ 413, L105 (decline-rate/luminosity relation).
//! - Press et al., *Numerical Recipes*, ch. 3 (natural cubic splines).
//!
//! Numerical considerations:
//! - Template surfaces are interpolating splines: they reproduce the grid
//!   exactly at the nodes and continue their boundary polynomial pieces just
//!   outside the grid, which the decline-rate time stretch relies on.
//! - Parameter values are deliberately not range-checked; see
//!   [`core::SpectralSource::set_param`].
//!
//! # Quick Start
//! Evaluate the dm15 model on a synthetic template:
//! ```rust
//! use nalgebra::DMatrix;
//! use snsed::core::SpectralSource;
//! use snsed::sources::Dm15Source;
//! use snsed::template::TemplateGrid;
//!
//! let phase = vec![-10.0, 0.0, 10.0, 20.0];
//! let wavelength = vec![3000.0, 5000.0, 7000.0, 9000.0];
//! let flux = DMatrix::from_element(4, 4, 2.5e-9);
//! let grid = TemplateGrid::new(phase, wavelength, flux).unwrap();
//!
//! let mut source = Dm15Source::new(grid, "dm15", None).unwrap();
//! source.set_param("dm15", 0.9).unwrap();
//! let f = source.flux(&[0.0, 5.0], &[4000.0, 5000.0]);
//! assert_eq!((f.nrows(), f.ncols()), (2, 2));
//! assert!(f.iter().all(|v| v.is_finite()));
//! ```

pub mod core;
pub mod math;
pub mod sources;
pub mod template;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::math::{BicubicSpline, CubicSpline, InvalidGridError, MathError};
    pub use crate::sources::*;
    pub use crate::template::*;
}
