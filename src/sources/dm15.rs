//! Decline-rate parameterized source from Sako et al. (2008).
//!
//! Rest-frame flux is
//!
//! ```text
//! F(t, lambda) = A * f0(t * tau/15, lambda) * f1(lambda, dm15)
//! ```
//!
//! where `f0` is the interpolated base template, `tau` the Eq. C4 timescale
//! polynomial in `dm15`, and `f1` the wavelength-dependent color correction
//! with `x = dm15 - 1.1`:
//!
//! ```text
//! f1 = 10^(-0.4 * (a + b*x) * x)
//! a = 1.248 - 1.045e-4 * lambda, b = 0.633   (lambda < 12000 AA)
//! a = b = 0                                  (otherwise)
//! ```
//!
//! A single canonical template thus covers a one-parameter family of
//! decline rates: faster-declining events (larger dm15) run the template
//! clock faster and tilt the spectrum through `f1`.

use nalgebra::DMatrix;

use crate::core::{Parameter, SpectralSource};
use crate::math::InvalidGridError;
use crate::template::{TemplateGrid, TemplateSurface};

/// Decline rate the template itself was built at; `x = dm15 - 1.1` measures
/// the offset from it.
pub const CALIBRATION_DM15: f64 = 1.1;

/// Break wavelength of the color-decline relation, in angstroms. The
/// correction is identically 1 at and above it.
pub const COLOR_BREAK_ANGSTROM: f64 = 12_000.0;

const PARAMETERS: [Parameter; 2] = [
    Parameter {
        name: "amplitude",
        latex: "A",
        default: 1.0,
    },
    Parameter {
        name: "dm15",
        latex: r"\Delta m_{15}",
        default: 1.1,
    },
];

/// Light-curve timescale `tau` (Sako et al. 2008, Eq. C4). `tau/15`
/// rescales the template clock; near `dm15 = 1.1` the template is recovered
/// almost unstretched.
pub fn stretch_timescale(dm15: f64) -> f64 {
    3.455 + 13.719 * dm15 - 3.601 * dm15 * dm15 + 0.946 * dm15 * dm15 * dm15
}

/// Per-wavelength color correction `f1(lambda, dm15)`.
pub fn color_correction(wavelength: f64, dm15: f64) -> f64 {
    let x = dm15 - CALIBRATION_DM15;
    let (a, b) = if wavelength < COLOR_BREAK_ANGSTROM {
        (1.248 - 1.045e-4 * wavelength, 0.633)
    } else {
        (0.0, 0.0)
    };
    10.0_f64.powf(-0.4 * (a + b * x) * x)
}

/// Supernova source parameterized by amplitude and dm15 decline rate.
#[derive(Debug, Clone)]
pub struct Dm15Source {
    name: String,
    version: Option<String>,
    surface: TemplateSurface,
    values: [f64; 2],
}

impl Dm15Source {
    /// Builds the source over its base template; parameters start at the
    /// defaults `[1.0, 1.1]`.
    pub fn new(
        grid: TemplateGrid,
        name: impl Into<String>,
        version: Option<&str>,
    ) -> Result<Self, InvalidGridError> {
        let surface = TemplateSurface::new(grid)?;
        Ok(Self {
            name: name.into(),
            version: version.map(str::to_owned),
            surface,
            values: [PARAMETERS[0].default, PARAMETERS[1].default],
        })
    }

    /// The interpolated base template.
    pub fn surface(&self) -> &TemplateSurface {
        &self.surface
    }
}

impl SpectralSource for Dm15Source {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn parameters(&self) -> &'static [Parameter] {
        &PARAMETERS
    }

    fn param_values(&self) -> &[f64] {
        &self.values
    }

    fn param_values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    fn flux(&self, phases: &[f64], wavelengths: &[f64]) -> DMatrix<f64> {
        // Snapshot both parameters once; the evaluation never re-reads them.
        let [amplitude, dm15] = self.values;

        let stretch = stretch_timescale(dm15) / 15.0;
        let base_phases: Vec<f64> = phases.iter().map(|p| p * stretch).collect();

        let mut flux = self.surface.sample(&base_phases, wavelengths);
        for (j, &wavelength) in wavelengths.iter().enumerate() {
            let scale = amplitude * color_correction(wavelength, dm15);
            for i in 0..flux.nrows() {
                flux[(i, j)] *= scale;
            }
        }
        flux
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceError;
    use approx::assert_relative_eq;

    fn constant_source(level: f64) -> Dm15Source {
        let phase = vec![-10.0, 0.0, 10.0, 20.0];
        let wavelength = vec![3000.0, 6000.0, 9000.0, 15000.0];
        let flux = DMatrix::from_element(4, 4, level);
        let grid = TemplateGrid::new(phase, wavelength, flux).unwrap();
        Dm15Source::new(grid, "dm15", Some("1.0")).unwrap()
    }

    #[test]
    fn parameters_are_fixed_order_with_documented_defaults() {
        let source = constant_source(1.0);
        let params = source.parameters();
        assert_eq!(params[0].name, "amplitude");
        assert_eq!(params[1].name, "dm15");
        assert_eq!(source.param_values(), &[1.0, 1.1]);
        assert_eq!(source.param("dm15"), Some(1.1));
    }

    #[test]
    fn set_param_rejects_unknown_names_only() {
        let mut source = constant_source(1.0);
        source.set_param("amplitude", -4.0).unwrap();
        assert_eq!(source.param("amplitude"), Some(-4.0));

        // Nonsensical values are accepted; only the name is checked.
        source.set_param("dm15", 250.0).unwrap();

        let err = source.set_param("stretch", 1.0).unwrap_err();
        assert!(matches!(err, SourceError::UnknownParameter(_)));
    }

    #[test]
    fn correction_is_unity_at_calibration_for_all_wavelengths() {
        for w in [1500.0, 4000.0, 8000.0, 11999.9, 12000.0, 20000.0] {
            assert_relative_eq!(color_correction(w, CALIBRATION_DM15), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn correction_is_unity_above_the_break_for_any_decline_rate() {
        for dm15 in [0.7, 0.9, 1.1, 1.5, 1.9] {
            for w in [12000.0, 13000.0, 25000.0] {
                assert_relative_eq!(color_correction(w, dm15), 1.0, epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn flux_on_constant_template_at_calibration_is_amplitude_times_level() {
        // A constant template is reproduced exactly by the spline at any
        // (stretched) phase, and f1 = 1 at dm15 = 1.1, so the pipeline
        // reduces to the amplitude scale alone.
        let mut source = constant_source(2.5);
        source.set_param("amplitude", 3.0).unwrap();

        let flux = source.flux(&[-5.0, 0.0, 12.0, 30.0], &[3500.0, 9000.0, 14000.0]);
        assert_eq!((flux.nrows(), flux.ncols()), (4, 3));
        for v in flux.iter() {
            assert_relative_eq!(*v, 7.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn flux_scales_linearly_in_amplitude() {
        let mut source = constant_source(1.7);
        source.set_param("dm15", 1.4).unwrap();
        let base = source.flux(&[0.0, 8.0], &[4000.0, 13000.0]);

        source.set_param("amplitude", 2.0).unwrap();
        let doubled = source.flux(&[0.0, 8.0], &[4000.0, 13000.0]);

        for (b, d) in base.iter().zip(doubled.iter()) {
            assert_relative_eq!(*d, 2.0 * b, epsilon = 1e-12);
        }
    }

    #[test]
    fn flux_shape_matches_requests_including_empty() {
        let source = constant_source(1.0);
        assert_eq!(source.flux(&[0.0, 1.0, 2.0], &[4000.0]).shape(), (3, 1));
        assert_eq!(source.flux(&[], &[4000.0, 5000.0]).shape(), (0, 2));
        assert_eq!(source.flux(&[0.0], &[]).shape(), (1, 0));
        assert_eq!(source.flux(&[], &[]).shape(), (0, 0));
    }
}
