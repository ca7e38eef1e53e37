//! Bicubic spline interpolation on a rectangular grid.
//!
//! One natural cubic spline is built along the x axis for every y node. A
//! query evaluates those column splines at the requested x, then re-splines
//! the resulting section along y. The composition is exact at the grid
//! nodes, C2 between them, and continues the boundary polynomial pieces of
//! both axes outside the grid.

use nalgebra::DMatrix;

use super::{CubicSpline, MathError, natural_second_derivatives, spline_value};

/// Grid precondition violations raised at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidGridError {
    /// An axis is too short or not strictly increasing.
    Axis(&'static str),
    /// The value matrix does not match the axis lengths.
    Shape(&'static str),
}

impl std::fmt::Display for InvalidGridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Axis(msg) => write!(f, "invalid grid axis: {msg}"),
            Self::Shape(msg) => write!(f, "invalid grid shape: {msg}"),
        }
    }
}

impl std::error::Error for InvalidGridError {}

impl From<MathError> for InvalidGridError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InvalidInput(msg) => Self::Axis(msg),
        }
    }
}

fn validate_axis(
    axis: &[f64],
    too_short: &'static str,
    not_increasing: &'static str,
) -> Result<(), InvalidGridError> {
    // Degree-3 pieces in both directions need at least 4 nodes per axis.
    if axis.len() < 4 {
        return Err(InvalidGridError::Axis(too_short));
    }
    if axis.windows(2).any(|w| w[1] <= w[0]) {
        return Err(InvalidGridError::Axis(not_increasing));
    }
    Ok(())
}

/// Tensor-product bicubic interpolating spline over `values[(i, j)] =
/// f(x[i], y[j])`.
#[derive(Debug, Clone)]
pub struct BicubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// One spline per y node, along x.
    column_splines: Vec<CubicSpline>,
}

impl BicubicSpline {
    pub fn new(x: Vec<f64>, y: Vec<f64>, values: &DMatrix<f64>) -> Result<Self, InvalidGridError> {
        validate_axis(
            &x,
            "x axis needs at least 4 nodes",
            "x axis must be strictly increasing",
        )?;
        validate_axis(
            &y,
            "y axis needs at least 4 nodes",
            "y axis must be strictly increasing",
        )?;
        if values.nrows() != x.len() || values.ncols() != y.len() {
            return Err(InvalidGridError::Shape(
                "values must be |x| rows by |y| columns",
            ));
        }

        let column_splines = (0..y.len())
            .map(|j| {
                let column: Vec<f64> = values.column(j).iter().copied().collect();
                CubicSpline::new(x.clone(), column)
            })
            .collect::<Result<Vec<_>, MathError>>()?;

        Ok(Self {
            x,
            y,
            column_splines,
        })
    }

    /// Surface value at a single `(xq, yq)` point.
    pub fn value(&self, xq: f64, yq: f64) -> f64 {
        let section: Vec<f64> = self.column_splines.iter().map(|s| s.value(xq)).collect();
        let y2 = natural_second_derivatives(&self.y, &section);
        spline_value(&self.y, &section, &y2, yq)
    }

    /// Outer-product evaluation: one value per `(xs[i], ys[k])` pair, shape
    /// `|xs| x |ys|`. Degenerate empty inputs give 0-row or 0-column output.
    ///
    /// Each requested `xs[i]` builds its cross-section once, so the per-point
    /// cost is dominated by the two segment lookups.
    pub fn sample(&self, xs: &[f64], ys: &[f64]) -> DMatrix<f64> {
        let mut out = DMatrix::zeros(xs.len(), ys.len());
        let mut section = vec![0.0_f64; self.y.len()];

        for (i, &xq) in xs.iter().enumerate() {
            for (j, spline) in self.column_splines.iter().enumerate() {
                section[j] = spline.value(xq);
            }
            let y2 = natural_second_derivatives(&self.y, &section);
            for (k, &yq) in ys.iter().enumerate() {
                out[(i, k)] = spline_value(&self.y, &section, &y2, yq);
            }
        }
        out
    }

    /// Grid abscissas along x.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Grid abscissas along y.
    pub fn y(&self) -> &[f64] {
        &self.y
    }
}
