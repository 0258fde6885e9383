//! Physical coordinate mesh centred on the origin.

use nalgebra::{DMatrix, DVector};

use crate::grid::Shape;

/// Coordinates of every dense cell, in the layout of `numpy.meshgrid(x, y)`:
/// `x[(i, j)] = x_axis[j]` and `y[(i, j)] = y_axis[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// N samples spanning [-half_width, half_width].
    pub x_axis: DVector<f64>,
    /// M samples spanning [-half_height, half_height].
    pub y_axis: DVector<f64>,
    pub x: DMatrix<f64>,
    pub y: DMatrix<f64>,
}

impl Mesh {
    pub fn new(shape: Shape, dx: f64, dy: f64) -> Self {
        let (half_width, half_height) = shape.physical_extent(dx, dy);
        let x_axis = linspace(half_width, shape.cols);
        let y_axis = linspace(half_height, shape.rows);
        let x = DMatrix::from_fn(shape.rows, shape.cols, |_, j| x_axis[j]);
        let y = DMatrix::from_fn(shape.rows, shape.cols, |i, _| y_axis[i]);

        Self { x_axis, y_axis, x, y }
    }

    /// Evaluate `f(x, y)` at every cell.
    pub fn map<F: Fn(f64, f64) -> f64>(&self, f: F) -> DMatrix<f64> {
        self.x.zip_map(&self.y, f)
    }
}

/// `n` evenly spaced samples over `[-half, half]`, endpoints included.
fn linspace(half: f64, n: usize) -> DVector<f64> {
    if n < 2 {
        return DVector::from_element(n, -half);
    }
    let step = 2.0 * half / (n - 1) as f64;
    DVector::from_fn(n, |k, _| -half + step * k as f64)
}
