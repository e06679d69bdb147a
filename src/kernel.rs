// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Convolution kernels for seam replacement.
//!
//! A kernel is a square matrix with an odd side, so that it has a
//! center pixel.  A matrix row runs down the image: entry `[i][j]` is
//! the weight of the neighbor `i` columns right of and `j` rows below
//! the top-left corner of the window, so `weight(dx, dy)` reads
//! `[dx][dy]`.

use crate::errors::SeamError;
use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    side: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Build a kernel from its rows.  Row `i` weighs window column `i`,
    /// top to bottom.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, SeamError> {
        let side = rows.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != side) {
            return Err(SeamError::KernelShape {
                rows: side,
                columns: bad.len(),
            });
        }
        if side % 2 == 0 {
            return Err(SeamError::KernelShape {
                rows: side,
                columns: side,
            });
        }
        Ok(Kernel {
            side,
            weights: rows.into_iter().flatten().collect(),
        })
    }

    /// A Gaussian blur, `1/(2πσ²) · e^(-(a²+b²)/2σ²)` around the center.
    /// The weights are not renormalized, so they sum to a little under
    /// one.  The side must be odd and at least three.
    pub fn gaussian(side: usize, sigma: f64) -> Result<Self, SeamError> {
        if side % 2 == 0 || side < 3 {
            return Err(SeamError::KernelShape {
                rows: side,
                columns: side,
            });
        }
        let coefficient = 1.0 / (2.0 * PI * sigma * sigma);
        let two_sigma_squared = 2.0 * sigma * sigma;
        let mid = (side / 2) as f64;
        let weights = (0..side * side)
            .map(|i| {
                let a = (i % side) as f64 - mid;
                let b = (i / side) as f64 - mid;
                coefficient * (-(a * a + b * b) / two_sigma_squared).exp()
            })
            .collect();
        Ok(Kernel { side, weights })
    }

    /// A Gaussian blur wide enough to reach one tenth of the peak.
    pub fn gaussian_for(sigma: f64) -> Result<Self, SeamError> {
        let half = (-(0.1f64.ln()) * 2.0 * sigma * sigma).sqrt().round() as usize;
        Kernel::gaussian(2 * half + 1, sigma)
    }

    /// The classic 3×3 sharpen (unsharp mask) kernel.
    pub fn sharpen(force: f64) -> Self {
        Kernel {
            side: 3,
            weights: vec![
                0.0, -force, 0.0, //
                -force, 4.0 * force + 1.0, -force, //
                0.0, -force, 0.0,
            ],
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn weight(&self, dx: usize, dy: usize) -> f64 {
        self.weights[dx * self.side + dy]
    }
}
