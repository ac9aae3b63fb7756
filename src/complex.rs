// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The fixed precision backend: plain `Complex<f64>` arithmetic.

use num::Complex;

use crate::backend::{Backend, ITERATIONS};
use crate::config::RenderConfig;

const ESCAPE_RADIUS: f64 = 2.0;

/// Runs the Mandelbrot iteration on 64-bit floats.  The sample delta
/// is derived from the raster width.
#[derive(Copy, Clone, Debug)]
pub struct ComplexBackend {
    delta: f64,
}

impl ComplexBackend {
    /// A backend whose diagonal samples sit `delta` away from the
    /// pixel centre on each axis.
    pub fn new(delta: f64) -> Self {
        ComplexBackend { delta }
    }

    /// A backend using the delta the configuration derives for it.
    pub fn for_config(config: &RenderConfig) -> Self {
        ComplexBackend::new(config.fixed_delta())
    }
}

impl Backend for ComplexBackend {
    type Point = Complex<f64>;
    const NAME: &'static str = "complex";

    fn point(&self, c: Complex<f64>) -> Complex<f64> {
        c
    }

    fn escape(&self, c: &Complex<f64>) -> u8 {
        let mut v: Complex<f64> = Complex { re: 0.0, im: 0.0 };
        for n in 0..ITERATIONS {
            v = v * v + c;
            if v.norm() > ESCAPE_RADIUS {
                return n;
            }
        }
        0
    }

    fn diagonals(&self, center: &Complex<f64>) -> [Complex<f64>; 4] {
        let d = self.delta;
        [
            Complex::new(center.re + d, center.im + d),
            Complex::new(center.re + d, center.im - d),
            Complex::new(center.re - d, center.im - d),
            Complex::new(center.re - d, center.im + d),
        ]
    }
}
