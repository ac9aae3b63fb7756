// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The arbitrary precision backend, built on MPFR floats.  Much
//! slower than the `f64` backend, but its working precision is a
//! parameter.
//!
//! Every intermediate value is a fresh `Float` owned by the step that
//! computes it; nothing is carried from one sample to the next.

use num::Complex;
use rug::Float;

use crate::backend::{Backend, ITERATIONS};
use crate::config::{RenderConfig, BIGFLOAT_DELTA};
use crate::errors::RenderError;

// |v|^2 > 4 is the same test as |v| > 2, without the square root.
const ESCAPE_RADIUS_SQR: u32 = 4;

/// A point of the complex plane with MPFR components.
#[derive(Clone, Debug, PartialEq)]
pub struct BigPoint {
    /// Real part.
    pub re: Float,
    /// Imaginary part.
    pub im: Float,
}

/// Runs the Mandelbrot iteration on MPFR floats of a fixed precision.
#[derive(Clone, Debug)]
pub struct BigFloatBackend {
    precision: u32,
    delta: Float,
}

impl BigFloatBackend {
    /// A backend working at `precision` bits whose diagonal samples sit
    /// `delta` away from the pixel centre.  Fails if the precision is
    /// outside MPFR's range.
    pub fn new(precision: u32, delta: f64) -> Result<Self, RenderError> {
        if precision < rug::float::prec_min() || precision > rug::float::prec_max() {
            return Err(RenderError::InvalidPrecision(precision));
        }
        Ok(BigFloatBackend {
            precision,
            delta: Float::with_val(precision, delta),
        })
    }

    /// A backend using the configured precision and the fixed delta.
    pub fn for_config(config: &RenderConfig) -> Result<Self, RenderError> {
        BigFloatBackend::new(config.precision, BIGFLOAT_DELTA)
    }

    /// Working precision in bits.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    fn offset(&self, center: &BigPoint, re_sign: i8, im_sign: i8) -> BigPoint {
        let prec = self.precision;
        let shift = |v: &Float, sign: i8| {
            if sign > 0 {
                Float::with_val(prec, v + &self.delta)
            } else {
                Float::with_val(prec, v - &self.delta)
            }
        };
        BigPoint {
            re: shift(&center.re, re_sign),
            im: shift(&center.im, im_sign),
        }
    }
}

impl Backend for BigFloatBackend {
    type Point = BigPoint;
    const NAME: &'static str = "bigfloat";

    fn point(&self, c: Complex<f64>) -> BigPoint {
        BigPoint {
            re: Float::with_val(self.precision, c.re),
            im: Float::with_val(self.precision, c.im),
        }
    }

    fn escape(&self, c: &BigPoint) -> u8 {
        let prec = self.precision;
        let mut re = Float::new(prec);
        let mut im = Float::new(prec);
        for n in 0..ITERATIONS {
            let re2 = Float::with_val(prec, re.square_ref());
            let im2 = Float::with_val(prec, im.square_ref());
            let next_re = Float::with_val(prec, &re2 - &im2) + &c.re;
            let next_im = Float::with_val(prec, &re * &im) * 2u32 + &c.im;
            re = next_re;
            im = next_im;

            let norm = Float::with_val(prec, re.square_ref()) + Float::with_val(prec, im.square_ref());
            if norm > ESCAPE_RADIUS_SQR {
                return n;
            }
        }
        0
    }

    fn diagonals(&self, center: &BigPoint) -> [BigPoint; 4] {
        [
            self.offset(center, 1, 1),
            self.offset(center, 1, -1),
            self.offset(center, -1, -1),
            self.offset(center, -1, 1),
        ]
    }
}
