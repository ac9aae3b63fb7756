// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render parameters.  A RenderConfig is built once, validated, and
//! then shared read-only by every pixel of a render; nothing here is
//! process-global.

use crate::errors::RenderError;

/// Default raster width and height.
pub const DEFAULT_SIZE: u32 = 1024;

/// Default working precision, in bits, of the big float backend.
/// Comfortably more than the 53 bits of an f64 so that the sample
/// delta never rounds away against coordinates of magnitude 2.
pub const DEFAULT_PRECISION: u32 = 128;

/// Sample delta of the big float backend: fixed at 0.3/1024, the
/// delta the `f64` backend uses on the default raster, so both
/// backends sample the same sub-pixel offsets there.
pub const BIGFLOAT_DELTA: f64 = 0.3 / DEFAULT_SIZE as f64;

/// How the supersampler treats the centre of the pixel.
///
/// `Diagonal` treats the zoom 1 centre sample as dead computation and
/// skips it.  `CenterSeeded` is what the legacy renderer actually
/// computed: its centre count was never overwritten, and the diagonal
/// averages were added on top of it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SamplePolicy {
    /// Only the four diagonal samples count, at every zoom level.
    Diagonal,
    /// At zoom 1 the accumulator starts from the escape count of the
    /// pixel centre, and the diagonal average is added on top of it.
    /// Matches images produced by the legacy renderer.
    CenterSeeded,
}

impl Default for SamplePolicy {
    fn default() -> Self {
        SamplePolicy::Diagonal
    }
}

/// The resampling factor: how many rounds of four diagonal samples
/// are averaged into each pixel.  Never zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Zoom(u8);

impl Zoom {
    /// Accepts 1 through 255.
    pub fn new(zoom: u8) -> Result<Zoom, RenderError> {
        if zoom == 0 {
            return Err(RenderError::InvalidZoom(zoom));
        }
        Ok(Zoom(zoom))
    }

    /// The raw zoom level.
    pub fn get(self) -> u8 {
        self.0
    }
}

/// Everything a render needs besides the zoom and the backend.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Raster width in pixels.
    pub width: u32,
    /// Raster height in pixels.
    pub height: u32,
    /// Number of worker threads sharing the rows of the raster.
    pub threads: usize,
    /// Mantissa bits of the big float backend.
    pub precision: u32,
    /// Treatment of the pixel centre by the supersampler.
    pub policy: SamplePolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            threads: 1,
            precision: DEFAULT_PRECISION,
            policy: SamplePolicy::default(),
        }
    }
}

impl RenderConfig {
    /// A default configuration for a raster of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        RenderConfig {
            width,
            height,
            ..RenderConfig::default()
        }
    }

    /// Sets the number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the big float working precision.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the centre sample policy.
    pub fn with_policy(mut self, policy: SamplePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Checks every field; called before any pixel is computed.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions(self.width, self.height));
        }
        if self.threads == 0 {
            return Err(RenderError::InvalidThreads(self.threads));
        }
        if self.precision < rug::float::prec_min() || self.precision > rug::float::prec_max() {
            return Err(RenderError::InvalidPrecision(self.precision));
        }
        Ok(())
    }

    /// Sample delta of the fixed precision backend, which shrinks with
    /// the raster so that samples stay inside their pixel.
    pub fn fixed_delta(&self) -> f64 {
        0.3 / f64::from(self.width)
    }
}
