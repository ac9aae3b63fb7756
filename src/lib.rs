#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which iterating `v = v*v + c`, starting from zero, stays
//! bounded.  Points outside the set escape past a radius of 2 after
//! some number of iterations; that count is the "escape time", and it
//! is the number used to color the image.
//!
//! Each pixel is supersampled: four points sitting diagonally around
//! the pixel centre are iterated, their escape times averaged, and the
//! averaging repeated `zoom` times.  The result is mapped onto a three
//! band color ramp and the finished raster is encoded as a PNG.
//!
//! Two numeric backends do the iterating.  [`ComplexBackend`] uses
//! `f64` complex numbers; [`BigFloatBackend`] uses MPFR floats of a
//! configurable precision.  Both sit behind the [`Backend`] trait, so
//! the sampling and coloring code is shared.

pub mod backend;
pub mod bigfloat;
pub mod complex;
pub mod config;
pub mod errors;
pub mod palette;
pub mod planes;
pub mod render;

pub use backend::{supersample, Backend, ITERATIONS};
pub use bigfloat::{BigFloatBackend, BigPoint};
pub use complex::ComplexBackend;
pub use config::{RenderConfig, SamplePolicy, Zoom};
pub use errors::RenderError;
pub use palette::color_of;
pub use planes::{Pixel, PlaneMapper};
pub use render::{write_png, Renderer};

use std::io::Write;

fn render_with<B: Backend, W: Write>(
    sink: W,
    config: &RenderConfig,
    zoom: u8,
    backend: B,
) -> Result<(), RenderError> {
    let renderer = Renderer::new(config, zoom, backend)?;
    let img = renderer.render(config.threads)?;
    write_png(sink, &img)
}

/// Renders the set with the `f64` backend and writes it to `sink` as
/// a PNG.
pub fn render_complex<W: Write>(sink: W, config: &RenderConfig, zoom: u8) -> Result<(), RenderError> {
    config.validate()?;
    render_with(sink, config, zoom, ComplexBackend::for_config(config))
}

/// Renders the set with the MPFR backend at `config.precision` bits and
/// writes it to `sink` as a PNG.
pub fn render_bigfloat<W: Write>(sink: W, config: &RenderConfig, zoom: u8) -> Result<(), RenderError> {
    config.validate()?;
    render_with(sink, config, zoom, BigFloatBackend::for_config(config)?)
}
