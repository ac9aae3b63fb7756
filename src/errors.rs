// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type shared by configuration, rendering and encoding.

use failure::Fail;
use std::io;

/// Everything that can go wrong between accepting a configuration and
/// handing the encoded image to the caller's sink.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The raster must be at least one pixel in each direction.
    #[fail(display = "Invalid raster size {}x{}: width and height must be positive", _0, _1)]
    InvalidDimensions(u32, u32),

    /// Zoom feeds a division, so zero is rejected before rendering.
    #[fail(display = "Invalid zoom {}: zoom must be between 1 and 255", _0)]
    InvalidZoom(u8),

    /// At least one worker is required.
    #[fail(display = "Invalid thread count {}: at least one thread is required", _0)]
    InvalidThreads(usize),

    /// Working precision outside what MPFR accepts.
    #[fail(display = "Invalid precision of {} bits for the big float backend", _0)]
    InvalidPrecision(u32),

    /// A render worker died before finishing its rows.
    #[fail(display = "A render worker thread panicked")]
    WorkerPanic,

    /// The pixel buffer did not match the raster it was meant for.
    #[fail(display = "Pixel buffer does not match a {}x{} raster", _0, _1)]
    BufferSize(u32, u32),

    /// The PNG encoder rejected the image or the sink failed.
    #[fail(display = "Could not encode image: {}", _0)]
    Encode(#[cause] image::ImageError),

    /// I/O failure outside the encoder, such as creating the output file.
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::Encode(err)
    }
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        RenderError::Io(err)
    }
}
