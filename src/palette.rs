// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Maps pixel intensities onto a three band ramp: red, then red-green,
//! then red-green-blue.  Channel arithmetic wraps at eight bits.

use image::Rgba;

/// Alpha of every colored band.
pub const BAND_ALPHA: u8 = 240;

/// Opaque black, used for zero intensity and the band edges.
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

const RED_END: u8 = 63;
const GREEN_END: u8 = 126;

/// The color of a pixel of the given intensity.  Intensities of
/// exactly 63 and 126 sit between bands and come out black.
pub fn color_of(p: u8) -> Rgba<u8> {
    let ramp = |v: u8| v.wrapping_mul(4);
    match p {
        _ if p != 0 && p < RED_END => Rgba([ramp(p), 0, 0, BAND_ALPHA]),
        _ if p > RED_END && p < GREEN_END => Rgba([ramp(p), ramp(p - RED_END), 0, BAND_ALPHA]),
        _ if p > GREEN_END => Rgba([ramp(p), ramp(p), ramp(p - GREEN_END), BAND_ALPHA]),
        _ => BLACK,
    }
}
