// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a raster with an origin at 0,0 and the fixed viewport on
//! the complex plane that the raster depicts.
use num::Complex;

use crate::errors::RenderError;

/// Describes the left-lower and right-upper corners of a region of
/// the Complex plane, treating the real part of each value as the
/// x-component and the imaginary part of each value as the
/// y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

/// The region of the complex plane every render depicts: [-2,2] on
/// both axes.
pub const VIEWPORT: ComplexPlane = ComplexPlane(
    Complex { re: -2.0, im: -2.0 },
    Complex { re: 2.0, im: 2.0 },
);

/// Describes the column, row of a pixel in the raster.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub u32, pub u32);

/// Maps pixels of a width x height raster onto the viewport.
#[derive(Debug)]
pub struct PlaneMapper {
    /// Width and height of the raster.
    pub raster: (u32, u32),
    /// The region of the complex plane the raster covers.
    pub complex_plane: ComplexPlane,
    // Width and height of the complex region.
    extent: (f64, f64),
}

impl PlaneMapper {
    /// Builds a mapper for a raster of the given size over the fixed
    /// viewport.  Both dimensions must be positive.
    pub fn new(width: u32, height: u32) -> Result<PlaneMapper, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions(width, height));
        }

        let ComplexPlane(leftlower, rightupper) = VIEWPORT;
        Ok(PlaneMapper {
            raster: (width, height),
            complex_plane: VIEWPORT,
            extent: (rightupper.re - leftlower.re, rightupper.im - leftlower.im),
        })
    }

    /// The total number of pixels in the raster.
    pub fn len(&self) -> usize {
        self.raster.0 as usize * self.raster.1 as usize
    }

    /// Describes that the raster is of a size.
    pub fn is_empty(&self) -> bool {
        self.raster.0 == 0 || self.raster.1 == 0
    }

    /// Given a pixel of the raster, return the point on the complex
    /// plane it stands for.  The division happens before the scaling
    /// so that the result matches `px / width * 4 - 2` exactly.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let origin = self.complex_plane.0;
        Complex::new(
            (pixel.0 as f64) / (self.raster.0 as f64) * self.extent.0 + origin.re,
            (pixel.1 as f64) / (self.raster.1 as f64) * self.extent.1 + origin.im,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planemapper_fails_on_empty_raster() {
        assert!(PlaneMapper::new(0, 4).is_err());
        assert!(PlaneMapper::new(4, 0).is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 4).unwrap();
        assert_eq!(pm.len(), 16);
        assert!(!pm.is_empty());
    }

    #[test]
    fn pixel_to_points_on_small_raster() {
        let pm = PlaneMapper::new(4, 4).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 1)), Complex::new(1.0, -1.0));
    }

    #[test]
    fn pixel_to_points_on_rectangular_raster() {
        let pm = PlaneMapper::new(640, 320).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(320, 160)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(480, 80)), Complex::new(1.0, -1.0));
    }

    #[test]
    fn pixel_to_point_stays_inside_viewport_and_is_monotonic() {
        let pm = PlaneMapper::new(1024, 768).unwrap();
        let ComplexPlane(ll, ru) = VIEWPORT;

        let mut last = f64::NEG_INFINITY;
        for px in 0..1024 {
            let p = pm.pixel_to_point(&Pixel(px, 0));
            assert!(p.re >= ll.re && p.re < ru.re);
            assert!(p.re > last);
            last = p.re;
        }

        let mut last = f64::NEG_INFINITY;
        for py in 0..768 {
            let p = pm.pixel_to_point(&Pixel(0, py));
            assert!(p.im >= ll.im && p.im < ru.im);
            assert!(p.im > last);
            last = p.im;
        }
    }
}
