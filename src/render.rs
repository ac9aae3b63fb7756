// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Walks every pixel of the raster, samples it through a backend, and
//! colors it.  The pixels do not depend on one another, so the
//! threaded renderer simply hands rows out to workers until none are
//! left.

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgba, RgbaImage};
use itertools::iproduct;
use std::io::Write;
use std::iter::Enumerate;
use std::slice::ChunksMut;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, trace};

use crate::backend::Backend;
use crate::config::{RenderConfig, SamplePolicy, Zoom};
use crate::errors::RenderError;
use crate::palette::color_of;
use crate::planes::{Pixel, PlaneMapper};

const CHANNELS: usize = 4;

type RowQueue<'a> = Arc<Mutex<Enumerate<ChunksMut<'a, u8>>>>;

/// A validated render job: the raster, the zoom, the sample policy,
/// and the backend doing the arithmetic.  Once built it is not
/// mutated, so it can be shared between worker threads.
pub struct Renderer<B: Backend> {
    plane: PlaneMapper,
    backend: B,
    zoom: Zoom,
    policy: SamplePolicy,
}

impl<B: Backend> Renderer<B> {
    /// Validates the configuration and zoom before any pixel is
    /// computed.
    pub fn new(config: &RenderConfig, zoom: u8, backend: B) -> Result<Self, RenderError> {
        config.validate()?;
        Ok(Renderer {
            plane: PlaneMapper::new(config.width, config.height)?,
            backend,
            zoom: Zoom::new(zoom)?,
            policy: config.policy,
        })
    }

    /// The backend doing the arithmetic.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The color of a single pixel.
    pub fn color_at(&self, pixel: &Pixel) -> Rgba<u8> {
        let c = self.plane.pixel_to_point(pixel);
        color_of(self.backend.sample(c, self.zoom, self.policy))
    }

    fn render_row(&self, py: u32, row: &mut [u8]) {
        for (px, out) in row.chunks_mut(CHANNELS).enumerate() {
            out.copy_from_slice(&self.color_at(&Pixel(px as u32, py)).0);
        }
    }

    /// The reference scan: one thread, row by row, left to right.
    pub fn render_single(&self) -> RgbaImage {
        let (width, height) = self.plane.raster;
        debug!(backend = B::NAME, width, height, zoom = self.zoom.get(), "rendering");
        let started = Instant::now();

        let mut img = RgbaImage::new(width, height);
        for (py, px) in iproduct!(0..height, 0..width) {
            img.put_pixel(px, py, self.color_at(&Pixel(px, py)));
        }

        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "render finished");
        img
    }

    /// Renders with `threads` workers pulling rows from a shared queue.
    /// Each row is written by exactly one worker, so the result is
    /// identical to `render_single`.
    pub fn render(&self, threads: usize) -> Result<RgbaImage, RenderError> {
        if threads == 0 {
            return Err(RenderError::InvalidThreads(threads));
        }
        let (width, height) = self.plane.raster;
        debug!(backend = B::NAME, width, height, zoom = self.zoom.get(), threads, "rendering");
        let started = Instant::now();

        let mut buffer = vec![0 as u8; self.plane.len() * CHANNELS];
        {
            let rows: RowQueue = Arc::new(Mutex::new(
                buffer.chunks_mut(width as usize * CHANNELS).enumerate(),
            ));
            crossbeam::scope(|spawner| {
                for worker in 0..threads {
                    let rows = rows.clone();
                    spawner.spawn(move |_| {
                        let mut done = 0;
                        loop {
                            // A poisoned queue means another worker died;
                            // the scope reports that, so just stop.
                            let row = match rows.lock() {
                                Ok(mut rows) => rows.next(),
                                Err(_) => None,
                            };
                            match row {
                                Some((py, row)) => {
                                    self.render_row(py as u32, row);
                                    done += 1;
                                }
                                None => {
                                    break;
                                }
                            }
                        }
                        trace!(worker, rows = done, "worker finished");
                    });
                }
            })
            .map_err(|_| RenderError::WorkerPanic)?;
        }

        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "render finished");
        RgbaImage::from_raw(width, height, buffer).ok_or(RenderError::BufferSize(width, height))
    }
}

/// Hands a finished image to the PNG encoder, writing into `sink`.
/// Failures of the encoder or of the sink are returned, not dropped.
pub fn write_png<W: Write>(sink: W, img: &RgbaImage) -> Result<(), RenderError> {
    let (width, height) = img.dimensions();
    PngEncoder::new(sink).write_image(img.as_raw(), width, height, ColorType::Rgba8)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::ComplexBackend;
    use crate::palette::BLACK;

    fn renderer(width: u32, height: u32, zoom: u8) -> Renderer<ComplexBackend> {
        let config = RenderConfig::new(width, height);
        Renderer::new(&config, zoom, ComplexBackend::for_config(&config)).unwrap()
    }

    #[test]
    fn renderer_rejects_bad_input() {
        let config = RenderConfig::new(4, 4);
        let backend = ComplexBackend::for_config(&config);
        assert!(Renderer::new(&config, 0, backend).is_err());
        assert!(Renderer::new(&RenderConfig::new(0, 4), 1, backend).is_err());
        assert!(renderer(4, 4, 1).render(0).is_err());
    }

    #[test]
    fn single_render_has_raster_size() {
        let img = renderer(6, 3, 1).render_single();
        assert_eq!(img.dimensions(), (6, 3));
    }

    #[test]
    fn origin_is_black() {
        let r = renderer(4, 4, 1);
        assert_eq!(r.color_at(&Pixel(2, 2)), BLACK);
    }

    #[test]
    fn threaded_render_matches_single() {
        let r = renderer(17, 9, 2);
        let single = r.render_single();
        for threads in 1..5 {
            assert_eq!(r.render(threads).unwrap(), single);
        }
    }

    #[test]
    fn more_threads_than_rows() {
        let r = renderer(5, 2, 1);
        assert_eq!(r.render(8).unwrap(), r.render_single());
    }

    #[test]
    fn png_is_written() {
        let img = renderer(4, 4, 1).render_single();
        let mut out: Vec<u8> = Vec::new();
        write_png(&mut out, &img).unwrap();
        assert_eq!(&out[1..4], b"PNG");
    }
}
