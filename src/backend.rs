// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The contract shared by the numeric backends, and the supersampler
//! that sits on top of it.
//!
//! A backend knows how to represent a point of the complex plane, how
//! to run the escape-time iteration on such a point, and how to
//! perturb a pixel centre into its four diagonal samples.  Everything
//! else, in particular the 8-bit averaging arithmetic, lives here so
//! that the backends cannot drift apart.

use num::Complex;

use crate::config::{SamplePolicy, Zoom};

/// Upper bound on the escape-time iteration.  Escape counts are
/// always below this.
pub const ITERATIONS: u8 = 200;

/// A numeric representation of the complex plane able to run the
/// Mandelbrot iteration.
pub trait Backend: Sync {
    /// A point of the complex plane in this backend's precision.
    type Point;

    /// Short name, used in logs.
    const NAME: &'static str;

    /// Lifts a viewport coordinate into this backend.
    fn point(&self, c: Complex<f64>) -> Self::Point;

    /// Iterates `v = v*v + c` from zero and returns the iteration on
    /// which `|v|` first exceeded 2.  Points that never escape within
    /// [`ITERATIONS`] also return 0, so 0 means either "escaped at
    /// once" or "inside the set".
    fn escape(&self, c: &Self::Point) -> u8;

    /// The four samples around `center`, in the order
    /// (x+d, y+d), (x+d, y-d), (x-d, y-d), (x-d, y+d).
    fn diagonals(&self, center: &Self::Point) -> [Self::Point; 4];

    /// Supersampled intensity of the pixel whose centre is `c`.
    fn sample(&self, c: Complex<f64>, zoom: Zoom, policy: SamplePolicy) -> u8
    where
        Self: Sized,
    {
        supersample(self, &self.point(c), zoom, policy)
    }
}

/// Averages the four diagonal escape counts around `center`, `zoom`
/// times over, into one intensity.
///
/// All arithmetic is on `u8` and wraps: the four counts are summed
/// modulo 256 before the floor division by four, the per-round
/// averages are accumulated modulo 256, and the total is floor-divided
/// by the zoom.  Images from the legacy renderer depend on this.
pub fn supersample<B: Backend>(
    backend: &B,
    center: &B::Point,
    zoom: Zoom,
    policy: SamplePolicy,
) -> u8 {
    let rounds = zoom.get();
    let mut p: u8 = match policy {
        SamplePolicy::CenterSeeded if rounds == 1 => backend.escape(center),
        _ => 0,
    };

    let diagonals = backend.diagonals(center);
    for _ in 0..rounds {
        let sum = diagonals
            .iter()
            .fold(0u8, |acc, d| acc.wrapping_add(backend.escape(d)));
        p = p.wrapping_add(sum / 4);
    }
    p / rounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Answers fixed escape counts: `center` for the pixel centre and
    // `corners[i]` for the i-th diagonal.
    struct Stub {
        center: u8,
        corners: [u8; 4],
        center_calls: AtomicUsize,
    }

    impl Stub {
        fn new(center: u8, corners: [u8; 4]) -> Self {
            Stub {
                center,
                corners,
                center_calls: AtomicUsize::new(0),
            }
        }
    }

    impl Backend for Stub {
        type Point = Option<usize>;
        const NAME: &'static str = "stub";

        fn point(&self, _c: Complex<f64>) -> Option<usize> {
            None
        }

        fn escape(&self, c: &Option<usize>) -> u8 {
            match *c {
                Some(i) => self.corners[i],
                None => {
                    self.center_calls.fetch_add(1, Ordering::SeqCst);
                    self.center
                }
            }
        }

        fn diagonals(&self, _center: &Option<usize>) -> [Option<usize>; 4] {
            [Some(0), Some(1), Some(2), Some(3)]
        }
    }

    fn zoom(z: u8) -> Zoom {
        Zoom::new(z).unwrap()
    }

    fn origin() -> Complex<f64> {
        Complex::new(0.0, 0.0)
    }

    #[test]
    fn average_floors_the_remainder() {
        let stub = Stub::new(0, [1, 2, 3, 5]);
        assert_eq!(stub.sample(origin(), zoom(1), SamplePolicy::Diagonal), 2);
    }

    #[test]
    fn corner_sum_wraps_before_division() {
        // 4 * 100 = 400, which is 144 in eight bits.
        let stub = Stub::new(0, [100; 4]);
        assert_eq!(stub.sample(origin(), zoom(1), SamplePolicy::Diagonal), 36);
        assert_eq!(stub.sample(origin(), zoom(3), SamplePolicy::Diagonal), 36);
    }

    #[test]
    fn accumulator_wraps_across_rounds() {
        // 36 * 255 = 9180, which is 220 in eight bits; 220 / 255 = 0.
        let stub = Stub::new(0, [100; 4]);
        assert_eq!(stub.sample(origin(), zoom(255), SamplePolicy::Diagonal), 0);

        let stub = Stub::new(0, [1; 4]);
        assert_eq!(stub.sample(origin(), zoom(255), SamplePolicy::Diagonal), 1);
    }

    #[test]
    fn diagonal_policy_never_evaluates_the_centre() {
        let stub = Stub::new(50, [4; 4]);
        assert_eq!(stub.sample(origin(), zoom(1), SamplePolicy::Diagonal), 4);
        assert_eq!(stub.center_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn centre_seeds_the_accumulator_only_at_zoom_one() {
        let stub = Stub::new(7, [4; 4]);
        assert_eq!(stub.sample(origin(), zoom(1), SamplePolicy::CenterSeeded), 11);
        assert_eq!(stub.center_calls.load(Ordering::SeqCst), 1);

        assert_eq!(stub.sample(origin(), zoom(2), SamplePolicy::CenterSeeded), 4);
        assert_eq!(stub.center_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn centre_seed_wraps() {
        let stub = Stub::new(199, [150; 4]);
        // 600 wraps to 88, 88 / 4 = 22, 199 + 22 = 221.
        assert_eq!(stub.sample(origin(), zoom(1), SamplePolicy::CenterSeeded), 221);
    }

    #[test]
    fn intensity_stays_below_iteration_bound() {
        let mut rng = StdRng::seed_from_u64(0x6d61_6e64);
        for _ in 0..2000 {
            let corners = [
                rng.gen_range(0..ITERATIONS),
                rng.gen_range(0..ITERATIONS),
                rng.gen_range(0..ITERATIONS),
                rng.gen_range(0..ITERATIONS),
            ];
            let stub = Stub::new(0, corners);
            let z = zoom(rng.gen_range(1..=255));
            assert!(stub.sample(origin(), z, SamplePolicy::Diagonal) < ITERATIONS);
        }
    }
}
