// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the distance between a pixel pair
//!
//! Given two pixels, the energy between them is the squared distance
//! between the colors that make them up:
//!
//! ```text
//!        |Δ|² = (Δr)²+(Δg)²+(Δb)²
//! ```
//!
//! The luminance helpers are used by the swap patcher to decide which
//! pair of neighbors is the better match.

use image::{Pixel, Rgb};

/// (Pixel, Pixel) -> Energy
///
/// Works on any 8-bit pixel; a grayscale pixel has one channel to
/// compare, an RGB pixel three.
#[inline]
pub fn energy_of_pair<P>(p1: &P, p2: &P) -> u32
where
    P: Pixel<Subpixel = u8> + 'static,
{
    p1.channels()
        .iter()
        .zip(p2.channels())
        .map(|(c1, c2)| {
            let delta = i32::from(*c1) - i32::from(*c2);
            (delta * delta) as u32
        })
        .sum()
}

/// The NTSC luminance of a color, `0.299r + 0.587g + 0.114b`.  A shade
/// of gray returns its exact channel value.
pub fn luminance(color: &Rgb<u8>) -> f64 {
    let Rgb([r, g, b]) = *color;
    if r == g && r == b {
        return f64::from(r);
    }
    0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)
}

/// How far apart two neighbors are in brightness.  A missing neighbor
/// leaves only the other's luminance; no neighbors at all is no
/// difference.
pub fn luminance_difference(c1: Option<&Rgb<u8>>, c2: Option<&Rgb<u8>>) -> f64 {
    match (c1, c2) {
        (Some(c1), Some(c2)) => (luminance(c1) - luminance(c2)).abs(),
        (Some(c), None) | (None, Some(c)) => luminance(c),
        (None, None) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn rgb_pairs_sum_all_three_channels() {
        let (p1, p2) = (Rgb([255u8, 0, 10]), Rgb([0u8, 255, 0]));
        assert_eq!(energy_of_pair(&p1, &p2), 255 * 255 * 2 + 100);
        assert_eq!(energy_of_pair(&p1, &p1), 0);
    }

    #[test]
    fn luma_pairs_use_one_channel() {
        assert_eq!(energy_of_pair(&Luma([9u8]), &Luma([1u8])), 64);
    }

    #[test]
    fn grays_have_exact_luminance() {
        assert_eq!(luminance(&Rgb([77, 77, 77])), 77.0);
        assert!((luminance(&Rgb([255, 0, 0])) - 76.245).abs() < 1e-9);
    }

    #[test]
    fn missing_neighbors_fall_back_to_the_other() {
        let white = Rgb([255, 255, 255]);
        assert_eq!(luminance_difference(Some(&white), None), 255.0);
        assert_eq!(luminance_difference(None, None), 0.0);
        assert_eq!(luminance_difference(Some(&white), Some(&white)), 0.0);
    }
}
