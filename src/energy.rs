// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of an interior pixel is the squared color distance
//! between its left and right neighbors plus the squared color distance
//! between the neighbors above and below it.  Pixels on the border
//! don't have a full set of neighbors, and are assigned the largest
//! energy a single color delta can produce, `3 × 255²`, whatever their
//! actual surroundings look like.
//!
//! Energy grids are generic over the accumulator, so that the same
//! search can be run with exact integers or with floating point.

use crate::pixelpairs::energy_of_pair;
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, GrayImage, ImageBuffer, Luma, Pixel};
use num_traits::{NumCast, Zero};
use std::fmt::Debug;
use std::ops::Add;

/// The energy of every border pixel, and the marker the maximum seam
/// search refuses to chase.
pub const SENTINEL_ENERGY: u32 = 3 * 255 * 255;

/// A numeric type that energy grids and path totals can be kept in.
pub trait Energy: Copy + Debug + PartialOrd + Zero + NumCast + Add<Output = Self> {
    /// Convert the energy of one pixel.  Pixel energies never exceed
    /// `2 × SENTINEL_ENERGY`, so this is lossless for every
    /// implementation below.
    fn from_pixel_energy(energy: u32) -> Self;

    fn sentinel() -> Self {
        Self::from_pixel_energy(SENTINEL_ENERGY)
    }
}

macro_rules! energy_accumulator {
    ($($t:ty),*) => {
        $(
            impl Energy for $t {
                #[inline]
                fn from_pixel_energy(energy: u32) -> Self {
                    energy as $t
                }
            }
        )*
    };
}

// A u32 total can overflow somewhere past ten thousand pixels of path;
// u64 is the one to reach for.
energy_accumulator!(u32, u64, i64, f32, f64);

/// The energy of a single pixel.
pub fn pixel_energy<I, P>(image: &I, x: u32, y: u32) -> u32
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8> + 'static,
{
    let (width, height) = image.dimensions();
    if x == 0 || y == 0 || x + 1 >= width || y + 1 >= height {
        return SENTINEL_ENERGY;
    }

    energy_of_pair(&image.get_pixel(x - 1, y), &image.get_pixel(x + 1, y))
        + energy_of_pair(&image.get_pixel(x, y - 1), &image.get_pixel(x, y + 1))
}

// Image -> Energy Map

/// Compute the energy of every pixel in an image.  Hand it a `Flipper`
/// to get the transposed grid.
pub fn calculate_energy<E, I, P>(image: &I) -> TwoDimensionalMap<E>
where
    E: Energy,
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8> + 'static,
{
    let (width, height) = image.dimensions();
    TwoDimensionalMap::from_fn(width, height, |x, y| {
        E::from_pixel_energy(pixel_energy(image, x, y))
    })
}

/// Render an energy grid as a grayscale picture, normalized so that the
/// most energetic pixel is white.  A grid with no energy at all is
/// black.
pub fn energy_to_image<E: Energy>(energy: &TwoDimensionalMap<E>) -> GrayImage {
    let max = energy
        .cells()
        .iter()
        .filter_map(|e| e.to_f64())
        .fold(0.0, f64::max);

    ImageBuffer::from_fn(energy.width, energy.height, |x, y| {
        if max <= 0.0 {
            return Luma([0]);
        }
        let e = energy[(x, y)].to_f64().unwrap_or(0.0);
        Luma([(e / max * 255.0 + 0.5) as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flipper::Flipper;
    use image::{Rgb, RgbImage};
    use itertools::iproduct;

    const S: u64 = SENTINEL_ENERGY as u64;

    const IMAGE_DATA: [u8; 20] = [9, 9, 0, 9, 9, 9, 1, 9, 8, 9, 9, 9, 9, 9, 0, 9, 9, 9, 0, 9];
    const IMAGE_ENERGY: [u64; 20] = [
        S, S, S, S, S, //
        S, 0, 130, 0, S, //
        S, 64, 0, 145, S, //
        S, S, S, S, S,
    ];

    #[test]
    fn energy_generator_works() {
        let buf: ImageBuffer<Luma<u8>, _> = ImageBuffer::from_raw(5, 4, &IMAGE_DATA[..]).unwrap();
        let energy: TwoDimensionalMap<u64> = calculate_energy(&buf);
        assert_eq!(energy.cells(), &IMAGE_ENERGY[..]);
    }

    #[test]
    fn float_and_integer_grids_agree() {
        let buf: ImageBuffer<Luma<u8>, _> = ImageBuffer::from_raw(5, 4, &IMAGE_DATA[..]).unwrap();
        let exact: TwoDimensionalMap<u64> = calculate_energy(&buf);
        let float: TwoDimensionalMap<f64> = calculate_energy(&buf);
        for (e, f) in exact.cells().iter().zip(float.cells()) {
            assert_eq!(*e as f64, *f);
        }
    }

    #[test]
    fn border_energy_ignores_the_neighbors() {
        let image = RgbImage::from_fn(4, 4, |x, y| Rgb([(x * 60) as u8, (y * 60) as u8, 7]));
        for (x, y) in iproduct!(0..4, 0..4) {
            let e = pixel_energy(&image, x, y);
            if x == 0 || y == 0 || x == 3 || y == 3 {
                assert_eq!(e, SENTINEL_ENERGY);
            } else {
                assert_eq!(e, 120 * 120 * 2);
            }
        }
    }

    #[test]
    fn flipped_energy_is_the_transpose() {
        let buf: ImageBuffer<Luma<u8>, _> = ImageBuffer::from_raw(5, 4, &IMAGE_DATA[..]).unwrap();
        let energy: TwoDimensionalMap<u64> = calculate_energy(&buf);
        let transposed: TwoDimensionalMap<u64> = calculate_energy(&Flipper::new(&buf));
        assert_eq!((transposed.width, transposed.height), (4, 5));
        for (y, x) in iproduct!(0..4, 0..5) {
            assert_eq!(energy[(x, y)], transposed[(y, x)]);
        }
    }

    #[test]
    fn energy_pictures_are_normalized() {
        let grid = TwoDimensionalMap::from_vec(2, 1, vec![10u64, 20]).unwrap();
        let picture = energy_to_image(&grid);
        assert_eq!(picture.get_pixel(0, 0), &Luma([128]));
        assert_eq!(picture.get_pixel(1, 0), &Luma([255]));

        let dark = TwoDimensionalMap::from_vec(2, 1, vec![0u64, 0]).unwrap();
        assert_eq!(energy_to_image(&dark).get_pixel(1, 0), &Luma([0]));
    }
}
