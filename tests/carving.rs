// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seamdoppel::doppelganger::average;
use seamdoppel::{
    calculate_energy, ranked_seams, Doppelganger, Extremum, Orientation, Replacement, SeamCarver,
    SeamError, SeamPatcher, SENTINEL_ENERGY,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn noise(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    RgbImage::from_fn(width, height, |_, _| Rgb([rng.gen(), rng.gen(), rng.gen()]))
}

#[test]
fn solid_images_carve_from_the_first_interior_column() {
    init();
    let carver = SeamCarver::new(&RgbImage::from_pixel(5, 5, Rgb([37, 120, 200])));
    // Every start totals two sentinels.  The leftmost start steps
    // into the interior on its first move and never leaves it.
    assert_eq!(carver.find_minimum_vertical_seam(), [0, 1, 1, 1, 1]);
    assert_eq!(carver.find_minimum_horizontal_seam(), [0, 1, 1, 1, 1]);
}

#[test]
fn maximum_seams_head_the_ranking() {
    init();
    let source = noise(9, 7, 11);
    let carver = SeamCarver::new(&source);
    let energy = calculate_energy::<u64, _, _>(&source);
    let ranked = ranked_seams(&energy, Extremum::Maximum);
    assert_eq!(carver.find_maximum_vertical_seam(), ranked[0].1);
    assert!(ranked.windows(2).all(|pair| pair[0].0 >= pair[1].0));
    // The first and last rows are border, whatever the path.
    assert!(ranked[0].0 >= 2 * u64::from(SENTINEL_ENERGY));
}

#[test]
fn removal_shrinks_one_line_at_a_time() {
    init();
    let mut carver = SeamCarver::new(&noise(6, 4, 1));
    for expected in (1..6).rev() {
        let seam = carver.find_minimum_vertical_seam();
        carver.remove_vertical_seam(&seam).unwrap();
        assert_eq!(carver.picture().dimensions(), (expected, 4));
    }

    let before = carver.picture().clone();
    assert_eq!(
        carver.remove_vertical_seam(&[0, 0, 0, 0]),
        Err(SeamError::DimensionTooSmall {
            orientation: Orientation::Vertical,
            size: 1
        })
    );
    assert_eq!(carver.picture(), &before);

    let seam = carver.find_minimum_horizontal_seam();
    assert_eq!(seam, [0]);
    carver.remove_horizontal_seam(&seam).unwrap();
    assert_eq!(carver.picture().dimensions(), (1, 3));
}

#[test]
fn encoded_black_seams_decode_to_black() {
    init();
    let mut carver = SeamCarver::new(&RgbImage::from_pixel(3, 3, Rgb([0, 0, 0])));
    carver
        .replace_seam(&[2, 2, 2], Orientation::Vertical, Replacement::Doppelganger)
        .unwrap();
    assert_eq!(*carver.picture().get_pixel(2, 1), Rgb([1, 1, 1]));

    let patched = SeamPatcher::new(Doppelganger).patch(carver.picture()).unwrap();
    assert_eq!(patched, RgbImage::from_pixel(3, 3, Rgb([0, 0, 0])));
}

#[test]
fn horizontal_seams_decode_to_their_neighbors() {
    init();
    let mut carver = SeamCarver::new(&noise(12, 9, 42));
    let seam = carver.find_minimum_horizontal_seam();
    carver.encode_seam(&seam, Orientation::Horizontal).unwrap();
    let encoded = carver.picture();

    let patched = SeamPatcher::new(Doppelganger).patch(encoded).unwrap();
    for (x, &y) in seam.iter().enumerate() {
        let x = x as u32;
        let north = if y > 0 { Some(*encoded.get_pixel(x, y - 1)) } else { None };
        let south = if y + 1 < 9 { Some(*encoded.get_pixel(x, y + 1)) } else { None };
        assert_eq!(*patched.get_pixel(x, y), average(north, south));
    }
}

#[test]
fn vertical_seams_decode_to_their_neighbors() {
    init();
    let mut carver = SeamCarver::new(&noise(9, 12, 17));
    let seam = carver.find_minimum_vertical_seam();
    carver.encode_seam(&seam, Orientation::Vertical).unwrap();
    let encoded = carver.picture();

    let patched = SeamPatcher::new(Doppelganger).patch(encoded).unwrap();
    for (y, &x) in seam.iter().enumerate() {
        let y = y as u32;
        let west = if x > 0 { Some(*encoded.get_pixel(x - 1, y)) } else { None };
        let east = if x + 1 < 9 { Some(*encoded.get_pixel(x + 1, y)) } else { None };
        assert_eq!(*patched.get_pixel(x, y), average(west, east));
    }
}

#[test]
fn replacement_runs_leave_the_size_alone() {
    init();
    let source = noise(10, 8, 5);
    let donor = RgbImage::from_pixel(10, 8, Rgb([0, 255, 0]));
    let mut carver = SeamCarver::new(&source).with_seed(9);
    carver
        .replace_seams(2, 2, Extremum::Minimum, Replacement::Swap(&donor))
        .unwrap();
    assert_eq!(carver.picture().dimensions(), (10, 8));
    let mut swapped = 0;
    for (x, y, pixel) in carver.picture().enumerate_pixels() {
        if pixel == donor.get_pixel(x, y) {
            swapped += 1;
        } else {
            assert_eq!(pixel, source.get_pixel(x, y));
        }
    }
    // At least one full row, at most two rows and two columns.
    assert!(swapped >= 10 && swapped <= 36);
}

#[test]
fn mismatched_seams_are_rejected_without_changes() {
    init();
    let source = noise(4, 3, 3);
    let mut carver = SeamCarver::new(&source);
    assert_eq!(
        carver.replace_seam(&[0, 1], Orientation::Vertical, Replacement::Noise),
        Err(SeamError::SeamLength {
            expected: 3,
            actual: 2
        })
    );
    assert_eq!(
        carver.remove_horizontal_seam(&[0, 1, 2, 3]),
        Err(SeamError::SeamOffset {
            line: 3,
            offset: 3,
            limit: 3
        })
    );
    assert_eq!(carver.picture(), &source);
}
