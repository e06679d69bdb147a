// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find seams by greedy descent.
//!
//! This is *not* the dynamic program from Avidan & Shamir (2007).
//! Instead, every pixel on the first line is used as a starting point,
//! and from each one the walk goes down the energy grid one line at a
//! time, looking only at the three pixels below it:
//!
//! ```text
//!          (x, y)
//!   (x-1, y+1)  (x, y+1)  (x+1, y+1)
//!       sw          s         se
//! ```
//!
//! It steps toward whichever of the three is strictly the lowest (or,
//! for a maximum search, strictly the highest).  When no single one of
//! them wins outright, the walk goes straight down.  Offsets that fall
//! off the grid never win.  Each walk is totalled, and the best total
//! across all starting points is the seam.  On equal totals the
//! leftmost start is kept.
//!
//! The maximum search has one wrinkle: border pixels carry the sentinel
//! energy, and chasing it would drag every seam onto the edge of the
//! image.  While walking, a sentinel counts as zero.  Totals still use
//! the real grid values.

use crate::energy::{calculate_energy, Energy};
use crate::flipper::Flipper;
use crate::seam::{Extremum, Seam};
use crate::seamfinder::SeamFinder;
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, Pixel};
use log::debug;
use std::cmp::Ordering;
use std::marker::PhantomData;

// Of the three candidates below the current pixel, the index of the one
// that beats both others strictly.  A `None` candidate is off the grid
// and beats nothing.
fn strict_winner<E: Energy>(candidates: &[Option<E>; 3], extremum: Extremum) -> Option<usize> {
    (0..3).find(|&i| match candidates[i] {
        None => false,
        Some(mine) => candidates
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .all(|(_, other)| other.map_or(true, |theirs| extremum.prefers(mine, theirs))),
    })
}

fn step<E: Energy>(energy: &TwoDimensionalMap<E>, x: u32, y: u32, extremum: Extremum) -> u32 {
    let look = |cx: Option<u32>| {
        cx.filter(|cx| *cx < energy.width)
            .map(|cx| energy[(cx, y)])
            .map(|e| match extremum {
                Extremum::Maximum if e == E::sentinel() => E::zero(),
                _ => e,
            })
    };

    let candidates = [look(x.checked_sub(1)), look(Some(x)), look(x.checked_add(1))];
    match strict_winner(&candidates, extremum) {
        Some(0) => x - 1,
        Some(2) => x + 1,
        _ => x,
    }
}

/// Walk the energy grid from `start` on the first line to the last
/// line, returning the offset visited on every line.
pub fn descend<E: Energy>(energy: &TwoDimensionalMap<E>, start: u32, extremum: Extremum) -> Seam {
    let mut x = start;
    (0..energy.height)
        .map(|y| {
            if y > 0 {
                x = step(energy, x, y, extremum);
            }
            x
        })
        .collect()
}

/// The total of the grid values along a seam.
pub fn path_energy<E: Energy>(energy: &TwoDimensionalMap<E>, seam: &[u32]) -> E {
    seam.iter()
        .enumerate()
        .fold(E::zero(), |total, (y, &x)| total + energy[(x, y as u32)])
}

/// Descend from every start and keep the best path.  An empty grid has
/// an empty seam.
pub fn energy_to_seam<E: Energy>(energy: &TwoDimensionalMap<E>, extremum: Extremum) -> Seam {
    let mut best: Option<(E, Seam)> = None;
    for start in 0..energy.width {
        let path = descend(energy, start, extremum);
        let total = path_energy(energy, &path);
        let better = match &best {
            None => true,
            Some((incumbent, _)) => extremum.prefers(total, *incumbent),
        };
        if better {
            best = Some((total, path));
        }
    }

    match best {
        Some((total, seam)) => {
            debug!("{:?} seam with path energy {:?}", extremum, total);
            seam
        }
        None => Vec::new(),
    }
}

/// Every starting point's path with its total, best first.  Paths with
/// equal totals stay in start order.
pub fn ranked_seams<E: Energy>(energy: &TwoDimensionalMap<E>, extremum: Extremum) -> Vec<(E, Seam)> {
    let mut ranked: Vec<(E, Seam)> = (0..energy.width)
        .map(|start| {
            let path = descend(energy, start, extremum);
            (path_energy(energy, &path), path)
        })
        .collect();

    ranked.sort_by(|(a, _), (b, _)| {
        let order = a.partial_cmp(b).unwrap_or(Ordering::Equal);
        match extremum {
            Extremum::Minimum => order,
            Extremum::Maximum => order.reverse(),
        }
    });
    ranked
}

/// The greedy seam engine: an image reference and the accumulator to
/// total energies in.
pub struct GreedyDescent<'a, I, E> {
    image: &'a I,
    accumulator: PhantomData<E>,
}

impl<'a, I, E> GreedyDescent<'a, I, E>
where
    I: GenericImageView,
    E: Energy,
{
    /// Takes a reference to an image, and holds onto it.
    pub fn new(image: &'a I) -> Self {
        GreedyDescent {
            image,
            accumulator: PhantomData,
        }
    }
}

impl<'a, I, P, E> SeamFinder for GreedyDescent<'a, I, E>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8> + 'static,
    E: Energy,
{
    fn horizontal_seam(&self, extremum: Extremum) -> Seam {
        let energy: TwoDimensionalMap<E> = calculate_energy(&Flipper::new(self.image));
        energy_to_seam(&energy, extremum)
    }

    fn vertical_seam(&self, extremum: Extremum) -> Seam {
        let energy: TwoDimensionalMap<E> = calculate_energy(self.image);
        energy_to_seam(&energy, extremum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::SENTINEL_ENERGY;
    use crate::seam::is_connected;
    use image::{ImageBuffer, Luma};

    const S: u64 = SENTINEL_ENERGY as u64;

    const IMAGE_DATA: [u8; 20] = [9, 9, 0, 9, 9, 9, 1, 9, 8, 9, 9, 9, 9, 9, 0, 9, 9, 9, 0, 9];

    fn energies() -> TwoDimensionalMap<u64> {
        TwoDimensionalMap::from_vec(
            5,
            4,
            vec![
                S, S, S, S, S, //
                S, 0, 130, 0, S, //
                S, 64, 0, 145, S, //
                S, S, S, S, S,
            ],
        )
        .unwrap()
    }

    #[test]
    fn walks_toward_the_strictly_lowest_neighbor() {
        let energy = energies();
        assert_eq!(descend(&energy, 0, Extremum::Minimum), [0, 1, 2, 2]);
        assert_eq!(descend(&energy, 4, Extremum::Minimum), [4, 3, 2, 2]);
    }

    #[test]
    fn ties_go_straight_down() {
        // Below (2, 0) sit 0, 130 and 0: no single winner.
        assert_eq!(descend(&energies(), 2, Extremum::Minimum), [2, 2, 2, 2]);
    }

    #[test]
    fn first_start_wins_equal_totals() {
        let energy = energies();
        assert_eq!(path_energy(&energy, &[0, 1, 2, 2]), 2 * S);
        assert_eq!(path_energy(&energy, &[2, 2, 2, 2]), 2 * S + 130);
        assert_eq!(energy_to_seam(&energy, Extremum::Minimum), [0, 1, 2, 2]);
    }

    #[test]
    fn energy_grid_to_horizontal_seam() {
        let buf: ImageBuffer<Luma<u8>, _> = ImageBuffer::from_raw(5, 4, &IMAGE_DATA[..]).unwrap();
        let finder: GreedyDescent<_, u64> = GreedyDescent::new(&buf);
        assert_eq!(finder.horizontal_seam(Extremum::Minimum), [0, 1, 2, 1, 1]);
        assert_eq!(finder.vertical_seam(Extremum::Minimum), [0, 1, 2, 2]);
    }

    #[test]
    fn float_accumulator_finds_the_same_seams() {
        let buf: ImageBuffer<Luma<u8>, _> = ImageBuffer::from_raw(5, 4, &IMAGE_DATA[..]).unwrap();
        let exact: GreedyDescent<_, u64> = GreedyDescent::new(&buf);
        let float: GreedyDescent<_, f64> = GreedyDescent::new(&buf);
        assert_eq!(
            exact.vertical_seam(Extremum::Minimum),
            float.vertical_seam(Extremum::Minimum)
        );
        assert_eq!(
            exact.horizontal_seam(Extremum::Maximum),
            float.horizontal_seam(Extremum::Maximum)
        );
    }

    #[test]
    fn maximum_search_ignores_the_sentinel() {
        let mut energy: TwoDimensionalMap<u64> =
            TwoDimensionalMap::from_vec(5, 5, vec![S; 25]).unwrap();
        energy[(2, 2)] = 300_000;

        // Every sentinel reads as zero on the way down, so only the one
        // real value below can pull a walk sideways.
        assert_eq!(descend(&energy, 1, Extremum::Maximum), [1, 1, 2, 2, 2]);
        assert_eq!(descend(&energy, 0, Extremum::Maximum), [0, 0, 0, 0, 0]);

        let seam = energy_to_seam(&energy, Extremum::Maximum);
        assert_eq!(seam[2], 2);
        assert_eq!(seam, [1, 1, 2, 2, 2]);
    }

    #[test]
    fn every_candidate_is_a_connected_full_length_path() {
        let energy = energies();
        for (_, seam) in ranked_seams(&energy, Extremum::Minimum) {
            assert_eq!(seam.len(), 4);
            assert!(is_connected(&seam));
            assert!(seam.iter().all(|&x| x < 5));
        }
    }

    #[test]
    fn ranked_seams_are_best_first() {
        let energy = energies();
        let ranked = ranked_seams(&energy, Extremum::Minimum);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0], (2 * S, vec![0, 1, 2, 2]));
        assert_eq!(ranked[4], (2 * S + 130, vec![2, 2, 2, 2]));

        let ranked = ranked_seams(&energy, Extremum::Maximum);
        assert_eq!(ranked[0].1, energy_to_seam(&energy, Extremum::Maximum));
    }

    #[test]
    fn empty_grids_have_empty_seams() {
        let energy: TwoDimensionalMap<u64> =
            TwoDimensionalMap::from_vec(0, 3, Vec::new()).unwrap();
        assert!(energy_to_seam(&energy, Extremum::Minimum).is_empty());
    }
}
