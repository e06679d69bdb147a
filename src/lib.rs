// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// #![deny(missing_docs)]

//! Seam carving, and seam doppelganger encoding.
//!
//! `SeamCarver` finds low (or high) energy seams in an RGB image and
//! either removes them or paints over them.  One of the ways to paint
//! over a seam is the doppelganger encoding, which `SeamPatcher` can
//! later find and undo without being told where the seams were.

extern crate image;

/// A ternary expression.  Redundant, but it keeps the edge (literally)
/// cases of a seam readable.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}

pub mod descent;
pub mod doppelganger;
pub mod energy;
pub mod errors;
pub mod flipper;
pub mod kernel;
pub mod patcher;
pub mod pixelpairs;
pub mod seam;
pub mod seamcarver;
pub mod seamfinder;
pub mod twodmap;

pub use descent::{energy_to_seam, ranked_seams, GreedyDescent};
pub use energy::{calculate_energy, energy_to_image, Energy, SENTINEL_ENERGY};
pub use errors::SeamError;
pub use kernel::Kernel;
pub use patcher::{Doppelganger, PatchPolicy, SeamPatcher, Swap};
pub use seam::{seam_overlay, Extremum, Orientation, Seam};
pub use seamcarver::{Replacement, SeamCarver};
pub use seamfinder::SeamFinder;
pub use twodmap::TwoDimensionalMap;
