// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong when carving, replacing or patching.
//!
//! Every failure here is a problem with the caller's input.  All of
//! them are reported before a single pixel is written.

use crate::seam::Orientation;
use failure::Fail;

#[derive(Debug, Fail, Clone, PartialEq)]
pub enum SeamError {
    /// The dimension a seam runs across is already one pixel (or less).
    #[fail(
        display = "cannot take a {} seam from an image {} pixel(s) across",
        orientation, size
    )]
    DimensionTooSmall { orientation: Orientation, size: u32 },

    /// The seam does not have one offset per line of the image.
    #[fail(
        display = "seam not compatible: expected {} offsets, got {}",
        expected, actual
    )]
    SeamLength { expected: usize, actual: usize },

    /// A seam offset points outside its line.
    #[fail(
        display = "seam offset {} on line {} is outside 0..{}",
        offset, line, limit
    )]
    SeamOffset { line: usize, offset: u32, limit: u32 },

    /// Convolution kernels must be square with an odd side.
    #[fail(
        display = "kernel must be square and odd-sided, got {}x{}",
        rows, columns
    )]
    KernelShape { rows: usize, columns: usize },

    /// A donor image must match the image it donates to.
    #[fail(
        display = "donor image is {}x{}, expected {}x{}",
        width, height, expected_width, expected_height
    )]
    DonorSize {
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    /// Carving only ever shrinks an image.
    #[fail(
        display = "seamcarve cannot upscale an image from {}x{} to {}x{}",
        width, height, target_width, target_height
    )]
    Upscale {
        width: u32,
        height: u32,
        target_width: u32,
        target_height: u32,
    },
}
