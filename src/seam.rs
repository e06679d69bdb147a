// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seams, and the two ways they can run across an image.
//!
//! A seam is one offset per line.  A vertical seam runs top to bottom,
//! so it has one x-coordinate per row; a horizontal seam runs left to
//! right, with one y-coordinate per column.

use crate::errors::SeamError;
use image::{Rgb, RgbImage};
use itertools::Itertools;
use std::fmt;

/// The offsets of a seam, indexed by line.
pub type Seam = Vec<u32>;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Orientation {
    /// Left to right; removing one shrinks the height.
    Horizontal,
    /// Top to bottom; removing one shrinks the width.
    Vertical,
}

impl Orientation {
    pub fn turn(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Image coordinates of the pixel at `offset` on seam line `line`.
    #[inline]
    pub fn point(self, line: u32, offset: u32) -> (u32, u32) {
        match self {
            Orientation::Horizontal => (line, offset),
            Orientation::Vertical => (offset, line),
        }
    }

    /// How many lines a seam of this orientation crosses in an image of
    /// the given dimensions.  This is also the length of the seam.
    #[inline]
    pub fn lines(self, (width, height): (u32, u32)) -> u32 {
        match self {
            Orientation::Horizontal => width,
            Orientation::Vertical => height,
        }
    }

    /// The length of each line: the dimension a removal shrinks.
    #[inline]
    pub fn span(self, (width, height): (u32, u32)) -> u32 {
        match self {
            Orientation::Horizontal => height,
            Orientation::Vertical => width,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "horizontal"),
            Orientation::Vertical => write!(f, "vertical"),
        }
    }
}

/// Which end of the energy scale a seam search is after.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Extremum {
    Minimum,
    Maximum,
}

impl Extremum {
    /// True if `candidate` is strictly better than `incumbent`.
    #[inline]
    pub fn prefers<E: PartialOrd>(self, candidate: E, incumbent: E) -> bool {
        match self {
            Extremum::Minimum => candidate < incumbent,
            Extremum::Maximum => candidate > incumbent,
        }
    }
}

/// Confirm a seam can be taken out of (or painted onto) an image of the
/// given dimensions.
pub fn check_seam(
    seam: &[u32],
    orientation: Orientation,
    dimensions: (u32, u32),
) -> Result<(), SeamError> {
    let span = orientation.span(dimensions);
    if span <= 1 {
        return Err(SeamError::DimensionTooSmall {
            orientation,
            size: span,
        });
    }

    let lines = orientation.lines(dimensions) as usize;
    if seam.len() != lines {
        return Err(SeamError::SeamLength {
            expected: lines,
            actual: seam.len(),
        });
    }

    match seam.iter().enumerate().find(|&(_, &offset)| offset >= span) {
        Some((line, &offset)) => Err(SeamError::SeamOffset {
            line,
            offset,
            limit: span,
        }),
        None => Ok(()),
    }
}

/// True if every step of the seam moves at most one pixel sideways.
pub fn is_connected(seam: &[u32]) -> bool {
    seam.iter()
        .tuple_windows()
        .all(|(a, b)| (i64::from(*a) - i64::from(*b)).abs() <= 1)
}

/// A copy of `image` with the seam painted red.  Handy for seeing
/// where the search went.
pub fn seam_overlay(image: &RgbImage, seam: &[u32], orientation: Orientation) -> RgbImage {
    let mut overlaid = image.clone();
    let span = orientation.span(image.dimensions());
    for (line, &offset) in seam.iter().enumerate() {
        if offset < span {
            let (x, y) = orientation.point(line as u32, offset);
            overlaid.put_pixel(x, y, Rgb([255, 0, 0]));
        }
    }
    overlaid
}
