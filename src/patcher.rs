// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Patch seams back out of an image.
//!
//! The patcher has no list of seams to work from.  It visits every
//! pixel and asks its policy whether that pixel looks like it was
//! replaced, and if so, what it should be put back as.  Neighbors are
//! always read from the image being patched, never from the patched
//! copy, so the order of the scan doesn't matter.
//!
//! Two policies are provided:
//!
//! - `Doppelganger` recomputes the doppelganger encoding from the live
//!   neighbors of each pixel, first as if a horizontal seam ran through
//!   it (north and south), then as if a vertical one did (west and east).
//!   An exact match is replaced with the mean of that pair.
//! - `Swap` is for images whose seams were filled from a donor image.
//!   Any pixel identical to the donor's pixel at the same place is
//!   replaced with the mean of whichever neighbor pair is closer in
//!   luminance.
//!
//! Both will happily "repair" a pixel that was never touched but happens
//! to match.  That's the price of not carrying the seams around.

use crate::doppelganger::{average, disguise, flanks};
use crate::errors::SeamError;
use crate::pixelpairs::luminance_difference;
use crate::seam::Orientation;
use image::{Rgb, RgbImage};
use itertools::iproduct;
use log::debug;

/// How the patcher decides what, if anything, a pixel was.
pub trait PatchPolicy {
    /// Confirm the policy can be used on an image of these dimensions.
    fn check(&self, _dimensions: (u32, u32)) -> Result<(), SeamError> {
        Ok(())
    }

    /// The color to restore at `(x, y)`, or `None` if the pixel is
    /// believed to be original.
    fn restore(&self, image: &RgbImage, x: u32, y: u32) -> Option<Rgb<u8>>;
}

/// Undo doppelganger encoding.
#[derive(Debug, Default, Copy, Clone)]
pub struct Doppelganger;

impl PatchPolicy for Doppelganger {
    fn restore(&self, image: &RgbImage, x: u32, y: u32) -> Option<Rgb<u8>> {
        let actual = *image.get_pixel(x, y);
        [Orientation::Horizontal, Orientation::Vertical]
            .iter()
            .find(|&&orientation| disguise(image, (x, y), orientation) == actual)
            .map(|&orientation| {
                let (before, after) = flanks(image, (x, y), orientation);
                average(before, after)
            })
    }
}

/// Undo a donor swap.
#[derive(Debug, Copy, Clone)]
pub struct Swap<'a> {
    pub donor: &'a RgbImage,
}

impl<'a> Swap<'a> {
    pub fn new(donor: &'a RgbImage) -> Self {
        Swap { donor }
    }
}

impl<'a> PatchPolicy for Swap<'a> {
    fn check(&self, (width, height): (u32, u32)) -> Result<(), SeamError> {
        let (donor_width, donor_height) = self.donor.dimensions();
        if (donor_width, donor_height) != (width, height) {
            return Err(SeamError::DonorSize {
                width: donor_width,
                height: donor_height,
                expected_width: width,
                expected_height: height,
            });
        }
        Ok(())
    }

    fn restore(&self, image: &RgbImage, x: u32, y: u32) -> Option<Rgb<u8>> {
        if image.get_pixel(x, y) != self.donor.get_pixel(x, y) {
            return None;
        }

        let (north, south) = flanks(image, (x, y), Orientation::Horizontal);
        let (west, east) = flanks(image, (x, y), Orientation::Vertical);
        let north_south = luminance_difference(north.as_ref(), south.as_ref());
        let west_east = luminance_difference(west.as_ref(), east.as_ref());
        if west_east < north_south {
            Some(average(west, east))
        } else {
            Some(average(north, south))
        }
    }
}

/// Scans whole images, restoring whatever its policy recognizes.
pub struct SeamPatcher<P: PatchPolicy> {
    policy: P,
}

impl<P: PatchPolicy> SeamPatcher<P> {
    pub fn new(policy: P) -> Self {
        SeamPatcher { policy }
    }

    /// A patched copy of `image`.  The image itself is left alone.
    pub fn patch(&self, image: &RgbImage) -> Result<RgbImage, SeamError> {
        let (width, height) = image.dimensions();
        self.policy.check((width, height))?;

        let mut patched = image.clone();
        let mut restored = 0;
        for (y, x) in iproduct!(0..height, 0..width) {
            if let Some(color) = self.policy.restore(image, x, y) {
                patched.put_pixel(x, y, color);
                restored += 1;
            }
        }
        debug!(
            "patched {} of {} pixels in a {}x{} image",
            restored,
            u64::from(width) * u64::from(height),
            width,
            height
        );
        Ok(patched)
    }
}
