// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam doppelganger encoding
//!
//! A seam pixel is replaced by a color derived from the two pixels on
//! either side of the seam (north and south of a horizontal seam, west
//! and east of a vertical one) and from its position along the seam.
//! The channels are rotated and masked with `SEAM_MASK`:
//!
//! ```text
//!   red   = (before.blue  + after.green + position) & 0xC5
//!   green = (before.red   + after.blue  + position) & 0xC5
//!   blue  = (before.green + after.red   + position) & 0xC5
//! ```
//!
//! where `position` is the column for a horizontal seam and the row for
//! a vertical one.  A neighbor that falls off the image reads as black.
//!
//! Nothing about the seam itself is kept, so the decoder can't replay
//! anything: it recomputes the formula from whatever is around every
//! pixel and looks for exact matches.  See `patcher`.

use crate::seam::Orientation;
use image::{GenericImageView, Rgb};

/// `1100 0101`, applied to every channel.
pub const SEAM_MASK: u8 = 0xC5;

#[inline]
fn channels(pixel: Option<Rgb<u8>>) -> [u32; 3] {
    match pixel {
        Some(Rgb([r, g, b])) => [u32::from(r), u32::from(g), u32::from(b)],
        None => [0, 0, 0],
    }
}

/// The doppelganger of a pixel sitting between `before` and `after` at
/// `position`.
pub fn encode(before: Option<Rgb<u8>>, after: Option<Rgb<u8>>, position: u32) -> Rgb<u8> {
    let [br, bg, bb] = channels(before);
    let [ar, ag, ab] = channels(after);
    // Only the low byte survives the mask, so wrapping is harmless.
    let mask = |a: u32, b: u32| {
        (a.wrapping_add(b).wrapping_add(position) & u32::from(SEAM_MASK)) as u8
    };
    Rgb([mask(bb, ag), mask(br, ab), mask(bg, ar)])
}

/// The channel-wise mean of two neighbors, rounded down.  A missing
/// neighbor counts as black.
pub fn average(before: Option<Rgb<u8>>, after: Option<Rgb<u8>>) -> Rgb<u8> {
    let [br, bg, bb] = channels(before);
    let [ar, ag, ab] = channels(after);
    Rgb([
        ((br + ar) / 2) as u8,
        ((bg + ag) / 2) as u8,
        ((bb + ab) / 2) as u8,
    ])
}

/// The two pixels across a seam of the given orientation passing
/// through `(x, y)`: north and south of a horizontal seam, west and east
/// of a vertical one.
pub fn flanks<I>(
    image: &I,
    (x, y): (u32, u32),
    orientation: Orientation,
) -> (Option<Rgb<u8>>, Option<Rgb<u8>>)
where
    I: GenericImageView<Pixel = Rgb<u8>>,
{
    let (width, height) = image.dimensions();
    match orientation {
        Orientation::Horizontal => (
            cq!(y > 0, Some(image.get_pixel(x, y - 1)), None),
            cq!(y + 1 < height, Some(image.get_pixel(x, y + 1)), None),
        ),
        Orientation::Vertical => (
            cq!(x > 0, Some(image.get_pixel(x - 1, y)), None),
            cq!(x + 1 < width, Some(image.get_pixel(x + 1, y)), None),
        ),
    }
}

/// The doppelganger for `(x, y)` as if a seam of the given orientation
/// ran through it, computed from the image as it stands.
pub fn disguise<I>(image: &I, (x, y): (u32, u32), orientation: Orientation) -> Rgb<u8>
where
    I: GenericImageView<Pixel = Rgb<u8>>,
{
    let (before, after) = flanks(image, (x, y), orientation);
    let position = match orientation {
        Orientation::Horizontal => x,
        Orientation::Vertical => y,
    };
    encode(before, after, position)
}
