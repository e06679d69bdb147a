// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::seam::{Extremum, Orientation, Seam};

/// This trait defines how we will return seams from an image.  It's a
/// primitive interface, just enough to make room for multiple seam
/// searches over the same image.
pub trait SeamFinder {
    /// Once a SeamFinder has an image (or whatever it needs to make a
    /// rational decision), request a horizontal seam: one y-coordinate
    /// per column.
    fn horizontal_seam(&self, extremum: Extremum) -> Seam;

    /// Request a vertical seam: one x-coordinate per row.
    fn vertical_seam(&self, extremum: Extremum) -> Seam;

    fn seam(&self, orientation: Orientation, extremum: Extremum) -> Seam {
        match orientation {
            Orientation::Horizontal => self.horizontal_seam(extremum),
            Orientation::Vertical => self.vertical_seam(extremum),
        }
    }
}
