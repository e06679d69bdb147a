// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Image dimensional flipper
//!
//! A read-only proxy for anything implementing `GenericImageView` that
//! swaps width with height and every `x` with `y`.
//!
//! The seam search only knows how to walk from the top of an energy
//! grid to the bottom.  Computing energy over a flipped view gives the
//! transposed grid, and walking that top-to-bottom is a horizontal
//! search of the original.  Because the energy of a pixel treats its
//! horizontal and vertical neighbors identically, energy of the
//! flipped view at `(y, x)` is exactly the energy of the image at
//! `(x, y)`.

use image::GenericImageView;

pub struct Flipper<'a, I: GenericImageView> {
    image: &'a I,
}

impl<'a, I: GenericImageView> Flipper<'a, I> {
    pub fn new(image: &'a I) -> Self {
        Flipper { image }
    }
}

impl<'a, I: GenericImageView> GenericImageView for Flipper<'a, I> {
    type Pixel = I::Pixel;
    type InnerImageView = I;

    fn dimensions(&self) -> (u32, u32) {
        let (width, height) = self.image.dimensions();
        (height, width)
    }

    fn width(&self) -> u32 {
        self.image.height()
    }

    fn height(&self) -> u32 {
        self.image.width()
    }

    fn get_pixel(&self, x: u32, y: u32) -> I::Pixel {
        self.image.get_pixel(y, x)
    }

    fn inner(&self) -> &Self::InnerImageView {
        self.image
    }

    fn bounds(&self) -> (u32, u32, u32, u32) {
        let (x, y, width, height) = self.image.bounds();
        (y, x, height, width)
    }
}
