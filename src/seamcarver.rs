// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main struct
//!
//! A `SeamCarver` holds its own copy of an image and applies seams to
//! it, one at a time.  A seam can be removed, shrinking the image by a
//! row or a column, or replaced, rewriting the pixels on it and leaving
//! the dimensions alone.  Every operation checks the seam against the
//! current image before it touches a pixel.
//!
//! Energy is never cached.  Each removal changes the dimensions and each
//! replacement changes pixel values, so every search starts from the
//! image as it stands.

use crate::descent::{ranked_seams, GreedyDescent};
use crate::doppelganger::disguise;
use crate::energy::{calculate_energy, pixel_energy, Energy};
use crate::errors::SeamError;
use crate::flipper::Flipper;
use crate::kernel::Kernel;
use crate::seam::{check_seam, Extremum, Orientation, Seam};
use crate::seamfinder::SeamFinder;
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, ImageBuffer, Rgb, RgbImage};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Every pixel after the seam on a line moves back one place to close
// the gap.
fn remove_seam_from(image: &RgbImage, seam: &[u32], orientation: Orientation) -> RgbImage {
    let (width, height) = image.dimensions();
    match orientation {
        Orientation::Vertical => ImageBuffer::from_fn(width - 1, height, |x, y| {
            *image.get_pixel(cq!(x >= seam[y as usize], x + 1, x), y)
        }),
        Orientation::Horizontal => ImageBuffer::from_fn(width, height - 1, |x, y| {
            *image.get_pixel(x, cq!(y >= seam[x as usize], y + 1, y))
        }),
    }
}

// The kernel-weighted sum of the neighborhood of (x, y), zero padded
// at the edges, truncated and clamped to a channel value.
fn convolve_pixel(image: &RgbImage, kernel: &Kernel, x: u32, y: u32) -> Rgb<u8> {
    let (width, height) = image.dimensions();
    let side = kernel.side();
    let mid = (side / 2) as i64;
    let mut sums = [0.0f64; 3];
    for dy in 0..side {
        for dx in 0..side {
            let xi = i64::from(x) + dx as i64 - mid;
            let yj = i64::from(y) + dy as i64 - mid;
            if xi < 0 || yj < 0 || xi >= i64::from(width) || yj >= i64::from(height) {
                continue;
            }
            let weight = kernel.weight(dx, dy);
            let Rgb(channels) = *image.get_pixel(xi as u32, yj as u32);
            for (sum, channel) in sums.iter_mut().zip(channels.iter()) {
                *sum += f64::from(*channel) * weight;
            }
        }
    }
    let clamp = |sum: f64| (sum as i64).max(0).min(255) as u8;
    Rgb([clamp(sums[0]), clamp(sums[1]), clamp(sums[2])])
}

/// What to paint over a seam.
#[derive(Debug, Clone, Copy)]
pub enum Replacement<'a> {
    /// One color for every pixel on the seam.
    Fill(Rgb<u8>),
    /// An independent uniform random color per pixel.
    Noise,
    /// The pixel at the same place in a donor image of the same size.
    Swap(&'a RgbImage),
    /// Reconvolve a band of lines around the seam.
    Convolve(&'a Kernel),
    /// The reversible doppelganger encoding.
    Doppelganger,
}

/// A struct for holding the image to be carved.
pub struct SeamCarver {
    image: RgbImage,
    rng: StdRng,
}

impl SeamCarver {
    /// Creates a new SeamCarver with a private copy of an image to be
    /// carved.  The original is never touched.
    pub fn new<I>(image: &I) -> Self
    where
        I: GenericImageView<Pixel = Rgb<u8>>,
    {
        let (width, height) = image.dimensions();
        SeamCarver {
            image: ImageBuffer::from_fn(width, height, |x, y| image.get_pixel(x, y)),
            rng: StdRng::from_entropy(),
        }
    }

    /// Fix the random number generator used for noise replacement.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn picture(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_picture(self) -> RgbImage {
        self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Energy of the pixel at column x and row y.
    pub fn energy(&self, x: u32, y: u32) -> u32 {
        pixel_energy(&self.image, x, y)
    }

    /// Search the current image, totalling path energies in `E`.
    pub fn find_seam<E: Energy>(&self, orientation: Orientation, extremum: Extremum) -> Seam {
        let finder: GreedyDescent<_, E> = GreedyDescent::new(&self.image);
        finder.seam(orientation, extremum)
    }

    pub fn find_minimum_vertical_seam(&self) -> Seam {
        self.find_seam::<u64>(Orientation::Vertical, Extremum::Minimum)
    }

    pub fn find_minimum_horizontal_seam(&self) -> Seam {
        self.find_seam::<u64>(Orientation::Horizontal, Extremum::Minimum)
    }

    pub fn find_maximum_vertical_seam(&self) -> Seam {
        self.find_seam::<u64>(Orientation::Vertical, Extremum::Maximum)
    }

    pub fn find_maximum_horizontal_seam(&self) -> Seam {
        self.find_seam::<u64>(Orientation::Horizontal, Extremum::Maximum)
    }

    /// Take a seam out of the image, shrinking it by one row or column.
    pub fn remove_seam(&mut self, seam: &[u32], orientation: Orientation) -> Result<(), SeamError> {
        check_seam(seam, orientation, self.image.dimensions())?;
        self.image = remove_seam_from(&self.image, seam, orientation);
        debug!("removed {} seam, now {}x{}", orientation, self.width(), self.height());
        Ok(())
    }

    pub fn remove_horizontal_seam(&mut self, seam: &[u32]) -> Result<(), SeamError> {
        self.remove_seam(seam, Orientation::Horizontal)
    }

    pub fn remove_vertical_seam(&mut self, seam: &[u32]) -> Result<(), SeamError> {
        self.remove_seam(seam, Orientation::Vertical)
    }

    /// Overwrite the pixels on a seam.  The dimensions don't change.
    pub fn replace_seam(
        &mut self,
        seam: &[u32],
        orientation: Orientation,
        replacement: Replacement,
    ) -> Result<(), SeamError> {
        match replacement {
            Replacement::Fill(color) => self.fill_seam(seam, orientation, color),
            Replacement::Noise => self.scramble_seam(seam, orientation),
            Replacement::Swap(donor) => self.swap_seam(seam, orientation, donor),
            Replacement::Convolve(kernel) => self.convolve_seam(seam, orientation, kernel),
            Replacement::Doppelganger => self.encode_seam(seam, orientation),
        }
    }

    // Pixel coordinates along a seam already known to fit the image.
    fn points(seam: &[u32], orientation: Orientation) -> impl Iterator<Item = (u32, u32)> + '_ {
        seam.iter()
            .enumerate()
            .map(move |(line, &offset)| orientation.point(line as u32, offset))
    }

    pub fn fill_seam(
        &mut self,
        seam: &[u32],
        orientation: Orientation,
        color: Rgb<u8>,
    ) -> Result<(), SeamError> {
        check_seam(seam, orientation, self.image.dimensions())?;
        for (x, y) in Self::points(seam, orientation) {
            self.image.put_pixel(x, y, color);
        }
        Ok(())
    }

    pub fn scramble_seam(&mut self, seam: &[u32], orientation: Orientation) -> Result<(), SeamError> {
        check_seam(seam, orientation, self.image.dimensions())?;
        for (x, y) in Self::points(seam, orientation) {
            let color = Rgb([self.rng.gen(), self.rng.gen(), self.rng.gen()]);
            self.image.put_pixel(x, y, color);
        }
        Ok(())
    }

    pub fn swap_seam(
        &mut self,
        seam: &[u32],
        orientation: Orientation,
        donor: &RgbImage,
    ) -> Result<(), SeamError> {
        check_seam(seam, orientation, self.image.dimensions())?;
        let (width, height) = self.image.dimensions();
        if donor.dimensions() != (width, height) {
            return Err(SeamError::DonorSize {
                width: donor.width(),
                height: donor.height(),
                expected_width: width,
                expected_height: height,
            });
        }
        for (x, y) in Self::points(seam, orientation) {
            self.image.put_pixel(x, y, *donor.get_pixel(x, y));
        }
        Ok(())
    }

    /// Recompute the band of `kernel.side()` lines centered on the seam
    /// from the image as it was before the call.
    pub fn convolve_seam(
        &mut self,
        seam: &[u32],
        orientation: Orientation,
        kernel: &Kernel,
    ) -> Result<(), SeamError> {
        check_seam(seam, orientation, self.image.dimensions())?;
        let original = self.image.clone();
        let span = orientation.span(original.dimensions());
        let mid = (kernel.side() / 2) as u32;
        for (line, &center) in seam.iter().enumerate() {
            let first = center.saturating_sub(mid);
            let last = center.saturating_add(mid).min(span - 1);
            for offset in first..=last {
                let (x, y) = orientation.point(line as u32, offset);
                self.image.put_pixel(x, y, convolve_pixel(&original, kernel, x, y));
            }
        }
        Ok(())
    }

    /// Replace every pixel on the seam with its doppelganger.
    pub fn encode_seam(&mut self, seam: &[u32], orientation: Orientation) -> Result<(), SeamError> {
        check_seam(seam, orientation, self.image.dimensions())?;
        for (x, y) in Self::points(seam, orientation) {
            let color = disguise(&self.image, (x, y), orientation);
            self.image.put_pixel(x, y, color);
        }
        Ok(())
    }

    /// Search for and remove one seam.
    pub fn carve_once(&mut self, orientation: Orientation) -> Result<Seam, SeamError> {
        let seam = self.find_seam::<u64>(orientation, Extremum::Minimum);
        self.remove_seam(&seam, orientation)?;
        Ok(seam)
    }

    // This is absurdly inefficient, as the entire energy map is
    // recalculated for every seam.

    /// Given a desired new width and height, repeatedly carve seams out
    /// of the image, alternating direction while both dimensions still
    /// need to shrink.
    pub fn carve(&mut self, newwidth: u32, newheight: u32) -> Result<(), SeamError> {
        let (width, height) = self.image.dimensions();
        if width < newwidth || height < newheight {
            return Err(SeamError::Upscale {
                width,
                height,
                target_width: newwidth,
                target_height: newheight,
            });
        }

        let mut direction = Orientation::Vertical;
        while self.width() > newwidth && self.height() > newheight {
            self.carve_once(direction)?;
            direction = direction.turn();
        }
        while self.width() > newwidth {
            self.carve_once(Orientation::Vertical)?;
        }
        while self.height() > newheight {
            self.carve_once(Orientation::Horizontal)?;
        }
        debug!("carved {}x{} down to {}x{}", width, height, self.width(), self.height());
        Ok(())
    }

    /// Replace `rows` horizontal seams, then `columns` vertical ones,
    /// searching afresh before each.
    pub fn replace_seams(
        &mut self,
        rows: u32,
        columns: u32,
        extremum: Extremum,
        replacement: Replacement,
    ) -> Result<(), SeamError> {
        let runs = [(Orientation::Horizontal, rows), (Orientation::Vertical, columns)];
        for &(orientation, count) in runs.iter() {
            for _ in 0..count {
                let seam = self.find_seam::<u64>(orientation, extremum);
                self.replace_seam(&seam, orientation, replacement)?;
            }
            debug!("replaced {} {} seams", count, orientation);
        }
        Ok(())
    }

    /// Every candidate seam of one orientation, best first, all from a
    /// single energy calculation over the current image.
    pub fn ranked_seams(&self, orientation: Orientation, extremum: Extremum) -> Vec<(u64, Seam)> {
        let energy: TwoDimensionalMap<u64> = match orientation {
            Orientation::Horizontal => calculate_energy(&Flipper::new(&self.image)),
            Orientation::Vertical => calculate_energy(&self.image),
        };
        ranked_seams(&energy, extremum)
    }

    /// Like `replace_seams`, but each orientation is searched once and
    /// its best `rows` (or `columns`) candidates are replaced in rank
    /// order.  Candidates from different starts may share pixels.
    pub fn replace_ranked_seams(
        &mut self,
        rows: u32,
        columns: u32,
        extremum: Extremum,
        replacement: Replacement,
    ) -> Result<(), SeamError> {
        let runs = [(Orientation::Horizontal, rows), (Orientation::Vertical, columns)];
        for &(orientation, count) in runs.iter() {
            let ranked = self.ranked_seams(orientation, extremum);
            for (_, seam) in ranked.iter().take(count as usize) {
                self.replace_seam(seam, orientation, replacement)?;
            }
            debug!(
                "replaced {} of {} ranked {} seams",
                count.min(ranked.len() as u32),
                ranked.len(),
                orientation
            );
        }
        Ok(())
    }
}

impl SeamFinder for SeamCarver {
    fn horizontal_seam(&self, extremum: Extremum) -> Seam {
        self.find_seam::<u64>(Orientation::Horizontal, extremum)
    }

    fn vertical_seam(&self, extremum: Extremum) -> Seam {
        self.find_seam::<u64>(Orientation::Vertical, extremum)
    }
}
