// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam bookkeeping
//!
//! Once the first seam is gone, working coordinates and original
//! coordinates part ways.  The tracker carries, for every pixel of the
//! working image, the coordinate it had in the reference image the pass
//! started from, and paints each chosen seam into a mask in that
//! reference frame.  The map is carved, grown and rotated in lockstep
//! with the working image, so the mask is always painted in unrotated,
//! uncarved coordinates.

use crate::error::{Result, SeamError};
use crate::seamfinder::check_seam;
use crate::twodmap::TwoDimensionalMap;

/// Where a working pixel came from.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    pub x: u32,
    pub y: u32,
}

/// A coordinate map plus the mask of every pixel a seam has passed
/// through.
#[derive(Debug, Clone)]
pub struct SeamTracker {
    origins: TwoDimensionalMap<Origin>,
    mask: TwoDimensionalMap<bool>,
    seams: usize,
}

impl SeamTracker {
    /// Start tracking a `width` x `height` reference image; every pixel
    /// maps to itself.
    pub fn new(width: u32, height: u32) -> Self {
        SeamTracker {
            origins: TwoDimensionalMap::from_fn(width, height, |x, y| Origin { x, y }),
            mask: TwoDimensionalMap::new(width, height),
            seams: 0,
        }
    }

    /// Where the working pixel at `(x, y)` came from.
    #[cfg(test)]
    pub fn origin(&self, x: u32, y: u32) -> Origin {
        self.origins[(x, y)]
    }

    /// Paint a seam, given in working coordinates, into the mask.
    pub fn record(&mut self, seam: &[u32]) -> Result<()> {
        check_seam(self.origins.width, self.origins.height, seam)?;
        for (y, &x) in (0..self.origins.height).zip(seam.iter()) {
            let Origin { x: ox, y: oy } = self.origins[(x, y)];
            self.mask[(ox, oy)] = true;
        }
        self.seams += 1;
        Ok(())
    }

    /// Follow the working image through the removal of `seam`.
    pub fn remove(&mut self, seam: &[u32]) {
        self.origins = self.origins.without_seam(seam);
    }

    /// Follow the working image through the duplication of `seams`.
    pub fn duplicate(&mut self, columns: &[Vec<u32>]) {
        self.origins = self.origins.with_duplicates(columns);
    }

    pub fn rotate_clockwise(&mut self) {
        self.origins = self.origins.rotate_clockwise();
    }

    pub fn rotate_counterclockwise(&mut self) {
        self.origins = self.origins.rotate_counterclockwise();
    }

    /// Fails if the coordinate map no longer has the working image's
    /// shape.
    pub fn check(&self, width: u32, height: u32) -> Result<()> {
        if self.origins.dimensions() != (width, height) {
            return Err(SeamError::InconsistentState {
                expected: (width, height),
                actual: self.origins.dimensions(),
            });
        }
        Ok(())
    }

    /// Number of seams recorded so far.
    pub fn seams(&self) -> usize {
        self.seams
    }

    /// Number of reference pixels some seam has passed through.
    pub fn marked(&self) -> usize {
        self.mask.values().filter(|m| **m).count()
    }

    pub fn mask(&self) -> &TwoDimensionalMap<bool> {
        &self.mask
    }

    #[cfg(test)]
    pub fn into_mask(self) -> TwoDimensionalMap<bool> {
        self.mask
    }
}
