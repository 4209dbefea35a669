// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Image orientation
//!
//! The carver only knows how to take vertical seams out of an image.
//! Horizontal seams are vertical seams of the image turned a quarter
//! turn clockwise; once the height pass is done the image is turned
//! back.  The image and its coordinate map always turn together, and
//! always by whole quarter turns, so the map keeps describing the
//! working image pixel for pixel.

use crate::tracker::SeamTracker;
use image::{imageops, ImageBuffer, Pixel, Primitive};

/// Which way up the working image currently is.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    /// As loaded; vertical seams narrow the image.
    Upright,
    /// A quarter turn clockwise; vertical seams shorten the image.
    Turned,
}

/// A working image together with the tracker that follows it.
pub struct Oriented<P, S>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    pub image: ImageBuffer<P, Vec<S>>,
    pub tracker: SeamTracker,
    pub orientation: Orientation,
}

impl<P, S> Oriented<P, S>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    /// Start tracking an upright image.
    pub fn new(image: ImageBuffer<P, Vec<S>>) -> Self {
        let tracker = SeamTracker::new(image.width(), image.height());
        Oriented {
            image,
            tracker,
            orientation: Orientation::Upright,
        }
    }

    /// Turn an upright image so its rows become columns.
    pub fn turn(mut self) -> Self {
        if self.orientation == Orientation::Upright {
            self.image = imageops::rotate90(&self.image);
            self.tracker.rotate_clockwise();
            self.orientation = Orientation::Turned;
        }
        self
    }

    /// Undo `turn`.
    pub fn upright(mut self) -> Self {
        if self.orientation == Orientation::Turned {
            self.image = imageops::rotate270(&self.image);
            self.tracker.rotate_counterclockwise();
            self.orientation = Orientation::Upright;
        }
        self
    }
}
