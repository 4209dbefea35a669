// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors raised while carving.
//!
//! Every check runs before the working image is modified, so a failed
//! resize never leaves a half-carved image behind.

use failure::Fail;

/// Everything that can go wrong inside the carver.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum SeamError {
    /// The image (or a map derived from it) has no pixels.
    #[fail(display = "invalid shape: {}x{} has no pixels", width, height)]
    InvalidShape { width: u32, height: u32 },

    /// The requested output dimensions cannot be reached.
    #[fail(display = "invalid target: cannot resize to {}x{}", width, height)]
    InvalidTarget { width: u32, height: u32 },

    /// A seam does not have one entry per row of the image it is
    /// applied to.
    #[fail(display = "seam has {} entries, image has {} rows", actual, expected)]
    SeamLength { expected: u32, actual: usize },

    /// A seam column falls outside the image it is applied to.
    #[fail(
        display = "seam leaves the image at row {}: column {} of {}",
        row, column, width
    )]
    SeamOutOfBounds { row: u32, column: u32, width: u32 },

    /// Consecutive seam columns are more than one column apart.
    #[fail(display = "seam breaks between rows {} and {}", row, next)]
    BrokenSeam { row: u32, next: u32 },

    /// Every seam through the image has an infinite or undefined cost,
    /// as happens when the intensities hold NaN or overflow.
    #[fail(display = "no seam of finite cost through {}x{}", width, height)]
    NoFiniteSeam { width: u32, height: u32 },

    /// The coordinate map no longer matches the working image.  This is
    /// a bug in the carver, not in the caller's input.
    #[fail(
        display = "inconsistent state: coordinate map is {:?}, working image is {:?}",
        actual, expected
    )]
    InconsistentState {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, SeamError>;
