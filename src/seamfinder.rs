// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::costmatrix::CostMatrix;
use crate::error::{Result, SeamError};

/// Fails unless `seam` has one in-range column per row of a `width` x
/// `height` image, each within one column of the row before.
pub fn check_seam(width: u32, height: u32, seam: &[u32]) -> Result<()> {
    if seam.len() != height as usize {
        return Err(SeamError::SeamLength {
            expected: height,
            actual: seam.len(),
        });
    }
    if let Some((row, &column)) = seam.iter().enumerate().find(|(_, &x)| x >= width) {
        return Err(SeamError::SeamOutOfBounds {
            row: row as u32,
            column,
            width,
        });
    }
    if let Some(row) = seam
        .windows(2)
        .position(|w| (w[0] as i64 - w[1] as i64).abs() > 1)
    {
        return Err(SeamError::BrokenSeam {
            row: row as u32,
            next: row as u32 + 1,
        });
    }
    Ok(())
}

/// This trait defines how we will return seams from an image.  It's a
/// primitive interface, just enough to make room for multiple seam
/// engines.  A vertical seam is a list of x-coordinates that, when
/// zipped with the range (0..height), gives the XY coordinates of each
/// pixel in the seam.
pub trait SeamFinder {
    /// Request the cheapest top-to-bottom seam.
    fn vertical_seam(&self) -> Result<Vec<u32>>;
}

impl SeamFinder for CostMatrix {
    fn vertical_seam(&self) -> Result<Vec<u32>> {
        let (width, height) = self.dimensions();
        if width == 0 || height == 0 {
            return Err(SeamError::InvalidShape { width, height });
        }

        // Find the x coordinate of the bottommost cell with the least
        // energy, then walk the backtrack steps up to the top row.
        let (mut seam_col, _) = self.cheapest_bottom();
        let seam = (0..height)
            .rev()
            .fold(Vec::<u32>::with_capacity(height as usize), |mut acc, y| {
                acc.push(seam_col);
                seam_col = self.step(seam_col, y).parent(seam_col);
                acc
            })
            .into_iter()
            .rev()
            .collect();
        Ok(seam)
    }
}
