// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A two-dimensional map
//!
//! Every intermediate product of the carver (intensities, energies, the
//! cost and backtrack cells, the coordinate map and the seam masks) is a
//! rectangle of small `Copy` values addressed by `(x, y)`.  This is that
//! rectangle, along with the three shape-changing operations the carver
//! needs: dropping one column per row, duplicating columns per row, and
//! rotating by a quarter turn.

use std::ops::{Index, IndexMut};

/// An addressable two-dimensional field containing an object that
/// represents one of several possible objects during processing: an
/// `f32` for intensities and energies, a cost cell for the seam
/// digraph, an origin for the coordinate map, or a `bool` for a mask.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    pub width: u32,
    pub height: u32,
    data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new (abstract) map, with every cell set to the
    /// content type's default.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Build a map by asking `f` for the value at every `(x, y)`.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> P,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        TwoDimensionalMap {
            width,
            height,
            data,
        }
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.  This
    // particular variant is the same one used in image.rs.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// One row, left to right.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Every cell in row-major order.
    pub fn values(&self) -> impl Iterator<Item = &P> {
        self.data.iter()
    }

    /// Drop the cell at `(seam[y], y)` from every row; everything to
    /// the right of it slides one column left.  The seam must have one
    /// in-range entry per row.
    pub fn without_seam(&self, seam: &[u32]) -> Self {
        let mut data = Vec::with_capacity(self.data.len() - self.height as usize);
        for (y, &cut) in (0..self.height).zip(seam.iter()) {
            let row = self.row(y);
            data.extend_from_slice(&row[..cut as usize]);
            data.extend_from_slice(&row[cut as usize + 1..]);
        }
        TwoDimensionalMap {
            width: self.width - 1,
            height: self.height,
            data,
        }
    }

    /// Repeat the cells named in `columns[y]` (sorted) in place, each
    /// copy landing immediately to the right of its source.  A column
    /// named twice is copied twice.
    pub fn with_duplicates(&self, columns: &[Vec<u32>]) -> Self {
        let added = columns.first().map_or(0, |c| c.len() as u32);
        let mut data = Vec::with_capacity(((self.width + added) * self.height) as usize);
        for (y, dups) in (0..self.height).zip(columns.iter()) {
            let mut dups = dups.iter().peekable();
            for (x, cell) in self.row(y).iter().enumerate() {
                data.push(*cell);
                while dups.peek() == Some(&&(x as u32)) {
                    data.push(*cell);
                    dups.next();
                }
            }
        }
        TwoDimensionalMap {
            width: self.width + added,
            height: self.height,
            data,
        }
    }

    /// A quarter turn clockwise: the left column becomes the top row.
    pub fn rotate_clockwise(&self) -> Self {
        let h = self.height;
        TwoDimensionalMap::from_fn(self.height, self.width, |x, y| self[(y, h - 1 - x)])
    }

    /// A quarter turn counter-clockwise; undoes `rotate_clockwise`.
    pub fn rotate_counterclockwise(&self) -> Self {
        let w = self.width;
        TwoDimensionalMap::from_fn(self.height, self.width, |x, y| self[(w - 1 - y, x)])
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}
