// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The seam digraph
//!
//! For every pixel not in the first row there exist three possible
//! seams to which that pixel contributes: the ones arriving from the
//! upper-left, from directly above, and from the upper-right.  The
//! cost of a pixel is its own energy plus the cheapest of those three
//! arrivals, and the step that won is recorded so the seam can be
//! walked back up from the bottom row.
//!
//! ```text
//!                        ⎧ M(x−1,y−1) + CL(x,y)
//!  M(x,y) = E(x,y) + min ⎨ M(x,y−1)   + CV(x,y)
//!                        ⎩ M(x+1,y−1) + CR(x,y)
//! ```
//!
//! With the gradient model CL, CV and CR are all zero.  The first and
//! last columns only have two arrivals to choose from.

use crate::energy::{EnergyModel, ForwardEnergy};
use crate::error::{Result, SeamError};
use crate::intensity::{gradient_magnitude, EnergyMap, IntensityMap};
use crate::twodmap::TwoDimensionalMap;

/// Which pixel in the row above a seam arrived from.  Ordered; when two
/// arrivals cost the same, the earlier variant wins.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Left,
    Up,
    Right,
}

impl Default for Step {
    fn default() -> Self {
        Step::Up
    }
}

impl Step {
    /// The column in the row above, given the column in this row.
    pub fn parent(self, x: u32) -> u32 {
        match self {
            Step::Left => x - 1,
            Step::Up => x,
            Step::Right => x + 1,
        }
    }
}

#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub(crate) struct CostCell {
    pub cost: f32,
    pub step: Step,
    pub taken: bool,
}

// The first candidate with the lowest cost.  Strict comparison is what
// makes ties go left.
fn cheapest(candidates: &[(Step, f32)]) -> (Step, f32) {
    candidates[1..]
        .iter()
        .fold(candidates[0], |best, &c| if c.1 < best.1 { c } else { best })
}

/// The accumulated cost and the backtrack step for every pixel, built
/// together from one intensity map and consumed together by the seam
/// finder.  Owned by a single seam search; never outlives the image it
/// was built from.
#[derive(Debug, Clone)]
pub struct CostMatrix {
    cells: TwoDimensionalMap<CostCell>,
    energy: EnergyMap,
    forward: Option<ForwardEnergy>,
}

impl CostMatrix {
    /// Compute the energy of every pixel under `model` and propagate it
    /// into the cost matrix.
    pub fn build(intensity: &IntensityMap, model: EnergyModel) -> Result<Self> {
        if intensity.is_empty() {
            return Err(SeamError::InvalidShape {
                width: intensity.width,
                height: intensity.height,
            });
        }
        let forward = match model {
            EnergyModel::Forward => Some(ForwardEnergy::new(intensity)),
            EnergyModel::Gradient => None,
        };
        let mut matrix = CostMatrix {
            cells: TwoDimensionalMap::new(intensity.width, intensity.height),
            energy: gradient_magnitude(intensity),
            forward,
        };
        matrix.propagate();
        Ok(matrix)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.cells.dimensions()
    }

    /// Accumulated cost of the cheapest seam ending at `(x, y)`.
    pub fn cost(&self, x: u32, y: u32) -> f32 {
        self.cells[(x, y)].cost
    }

    /// The arrival step that produced `cost(x, y)`.
    pub fn step(&self, x: u32, y: u32) -> Step {
        self.cells[(x, y)].step
    }

    fn transition(&self, x: u32, y: u32) -> (f32, f32, f32) {
        match &self.forward {
            Some(fwd) => fwd.at(x, y),
            None => (0.0, 0.0, 0.0),
        }
    }

    // Rows are strictly sequential: row y reads only the finished row
    // y - 1.  Pixels already claimed by a seam cost infinity, so nothing
    // finite can be routed through them.
    fn propagate(&mut self) {
        let (width, height) = self.cells.dimensions();
        let mw = width - 1;

        for x in 0..width {
            let cell = &mut self.cells[(x, 0)];
            cell.cost = if cell.taken {
                f32::INFINITY
            } else {
                self.energy[(x, 0)]
            };
            cell.step = Step::Up;
        }

        for y in 1..height {
            for x in 0..width {
                let above = |x| self.cells[(x, y - 1)].cost;
                let (cl, cv, cr) = self.transition(x, y);
                let (step, arrival) = if width == 1 {
                    (Step::Up, above(0) + cv)
                } else if x == 0 {
                    cheapest(&[(Step::Up, above(0) + cv), (Step::Right, above(1) + cr)])
                } else if x == mw {
                    cheapest(&[(Step::Left, above(mw - 1) + cl), (Step::Up, above(mw) + cv)])
                } else {
                    cheapest(&[
                        (Step::Left, above(x - 1) + cl),
                        (Step::Up, above(x) + cv),
                        (Step::Right, above(x + 1) + cr),
                    ])
                };
                let energy = self.energy[(x, y)];
                let cell = &mut self.cells[(x, y)];
                cell.step = step;
                cell.cost = if cell.taken {
                    f32::INFINITY
                } else {
                    energy + arrival
                };
            }
        }
    }

    /// Column and cost of the cheapest cell in the bottom row; the
    /// leftmost one on a tie.
    pub fn cheapest_bottom(&self) -> (u32, f32) {
        let bottom = self.cells.height - 1;
        (0..self.cells.width)
            .map(|x| (x, self.cells[(x, bottom)].cost))
            .fold((0, f32::INFINITY), |best, c| if c.1 < best.1 { c } else { best })
    }

    /// True while at least one seam avoids every excluded pixel.
    pub fn has_open_seam(&self) -> bool {
        self.cheapest_bottom().1.is_finite()
    }

    /// Claim every pixel of `seam` and re-propagate the costs over the
    /// energies this matrix was built with.  Later seams found in this
    /// matrix share no pixel with `seam`.
    pub fn exclude(&mut self, seam: &[u32]) {
        for (y, &x) in (0..self.cells.height).zip(seam.iter()) {
            self.cells[(x, y)].taken = true;
        }
        self.propagate();
    }
}
