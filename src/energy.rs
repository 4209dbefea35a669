// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Energy models
//!
//! The basic model scores a pixel by its own gradient.  The Avidan &
//! Rubinstein "forward energy" model instead scores the edges a removal
//! would *create*: taking pixel (x, y) out of the image makes its left
//! and right neighbors adjacent, and depending on which pixel the seam
//! takes in the row above, one more pair of pixels becomes adjacent
//! vertically.
//!
//!  CV(x,y) = |I(x+1,y) − I(x−1,y)|
//!  CL(x,y) = |I(x,y−1) − I(x−1,y)| + CV(x,y)
//!  CR(x,y) = |I(x,y−1) − I(x+1,y)| + CV(x,y)
//!
//! The first and last columns have only one horizontal neighbor.  They
//! use one-sided differences plus a fixed bias of one full intensity
//! range, which makes seams along the image border costly without
//! forbidding them.

use crate::intensity::{EnergyMap, IntensityMap};
use crate::twodmap::TwoDimensionalMap;

/// Added to every boundary term of the forward model.
pub const BORDER_BIAS: f32 = 255.0;

/// Which importance measure drives the cost matrix.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EnergyModel {
    /// Gradient magnitude only.
    Gradient,
    /// Gradient magnitude plus the forward-looking transition costs.
    Forward,
}

impl Default for EnergyModel {
    fn default() -> Self {
        EnergyModel::Gradient
    }
}

impl From<bool> for EnergyModel {
    /// `true` selects forward energy.
    fn from(forward: bool) -> Self {
        if forward {
            EnergyModel::Forward
        } else {
            EnergyModel::Gradient
        }
    }
}

/// The three transition costs of the forward model, one map per
/// direction the seam could have come from.
#[derive(Debug, Clone)]
pub struct ForwardEnergy {
    /// Arriving from the upper-left neighbor.
    pub cl: EnergyMap,
    /// Arriving from directly above.
    pub cv: EnergyMap,
    /// Arriving from the upper-right neighbor.
    pub cr: EnergyMap,
}

impl ForwardEnergy {
    /// Compute CL, CV and CR for every pixel.  The row above row 0 is the
    /// last row; those values are never consulted by the cost matrix.
    pub fn new(intensity: &IntensityMap) -> Self {
        let (width, height) = intensity.dimensions();
        let mut cl = TwoDimensionalMap::new(width, height);
        let mut cv = TwoDimensionalMap::new(width, height);
        let mut cr = TwoDimensionalMap::new(width, height);
        if intensity.is_empty() {
            return ForwardEnergy { cl, cv, cr };
        }

        let i = |x: u32, y: u32| intensity[(x, y)];
        let mw = width - 1;
        for y in 0..height {
            let above = if y == 0 { height - 1 } else { y - 1 };
            for x in 0..width {
                let (l, v, r) = if width == 1 {
                    (BORDER_BIAS, BORDER_BIAS, BORDER_BIAS)
                } else if x == 0 {
                    let v = (i(1, y) - i(0, y)).abs() + BORDER_BIAS;
                    let r = (i(1, y) - i(0, above)).abs() + BORDER_BIAS;
                    (v, v, r)
                } else if x == mw {
                    let v = (i(mw, y) - i(mw - 1, y)).abs() + BORDER_BIAS;
                    let l = (i(mw - 1, y) - i(mw, above)).abs() + BORDER_BIAS;
                    (l, v, v)
                } else {
                    let v = (i(x + 1, y) - i(x - 1, y)).abs();
                    let l = (i(x, above) - i(x - 1, y)).abs() + v;
                    let r = (i(x, above) - i(x + 1, y)).abs() + v;
                    (l, v, r)
                };
                cl[(x, y)] = l;
                cv[(x, y)] = v;
                cr[(x, y)] = r;
            }
        }
        ForwardEnergy { cl, cv, cr }
    }

    /// (CL, CV, CR) at one pixel.
    pub fn at(&self, x: u32, y: u32) -> (f32, f32, f32) {
        (self.cl[(x, y)], self.cv[(x, y)], self.cr[(x, y)])
    }
}
