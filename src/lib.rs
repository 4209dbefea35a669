// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image resizing.
//!
//! Seams of low-energy pixels are removed to shrink an image, or
//! duplicated to grow it, one axis at a time.  Two energy models are
//! available: plain gradient magnitude, and Avidan & Rubinstein's
//! forward energy.

pub mod ternary;

pub mod error;
pub use error::{Result, SeamError};

pub mod twodmap;

pub mod intensity;
pub use intensity::{gradient_magnitude, to_grayscale};

pub mod energy;
pub use energy::EnergyModel;

pub mod costmatrix;
pub use costmatrix::{CostMatrix, Step};

pub mod seamfinder;
pub use seamfinder::SeamFinder;

pub mod tracker;
pub mod orientation;
pub mod overlay;

pub mod seamcarver;
pub use seamcarver::{resize, Resized, SeamCarver};
