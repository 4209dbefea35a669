// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Intensity and gradient maps
//!
//! The carver never looks at color.  Every decision is made on a single
//! luminance channel, and the basic importance of a pixel is the
//! magnitude of the luminance gradient at that pixel.

use crate::cq;
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, Pixel, Primitive};
use num_traits::NumCast;

/// One luminance value per pixel.
pub type IntensityMap = TwoDimensionalMap<f32>;

/// One importance value per pixel.
pub type EnergyMap = TwoDimensionalMap<f32>;

#[inline]
fn lumachannel<P, S>(p: &P) -> f32
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let luma: Option<f32> = NumCast::from(p.to_luma().channels()[0]);
    luma.unwrap_or_default()
}

/// Image -> Intensity Map
///
/// Uses the image crate's own luma conversion, so an 8-bit image yields
/// intensities in `0.0..=255.0`.
pub fn to_grayscale<I, P, S>(image: &I) -> IntensityMap
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    TwoDimensionalMap::from_fn(width, height, |x, y| lumachannel(&image.get_pixel(x, y)))
}

/// Intensity Map -> Energy Map
///
/// `sqrt(dx² + dy²)`, where each difference is taken between the two
/// neighbors of the pixel.  Where a neighbor would fall off the map the
/// pixel itself stands in for it.
pub fn gradient_magnitude(intensity: &IntensityMap) -> EnergyMap {
    let (width, height) = intensity.dimensions();
    if intensity.is_empty() {
        return TwoDimensionalMap::new(width, height);
    }
    let (mw, mh) = (width - 1, height - 1);

    TwoDimensionalMap::from_fn(width, height, |x, y| {
        let current = intensity[(x, y)];
        let (left, right, up, down) = (
            cq!(x == 0, current, intensity[(x - 1, y)]),
            cq!(x >= mw, current, intensity[(x + 1, y)]),
            cq!(y == 0, current, intensity[(x, y - 1)]),
            cq!(y >= mh, current, intensity[(x, y + 1)]),
        );
        let (dx, dy) = (right - left, down - up);
        (dx * dx + dy * dy).sqrt()
    })
}
