// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam overlays
//!
//! Paint a seam mask over the image it was recorded against, so the
//! seams the carver chose can be inspected.

use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, ImageBuffer, Pixel, Primitive, Rgb};
use itertools::iproduct;

/// Vertical seams are drawn in red.
pub fn red<S: Primitive>() -> Rgb<S> {
    Rgb([S::DEFAULT_MAX_VALUE, S::DEFAULT_MIN_VALUE, S::DEFAULT_MIN_VALUE])
}

/// Horizontal seams are drawn in black.
pub fn black<S: Primitive>() -> Rgb<S> {
    Rgb([S::DEFAULT_MIN_VALUE, S::DEFAULT_MIN_VALUE, S::DEFAULT_MIN_VALUE])
}

/// An RGB copy of `image` with every masked pixel replaced by `color`.
/// The mask must have the image's dimensions.
pub fn paint_seams<I, P, S>(
    image: &I,
    mask: &TwoDimensionalMap<bool>,
    color: Rgb<S>,
) -> ImageBuffer<Rgb<S>, Vec<S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
    Rgb<S>: Pixel<Subpixel = S>,
{
    let (width, height) = image.dimensions();
    let mut out = ImageBuffer::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        let pixel = if mask[(x, y)] {
            color
        } else {
            image.get_pixel(x, y).to_rgb()
        };
        out.put_pixel(x, y, pixel);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn masked_pixels_take_the_seam_color() {
        let gray: ImageBuffer<Luma<u8>, _> =
            ImageBuffer::from_raw(2, 2, vec![10u8, 20, 30, 40]).unwrap();
        let mask = TwoDimensionalMap::from_fn(2, 2, |x, y| x == y);
        let painted = paint_seams(&gray, &mask, red());
        assert_eq!(*painted.get_pixel(0, 0), Rgb([255, 0, 0]));
        assert_eq!(*painted.get_pixel(1, 1), Rgb([255, 0, 0]));
        assert_eq!(*painted.get_pixel(1, 0), Rgb([20, 20, 20]));
        assert_eq!(*painted.get_pixel(0, 1), Rgb([30, 30, 30]));
    }

    #[test]
    fn wide_samples_are_painted_at_full_scale() {
        let gray: ImageBuffer<Luma<u16>, _> =
            ImageBuffer::from_raw(2, 1, vec![1000u16, 2000]).unwrap();
        let mask = TwoDimensionalMap::from_fn(2, 1, |x, _| x == 1);
        let painted = paint_seams(&gray, &mask, red());
        assert_eq!(*painted.get_pixel(0, 0), Rgb([1000, 1000, 1000]));
        assert_eq!(*painted.get_pixel(1, 0), Rgb([65535, 0, 0]));
    }

    #[test]
    fn black_is_black() {
        assert_eq!(black::<u8>(), Rgb([0, 0, 0]));
        assert_eq!(red::<u16>(), Rgb([65535, 0, 0]));
    }
}
