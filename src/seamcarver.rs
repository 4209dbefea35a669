// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main function
//!
//! The main seamcarver routine, with helpers for taking seams out of an
//! image and for putting copies of them back in.  Only vertical seams
//! are ever carved: the width pass runs on the image as given, and the
//! height pass runs on the width-resized image turned a quarter turn
//! clockwise, then turned back.

use crate::costmatrix::CostMatrix;
use crate::energy::EnergyModel;
use crate::error::{Result, SeamError};
use crate::intensity::to_grayscale;
use crate::orientation::Oriented;
use crate::overlay::{black, paint_seams, red};
use crate::seamfinder::{check_seam, SeamFinder};
use crate::tracker::SeamTracker;
use image::{GenericImageView, ImageBuffer, Pixel, Primitive, Rgb};
use itertools::Itertools;
use log::{debug, info};

type Scratch<P, S> = ImageBuffer<P, Vec<S>>;

/// Take one vertical seam out of an image.  In every row the pixel at
/// `seam[y]` is dropped and the pixels to its right shift one column
/// left.
pub fn remove_vertical_seam<I, P, S>(image: &I, seam: &[u32]) -> Result<Scratch<P, S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    check_seam(width, height, seam)?;
    if width < 2 {
        return Err(SeamError::InvalidTarget { width: 0, height });
    }
    let mut imgbuf = ImageBuffer::new(width - 1, height);
    for (y, &cut) in (0..height).zip(seam.iter()) {
        for x in (0..width).filter(|x| *x != cut) {
            imgbuf.put_pixel(if x < cut { x } else { x - 1 }, y, image.get_pixel(x, y));
        }
    }
    Ok(imgbuf)
}

/// Transpose a set of seams into, for every row, the sorted list of
/// columns to duplicate.
fn columns_per_row(height: u32, seams: &[Vec<u32>]) -> Vec<Vec<u32>> {
    (0..height as usize)
        .map(|y| seams.iter().map(|seam| seam[y]).sorted().collect())
        .collect()
}

/// Put a copy of every seam back into an image, each copied pixel
/// immediately to the right of its source.  The seams must not share a
/// pixel.  Rows grow left to right, so every duplicate lands past the
/// ones before it.
pub fn duplicate_vertical_seams<I, P, S>(image: &I, seams: &[Vec<u32>]) -> Result<Scratch<P, S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    for seam in seams {
        check_seam(width, height, seam)?;
    }
    let columns = columns_per_row(height, seams);
    let mut imgbuf = ImageBuffer::new(width + seams.len() as u32, height);
    for (y, dups) in (0..height).zip(columns.iter()) {
        let mut target = 0;
        let mut dups = dups.iter().peekable();
        for x in 0..width {
            let pixel = image.get_pixel(x, y);
            imgbuf.put_pixel(target, y, pixel);
            target += 1;
            while dups.peek() == Some(&&x) {
                imgbuf.put_pixel(target, y, pixel);
                target += 1;
                dups.next();
            }
        }
    }
    Ok(imgbuf)
}

/// Remove `k` seams one at a time.  Each removal changes which pixels
/// are neighbors, so the cost matrix is rebuilt from the current image
/// every time.
fn remove_seams<P, S>(
    mut scratch: Scratch<P, S>,
    k: u32,
    model: EnergyModel,
    tracker: &mut SeamTracker,
) -> Result<Scratch<P, S>>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = scratch.dimensions();
    if k >= width {
        return Err(SeamError::InvalidTarget {
            width: width.saturating_sub(k),
            height,
        });
    }
    for _ in 0..k {
        let costs = CostMatrix::build(&to_grayscale(&scratch), model)?;
        let seam = costs.vertical_seam()?;
        tracker.record(&seam)?;
        tracker.remove(&seam);
        scratch = remove_vertical_seam(&scratch, &seam)?;
        tracker.check(scratch.width(), scratch.height())?;
        debug!("removed seam: {}x{}", scratch.width(), scratch.height());
    }
    Ok(scratch)
}

/// Find up to `limit` seams in one cost matrix, none sharing a pixel
/// with another.  Stops early once every remaining seam would run into
/// one already chosen.
fn find_disjoint_seams(mut costs: CostMatrix, limit: u32) -> Result<Vec<Vec<u32>>> {
    let mut seams = Vec::with_capacity(limit as usize);
    while seams.len() < limit as usize && costs.has_open_seam() {
        let seam = costs.vertical_seam()?;
        costs.exclude(&seam);
        seams.push(seam);
    }
    Ok(seams)
}

/// Insert `k` seams.  All the seams of a batch come from a single cost
/// matrix built before the image is touched, and are duplicated
/// together.  A batch can never hold more seams than the image has
/// columns; enlargements past that take several batches.
fn insert_seams<P, S>(
    mut scratch: Scratch<P, S>,
    k: u32,
    model: EnergyModel,
    tracker: &mut SeamTracker,
) -> Result<Scratch<P, S>>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let mut remaining = k;
    while remaining > 0 {
        let costs = CostMatrix::build(&to_grayscale(&scratch), model)?;
        let seams = find_disjoint_seams(costs, remaining.min(scratch.width()))?;
        if seams.is_empty() {
            return Err(SeamError::NoFiniteSeam {
                width: scratch.width(),
                height: scratch.height(),
            });
        }
        for seam in &seams {
            tracker.record(seam)?;
        }
        scratch = duplicate_vertical_seams(&scratch, &seams)?;
        tracker.duplicate(&columns_per_row(scratch.height(), &seams));
        tracker.check(scratch.width(), scratch.height())?;
        remaining -= seams.len() as u32;
        debug!(
            "inserted {} seams: {}x{}",
            seams.len(),
            scratch.width(),
            scratch.height()
        );
    }
    Ok(scratch)
}

/// Bring the width of `scratch` to `target` by removing or inserting
/// vertical seams.  A target equal to the current width is a no-op.
fn resize_width<P, S>(
    scratch: Scratch<P, S>,
    target: u32,
    model: EnergyModel,
    tracker: &mut SeamTracker,
) -> Result<Scratch<P, S>>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let width = scratch.width();
    if target < width {
        remove_seams(scratch, width - target, model, tracker)
    } else if target > width {
        insert_seams(scratch, target - width, model, tracker)
    } else {
        Ok(scratch)
    }
}

/// The resized image, and the two seam overlays.
#[derive(Debug)]
pub struct Resized<P, S>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
    Rgb<S>: Pixel<Subpixel = S>,
{
    /// The image at the requested size.
    pub resized: Scratch<P, S>,
    /// The original image with every vertical seam drawn in red.
    pub vertical_seams: Scratch<Rgb<S>, S>,
    /// The width-resized image, at the original height, with every
    /// horizontal seam drawn in black.
    pub horizontal_seams: Scratch<Rgb<S>, S>,
}

/// A struct for holding the image to be carved.
pub struct SeamCarver<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    image: &'a I,
    model: EnergyModel,
}

impl<'a, I, P, S> SeamCarver<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
    Rgb<S>: Pixel<Subpixel = S>,
{
    /// Creates a new SeamCarver with an image to be carved, using the
    /// gradient energy model.
    pub fn new(image: &'a I) -> Self {
        Self {
            image,
            model: EnergyModel::default(),
        }
    }

    /// Choose the energy model.
    pub fn energy(mut self, model: EnergyModel) -> Self {
        self.model = model;
        self
    }

    /// Given a desired new width and height, carve or grow the image and
    /// report which seams were chosen.
    pub fn resize(&self, newwidth: u32, newheight: u32) -> Result<Resized<P, S>> {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return Err(SeamError::InvalidShape { width, height });
        }
        if newwidth == 0 || newheight == 0 {
            return Err(SeamError::InvalidTarget {
                width: newwidth,
                height: newheight,
            });
        }

        // Initialize the scratch space.
        let mut scratch = ImageBuffer::<P, Vec<S>>::new(width, height);
        self.image
            .pixels()
            .for_each(|(x, y, p)| scratch.put_pixel(x, y, p));

        info!(
            "width pass: {} -> {} ({:?})",
            width, newwidth, self.model
        );
        let mut wide = Oriented::new(scratch);
        wide.image = resize_width(wide.image, newwidth, self.model, &mut wide.tracker)?;
        let intermediate = wide.image;

        info!(
            "height pass: {} -> {} ({:?})",
            height, newheight, self.model
        );
        let mut tall = Oriented::new(intermediate.clone()).turn();
        tall.image = resize_width(tall.image, newheight, self.model, &mut tall.tracker)?;
        let tall = tall.upright();
        tall.tracker.check(newwidth, newheight)?;

        Ok(Resized {
            vertical_seams: paint_seams(self.image, wide.tracker.mask(), red()),
            horizontal_seams: paint_seams(&intermediate, tall.tracker.mask(), black()),
            resized: tall.image,
        })
    }

    /// Given an image and a desired new width and height, repeatedly carve
    /// (or duplicate) seams, returning only the resized image.
    pub fn carve(&self, newwidth: u32, newheight: u32) -> Result<Scratch<P, S>> {
        self.resize(newwidth, newheight).map(|r| r.resized)
    }
}

/// Resize `image` to `out_width` x `out_height`, using forward energy
/// when `use_forward_energy` is set.
pub fn resize<I, P, S>(
    image: &I,
    out_height: u32,
    out_width: u32,
    use_forward_energy: bool,
) -> Result<Resized<P, S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
    Rgb<S>: Pixel<Subpixel = S>,
{
    SeamCarver::new(image)
        .energy(EnergyModel::from(use_forward_energy))
        .resize(out_width, out_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, RgbImage};
    use std::collections::HashSet;

    const IMAGE_DATA: [u8; 20] = [1, 1, 1, 1, 1, 1, 9, 1, 9, 1, 1, 1, 1, 1, 1, 9, 1, 9, 1, 9];

    fn checkerboard() -> ImageBuffer<Luma<u8>, Vec<u8>> {
        ImageBuffer::from_raw(5, 4, IMAGE_DATA.to_vec()).unwrap()
    }

    fn busy(width: u32, height: u32) -> RgbImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            let v = ((x * 37 + y * 91 + x * y) % 256) as u8;
            Rgb([v, v.wrapping_mul(3), 255 - v])
        })
    }

    fn rows(image: &ImageBuffer<Luma<u8>, Vec<u8>>) -> Vec<Vec<u8>> {
        image
            .rows()
            .map(|row| row.map(|p| p[0]).collect())
            .collect()
    }

    #[test]
    fn removing_a_seam_compacts_rows() {
        let carved = remove_vertical_seam(&checkerboard(), &[0, 1, 0, 1]).unwrap();
        assert_eq!(carved.dimensions(), (4, 4));
        assert_eq!(
            rows(&carved),
            vec![
                vec![1, 1, 1, 1],
                vec![1, 1, 9, 1],
                vec![1, 1, 1, 1],
                vec![9, 9, 1, 9],
            ]
        );
    }

    #[test]
    fn seams_must_cover_every_row() {
        assert_eq!(
            remove_vertical_seam(&checkerboard(), &[0, 1]).unwrap_err(),
            SeamError::SeamLength {
                expected: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn seams_outside_the_image_are_rejected() {
        let image: ImageBuffer<Luma<u8>, Vec<u8>> =
            ImageBuffer::from_raw(5, 2, (0u8..10).collect()).unwrap();
        assert_eq!(
            remove_vertical_seam(&image, &[5, 5]).unwrap_err(),
            SeamError::SeamOutOfBounds {
                row: 0,
                column: 5,
                width: 5
            }
        );
        assert_eq!(
            duplicate_vertical_seams(&image, &[vec![1, 7]]).unwrap_err(),
            SeamError::SeamOutOfBounds {
                row: 1,
                column: 7,
                width: 5
            }
        );
        assert_eq!(
            remove_vertical_seam(&image, &[0, 2]).unwrap_err(),
            SeamError::BrokenSeam { row: 0, next: 1 }
        );
    }

    #[test]
    fn repeated_columns_grow_image_and_map_alike() {
        let image: ImageBuffer<Luma<u8>, Vec<u8>> =
            ImageBuffer::from_raw(3, 1, vec![10u8, 20, 30]).unwrap();
        let seams = vec![vec![1], vec![1]];
        let grown = duplicate_vertical_seams(&image, &seams).unwrap();
        assert_eq!(rows(&grown), vec![vec![10, 20, 20, 20, 30]]);
        let mut tracker = SeamTracker::new(3, 1);
        tracker.duplicate(&columns_per_row(1, &seams));
        tracker.check(grown.width(), grown.height()).unwrap();
    }

    #[test]
    fn no_seams_through_undefined_energy() {
        let intensity = crate::twodmap::TwoDimensionalMap::from_fn(3, 2, |_, _| f32::NAN);
        let costs = CostMatrix::build(&intensity, EnergyModel::Gradient).unwrap();
        assert!(find_disjoint_seams(costs, 3).unwrap().is_empty());
    }

    #[test]
    fn undefined_energy_stops_insertion() {
        // Every gradient touches a NaN column.
        let image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::from_fn(4, 3, |x, _| {
            if x % 2 == 1 {
                Rgb([f32::NAN, f32::NAN, f32::NAN])
            } else {
                Rgb([0.5, 0.25, 0.75])
            }
        });
        assert_eq!(
            resize(&image, 3, 6, false).unwrap_err(),
            SeamError::NoFiniteSeam {
                width: 4,
                height: 3
            }
        );
    }

    #[test]
    fn duplicates_land_next_to_their_source() {
        let grown =
            duplicate_vertical_seams(&checkerboard(), &[vec![0, 1, 0, 1], vec![2, 2, 2, 3]])
                .unwrap();
        assert_eq!(grown.dimensions(), (7, 4));
        assert_eq!(
            rows(&grown),
            vec![
                vec![1, 1, 1, 1, 1, 1, 1],
                vec![1, 9, 9, 1, 1, 9, 1],
                vec![1, 1, 1, 1, 1, 1, 1],
                vec![9, 1, 1, 9, 1, 1, 9],
            ]
        );
    }

    #[test]
    fn shrinking_one_column_takes_the_cheapest_seam() {
        let out = resize(&checkerboard(), 4, 4, false).unwrap();
        assert_eq!(
            rows(&out.resized),
            vec![
                vec![1, 1, 1, 1],
                vec![1, 1, 9, 1],
                vec![1, 1, 1, 1],
                vec![9, 9, 1, 9],
            ]
        );
        let red_at: Vec<(u32, u32)> = out
            .vertical_seams
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == red())
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(red_at, vec![(0, 0), (1, 1), (0, 2), (1, 3)]);

        let again = resize(&checkerboard(), 4, 4, false).unwrap();
        assert_eq!(again.resized, out.resized);
    }

    #[test]
    fn enlarging_duplicates_distinct_pixels() {
        let out = resize(&checkerboard(), 4, 7, false).unwrap();
        assert_eq!(out.resized.dimensions(), (7, 4));
        assert_eq!(
            rows(&out.resized),
            vec![
                vec![1, 1, 1, 1, 1, 1, 1],
                vec![1, 9, 9, 1, 1, 9, 1],
                vec![1, 1, 1, 1, 1, 1, 1],
                vec![9, 1, 1, 9, 1, 1, 9],
            ]
        );
        for y in 0..4 {
            let marked = (0..5)
                .filter(|x| *out.vertical_seams.get_pixel(*x, y) == red())
                .count();
            assert_eq!(marked, 2);
        }
    }

    #[test]
    fn same_size_is_unchanged() {
        let image = busy(9, 7);
        for forward in &[false, true] {
            let out = resize(&image, 7, 9, *forward).unwrap();
            assert_eq!(out.resized, image);
            assert!(out.vertical_seams.pixels().all(|p| *p != red()));
            assert!(out.horizontal_seams.pixels().all(|p| *p != black()));
        }
    }

    #[test]
    fn shapes_follow_the_target() {
        let image = busy(12, 10);
        for forward in &[false, true] {
            for &(w, h) in &[(8, 10), (12, 6), (15, 10), (12, 13), (9, 14), (20, 5)] {
                let out = resize(&image, h, w, *forward).unwrap();
                assert_eq!(out.resized.dimensions(), (w, h));
                assert_eq!(out.vertical_seams.dimensions(), (12, 10));
                assert_eq!(out.horizontal_seams.dimensions(), (w, 10));
            }
        }
    }

    #[test]
    fn vertical_mask_covers_one_pixel_per_row_per_seam() {
        let image = busy(12, 10);
        for &w in &[7, 16] {
            let mut tracker = SeamTracker::new(12, 10);
            let scratch = resize_width(image.clone(), w, EnergyModel::Forward, &mut tracker)
                .unwrap();
            assert_eq!(scratch.width(), w);
            let k = (w as i64 - 12).abs() as usize;
            assert_eq!(tracker.seams(), k);
            assert_eq!(tracker.marked(), k * 10);
        }
    }

    #[test]
    fn insertion_batches_share_no_pixel() {
        let image = busy(10, 6);
        let costs = CostMatrix::build(&to_grayscale(&image), EnergyModel::Gradient).unwrap();
        let seams = find_disjoint_seams(costs, 4).unwrap();
        assert_eq!(seams.len(), 4);
        let mut seen = HashSet::new();
        for seam in &seams {
            for (y, x) in seam.iter().enumerate() {
                assert!(seen.insert((*x, y)));
            }
        }
    }

    #[test]
    fn large_enlargements_take_several_batches() {
        let image = busy(3, 4);
        let out = resize(&image, 4, 10, true).unwrap();
        assert_eq!(out.resized.dimensions(), (10, 4));
    }

    #[test]
    fn horizontal_seams_are_rows_of_the_intermediate_image() {
        let image = busy(6, 8);
        let out = resize(&image, 5, 6, false).unwrap();
        // Three seams, each crossing every column exactly once.
        for x in 0..6 {
            let marked = (0..8)
                .filter(|y| *out.horizontal_seams.get_pixel(x, *y) == black())
                .count();
            assert_eq!(marked, 3);
        }
    }

    #[test]
    fn sixteen_bit_images_resize_with_overlays() {
        let image: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_fn(6, 4, |x, y| {
            Luma([((x * 7919 + y * 104_729) % 65_536) as u16])
        });
        let out = resize(&image, 5, 4, true).unwrap();
        assert_eq!(out.resized.dimensions(), (4, 5));
        assert_eq!(out.vertical_seams.dimensions(), (6, 4));
        let red_pixels = out
            .vertical_seams
            .pixels()
            .filter(|p| **p == Rgb([65535, 0, 0]))
            .count();
        assert_eq!(red_pixels, 2 * 4);
    }

    #[test]
    fn carve_can_shrink_to_a_single_pixel() {
        let image = busy(4, 3);
        let out = SeamCarver::new(&image).carve(1, 1).unwrap();
        assert_eq!(out.dimensions(), (1, 1));
    }

    #[test]
    fn bad_targets_fail_before_carving() {
        let image = busy(4, 3);
        assert_eq!(
            resize(&image, 0, 3, false).unwrap_err(),
            SeamError::InvalidTarget {
                width: 3,
                height: 0
            }
        );
        let empty: RgbImage = ImageBuffer::new(0, 3);
        assert_eq!(
            resize(&empty, 3, 3, false).unwrap_err(),
            SeamError::InvalidShape {
                width: 0,
                height: 3
            }
        );
        let mut tracker = SeamTracker::new(4, 3);
        assert!(remove_seams(image, 4, EnergyModel::Gradient, &mut tracker).is_err());
        assert_eq!(tracker.seams(), 0);
    }
}
