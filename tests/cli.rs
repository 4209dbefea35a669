// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use assert_cmd::Command;
use image::{ImageBuffer, Rgb, RgbImage};
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn sample(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("sample.png");
    let image: RgbImage = ImageBuffer::from_fn(12, 9, |x, y| {
        let v = ((x * 29 + y * 53) % 256) as u8;
        Rgb([v, 255 - v, v / 2])
    });
    image.save(&path).unwrap();
    path
}

#[test]
fn resizes_both_axes_and_writes_overlays() {
    let dir = TempDir::new().unwrap();
    let input = sample(dir.path());
    let output = dir.path().join("out.png");
    let vertical = dir.path().join("vertical.png");
    let horizontal = dir.path().join("horizontal.png");

    Command::cargo_bin("seamcarve")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .args(&["--width", "8", "--height", "11", "--forward"])
        .arg("--vertical-seams")
        .arg(&vertical)
        .arg("--horizontal-seams")
        .arg(&horizontal)
        .assert()
        .success();

    assert_eq!(image::open(&output).unwrap().to_rgb8().dimensions(), (8, 11));
    assert_eq!(image::open(&vertical).unwrap().to_rgb8().dimensions(), (12, 9));
    assert_eq!(image::open(&horizontal).unwrap().to_rgb8().dimensions(), (8, 9));
}

#[test]
fn missing_dimensions_keep_the_input_size() {
    let dir = TempDir::new().unwrap();
    let input = sample(dir.path());
    let output = dir.path().join("out.png");

    Command::cargo_bin("seamcarve")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .args(&["--width", "10"])
        .assert()
        .success();

    assert_eq!(image::open(&output).unwrap().to_rgb8().dimensions(), (10, 9));
}

#[test]
fn zero_width_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = sample(dir.path());
    let output = dir.path().join("out.png");

    Command::cargo_bin("seamcarve")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .args(&["--width", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid target"));
    assert!(!output.exists());
}

#[test]
fn unreadable_input_fails() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("seamcarve")
        .unwrap()
        .arg(dir.path().join("missing.png"))
        .arg(dir.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("seamcarve:"));
}

#[test]
fn short_width_flag_is_accepted() {
    let dir = TempDir::new().unwrap();
    let input = sample(dir.path());
    let output = dir.path().join("out.png");

    Command::cargo_bin("seamcarve")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .args(&["-w", "11", "-f"])
        .assert()
        .success();

    assert_eq!(image::open(&output).unwrap().to_rgb8().dimensions(), (11, 9));
}
