// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::process;

extern crate clap;
extern crate image;

use clap::{value_t, App, Arg, ArgMatches};
use failure::Error;
use log::info;
use seamcarve::{EnergyModel, SeamCarver};

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let input = matches.value_of("INPUT").unwrap_or_default();
    let output = matches.value_of("OUTPUT").unwrap_or_default();

    let image = image::open(input)?.to_rgb8();
    let (width, height) = image.dimensions();
    let newwidth = match matches.value_of("width") {
        Some(_) => value_t!(matches, "width", u32)?,
        None => width,
    };
    let newheight = match matches.value_of("height") {
        Some(_) => value_t!(matches, "height", u32)?,
        None => height,
    };
    let model = EnergyModel::from(matches.is_present("forward"));

    info!("{}: {}x{} -> {}x{}", input, width, height, newwidth, newheight);
    let carved = SeamCarver::new(&image)
        .energy(model)
        .resize(newwidth, newheight)?;

    carved.resized.save(output)?;
    if let Some(path) = matches.value_of("vertical-seams") {
        carved.vertical_seams.save(path)?;
    }
    if let Some(path) = matches.value_of("horizontal-seams") {
        carved.horizontal_seams.save(path)?;
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let matches = App::new("seamcarve")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image resizing by seam carving")
        .arg(
            Arg::with_name("INPUT")
                .help("The image to resize")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Where to write the resized image")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("width")
                .short("w")
                .long("width")
                .takes_value(true)
                .help("Output width in pixels (default: unchanged)"),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .takes_value(true)
                .help("Output height in pixels (default: unchanged)"),
        )
        .arg(
            Arg::with_name("forward")
                .short("f")
                .long("forward")
                .help("Use forward energy instead of the plain gradient"),
        )
        .arg(
            Arg::with_name("vertical-seams")
                .long("vertical-seams")
                .takes_value(true)
                .value_name("FILE")
                .help("Save the original image with vertical seams in red"),
        )
        .arg(
            Arg::with_name("horizontal-seams")
                .long("horizontal-seams")
                .takes_value(true)
                .value_name("FILE")
                .help("Save the width-resized image with horizontal seams in black"),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("seamcarve: {}", e);
        process::exit(1);
    }
}
