// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use seamdoppel::{
    calculate_energy, energy_to_image, Doppelganger, Extremum, Kernel, Replacement, SeamCarver,
    SeamPatcher, Swap,
};
use std::process;
use std::str::FromStr;

extern crate clap;
extern crate image;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use failure::{format_err, Error, ResultExt};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use log::{error, info};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Encode,
    Noise,
    Fill,
    Swap,
    Convolve,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "encode" => Ok(Mode::Encode),
            "noise" => Ok(Mode::Noise),
            "fill" => Ok(Mode::Fill),
            "swap" => Ok(Mode::Swap),
            "convolve" => Ok(Mode::Convolve),
            _ => Err(format_err!("unknown replacement mode '{}'", mode)),
        }
    }
}

// An optional argument, parsed.
fn number<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    matches
        .value_of(name)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|err| format_err!("--{} '{}': {}", name, value, err))
        })
        .transpose()
}

fn color(value: &str) -> Result<Rgb<u8>, Error> {
    let channels = value
        .split(',')
        .map(|channel| channel.trim().parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|err| format_err!("--color '{}': {}", value, err))?;
    match channels.as_slice() {
        &[r, g, b] => Ok(Rgb([r, g, b])),
        _ => Err(format_err!("--color '{}': expected three channels", value)),
    }
}

fn read_image(path: &str) -> Result<RgbImage, Error> {
    let image = image::open(path).context(format!("could not read {}", path))?;
    Ok(image.to_rgb())
}

fn write_image(image: &RgbImage, path: &str) -> Result<(), Error> {
    image.save(path).context(format!("could not write {}", path))?;
    Ok(())
}

// Donors are stretched to the size of the image they donate to.
fn read_donor(path: &str, (width, height): (u32, u32)) -> Result<RgbImage, Error> {
    let donor = read_image(path)?;
    if donor.dimensions() == (width, height) {
        return Ok(donor);
    }
    info!("resizing donor {} to {}x{}", path, width, height);
    Ok(imageops::resize(&donor, width, height, FilterType::Triangle))
}

fn carve(matches: &ArgMatches) -> Result<(), Error> {
    let source = read_image(matches.value_of("input").unwrap_or_default())?;
    let (width, height) = source.dimensions();
    let newwidth = number(matches, "width")?.unwrap_or(width);
    let newheight = number(matches, "height")?.unwrap_or(height);

    let mut carver = SeamCarver::new(&source);
    carver.carve(newwidth, newheight)?;
    info!("carved {}x{} to {}x{}", width, height, newwidth, newheight);
    write_image(carver.picture(), matches.value_of("output").unwrap_or_default())
}

fn replace(matches: &ArgMatches) -> Result<(), Error> {
    let source = read_image(matches.value_of("input").unwrap_or_default())?;
    let (width, height) = source.dimensions();

    let (rows, columns) = match number::<f64>(matches, "fraction")? {
        Some(p) if p < 0.0 || p > 1.0 => return Err(format_err!("--fraction {} is not in 0..1", p)),
        Some(p) => (
            (p * f64::from(height)).round() as u32,
            (p * f64::from(width)).round() as u32,
        ),
        None => (
            number(matches, "rows")?.unwrap_or(0),
            number(matches, "columns")?.unwrap_or(0),
        ),
    };
    let extremum = if matches.is_present("largest") {
        Extremum::Maximum
    } else {
        Extremum::Minimum
    };

    let mut carver = SeamCarver::new(&source);
    if let Some(seed) = number(matches, "seed")? {
        carver = carver.with_seed(seed);
    }

    let mode: Mode = matches.value_of("mode").unwrap_or("encode").parse()?;
    let donor = match mode {
        Mode::Swap => {
            let path = matches
                .value_of("donor")
                .ok_or_else(|| format_err!("swap mode needs a --donor image"))?;
            Some(read_donor(path, (width, height))?)
        }
        _ => None,
    };
    let kernel = match (mode, number::<f64>(matches, "sigma")?) {
        (Mode::Convolve, Some(sigma)) => Some(match number::<usize>(matches, "size")? {
            Some(side) => Kernel::gaussian(side, sigma)?,
            None => Kernel::gaussian_for(sigma)?,
        }),
        (Mode::Convolve, None) => Some(Kernel::sharpen(1.0)),
        _ => None,
    };

    let replacement = match (mode, &donor, &kernel) {
        (Mode::Encode, _, _) => Replacement::Doppelganger,
        (Mode::Noise, _, _) => Replacement::Noise,
        (Mode::Fill, _, _) => Replacement::Fill(color(matches.value_of("color").unwrap_or("0,0,0"))?),
        (Mode::Swap, Some(donor), _) => Replacement::Swap(donor),
        (Mode::Convolve, _, Some(kernel)) => Replacement::Convolve(kernel),
        _ => return Err(format_err!("no replacement for mode {:?}", mode)),
    };

    if matches.is_present("ranked") {
        carver.replace_ranked_seams(rows, columns, extremum, replacement)?;
    } else {
        carver.replace_seams(rows, columns, extremum, replacement)?;
    }
    info!(
        "replaced {} rows and {} columns of a {}x{} image ({:?})",
        rows, columns, width, height, mode
    );
    write_image(carver.picture(), matches.value_of("output").unwrap_or_default())
}

fn patch(matches: &ArgMatches) -> Result<(), Error> {
    let source = read_image(matches.value_of("input").unwrap_or_default())?;
    let patched = match matches.value_of("donor") {
        Some(path) => {
            let donor = read_donor(path, source.dimensions())?;
            SeamPatcher::new(Swap::new(&donor)).patch(&source)?
        }
        None => SeamPatcher::new(Doppelganger).patch(&source)?,
    };
    info!("patched {}x{} image", source.width(), source.height());
    write_image(&patched, matches.value_of("output").unwrap_or_default())
}

fn energy(matches: &ArgMatches) -> Result<(), Error> {
    let source = read_image(matches.value_of("input").unwrap_or_default())?;
    let energy = calculate_energy::<u64, _, _>(&source);
    let picture = energy_to_image(&energy);
    picture
        .save(matches.value_of("output").unwrap_or_default())
        .context("could not write the energy map")?;
    Ok(())
}

fn files<'a, 'b>(subcommand: App<'a, 'b>) -> App<'a, 'b> {
    subcommand
        .arg(
            Arg::with_name("input")
                .help("The image to read")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the result")
                .required(true)
                .index(2),
        )
}

fn main() {
    env_logger::init();

    let matches = App::new("seamdoppel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Seam carving and seam doppelganger encoding")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            files(SubCommand::with_name("carve").about("Remove seams until the image fits"))
                .arg(
                    Arg::with_name("width")
                        .long("width")
                        .takes_value(true)
                        .help("Target width"),
                )
                .arg(
                    Arg::with_name("height")
                        .long("height")
                        .takes_value(true)
                        .help("Target height"),
                ),
        )
        .subcommand(
            files(SubCommand::with_name("replace").about("Paint over seams, keeping the size"))
                .arg(
                    Arg::with_name("fraction")
                        .long("fraction")
                        .takes_value(true)
                        .conflicts_with_all(&["rows", "columns"])
                        .help("Share of rows and columns to replace, 0 to 1"),
                )
                .arg(
                    Arg::with_name("rows")
                        .long("rows")
                        .takes_value(true)
                        .help("Horizontal seams to replace"),
                )
                .arg(
                    Arg::with_name("columns")
                        .long("columns")
                        .takes_value(true)
                        .help("Vertical seams to replace"),
                )
                .arg(
                    Arg::with_name("mode")
                        .long("mode")
                        .takes_value(true)
                        .possible_values(&["encode", "noise", "fill", "swap", "convolve"])
                        .default_value("encode")
                        .help("What to paint over each seam"),
                )
                .arg(
                    Arg::with_name("donor")
                        .long("donor")
                        .takes_value(true)
                        .help("Image to take pixels from in swap mode"),
                )
                .arg(
                    Arg::with_name("color")
                        .long("color")
                        .takes_value(true)
                        .help("Fill color as r,g,b"),
                )
                .arg(
                    Arg::with_name("seed")
                        .long("seed")
                        .takes_value(true)
                        .help("Seed for noise mode"),
                )
                .arg(
                    Arg::with_name("largest")
                        .long("largest")
                        .help("Replace the highest energy seams instead of the lowest"),
                )
                .arg(
                    Arg::with_name("ranked")
                        .long("ranked")
                        .help("Take every seam from one search per direction"),
                )
                .arg(
                    Arg::with_name("sigma")
                        .long("sigma")
                        .takes_value(true)
                        .help("Gaussian blur for convolve mode; sharpens when absent"),
                )
                .arg(
                    Arg::with_name("size")
                        .long("size")
                        .takes_value(true)
                        .requires("sigma")
                        .help("Side of the gaussian kernel"),
                ),
        )
        .subcommand(
            files(SubCommand::with_name("patch").about("Restore replaced seams")).arg(
                Arg::with_name("donor")
                    .long("donor")
                    .takes_value(true)
                    .help("Undo a donor swap instead of doppelganger encoding"),
            ),
        )
        .subcommand(files(
            SubCommand::with_name("energy").about("Write the energy map as a grayscale image"),
        ))
        .get_matches();

    let result = match matches.subcommand() {
        ("carve", Some(sub)) => carve(sub),
        ("replace", Some(sub)) => replace(sub),
        ("patch", Some(sub)) => patch(sub),
        ("energy", Some(sub)) => energy(sub),
        (other, _) => Err(format_err!("unknown command '{}'", other)),
    };

    if let Err(err) = result {
        error!("{}", err);
        eprintln!("seamdoppel: {}", err);
        process::exit(1);
    }
}
