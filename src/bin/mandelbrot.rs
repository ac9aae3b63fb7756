// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use mandelbrot::{RenderConfig, RenderError, SamplePolicy};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::str::FromStr;
use tracing::info;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_size(s: &str) -> Result<(), String> {
    match parse_pair::<u32>(s, 'x') {
        Some((w, h)) if w > 0 && h > 0 => Ok(()),
        Some(_) => Err("Image size must be positive in both directions".to_string()),
        None => Err("Could not parse output image size".to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const ZOOM: &str = "zoom";
const BACKEND: &str = "backend";
const THREADS: &str = "threads";
const PRECISION: &str = "precision";
const LEGACY_CENTER: &str = "legacy-center";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelbrot")
        .version("0.1.0")
        .about("Supersampled Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1024x1024")
                .validator(|s| validate_size(&s))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("1")
                .validator(|s| {
                    validate_range(
                        &s,
                        1u8,
                        255u8,
                        "Could not parse zoom",
                        "Zoom must be between 1 and 255",
                    )
                })
                .help("Number of supersampling rounds per pixel"),
        )
        .arg(
            Arg::with_name(BACKEND)
                .required(false)
                .long(BACKEND)
                .short("b")
                .takes_value(true)
                .possible_values(&["complex", "bigfloat"])
                .default_value("complex")
                .help("Numeric backend"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in the renderer"),
        )
        .arg(
            Arg::with_name(PRECISION)
                .required(false)
                .long(PRECISION)
                .short("p")
                .takes_value(true)
                .default_value("128")
                .validator(|s| {
                    validate_range(
                        &s,
                        rug::float::prec_min(),
                        rug::float::prec_max(),
                        "Could not parse precision",
                        "Precision is out of range",
                    )
                })
                .help("Working precision in bits of the bigfloat backend"),
        )
        .arg(
            Arg::with_name(LEGACY_CENTER)
                .long(LEGACY_CENTER)
                .help("At zoom 1, seed each pixel with its centre sample"),
        )
        .get_matches()
}

fn run(matches: &ArgMatches) -> Result<(), RenderError> {
    // The validators above have already vetted every value.
    let (width, height) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let zoom = u8::from_str(matches.value_of(ZOOM).unwrap()).expect("Could not parse zoom.");
    let threads =
        usize::from_str(matches.value_of(THREADS).unwrap()).expect("Could not parse thread count.");
    let precision =
        u32::from_str(matches.value_of(PRECISION).unwrap()).expect("Could not parse precision.");
    let policy = if matches.is_present(LEGACY_CENTER) {
        SamplePolicy::CenterSeeded
    } else {
        SamplePolicy::Diagonal
    };

    let config = RenderConfig::new(width, height)
        .with_threads(threads)
        .with_precision(precision)
        .with_policy(policy);
    let outfile = matches.value_of(OUTPUT).unwrap();
    let backend = matches.value_of(BACKEND).unwrap();
    info!(outfile, backend, width, height, zoom, threads, "rendering");

    let mut output = BufWriter::new(File::create(outfile)?);
    match backend {
        "bigfloat" => mandelbrot::render_bigfloat(&mut output, &config, zoom)?,
        _ => mandelbrot::render_complex(&mut output, &config, zoom)?,
    }
    output.flush()?;
    Ok(())
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
