//! Dumps an 8-bit RGBA PNG as a binary PPM.

use anyhow::{anyhow, Context};
use clap::{ArgAction, Parser};
use log::{info, LevelFilter, Log, Metadata, Record};
use pngdump::{decode_with, ppm::PpmWriter, DecodeOptions, ZlibInflater};
use std::{fs, path::PathBuf};

/// Decode an 8-bit RGBA PNG and write its RGB pixels as a PPM image
#[derive(Parser)]
#[command(name = "pngdump", version, about, long_about = None)]
struct Cli {
    /// PNG file to decode
    input: PathBuf,

    /// PPM file to write
    #[arg(short, long, default_value = "output.ppm")]
    output: PathBuf,

    /// Fail on chunks whose CRC-32 does not match their contents
    #[arg(long)]
    verify_crc: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

// Minimal `log` backend; records above `log::max_level()`, which `-v` sets, are dropped.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    log::set_logger(&LOGGER).map_err(|e| anyhow!("failed to install logger: {}", e))?;
    log::set_max_level(level);

    let bytes = fs::read(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let options = DecodeOptions { verify_checksums: cli.verify_crc };
    let image = decode_with(&bytes, &options, &ZlibInflater)
        .with_context(|| format!("failed to decode {}", cli.input.display()))?;

    info!("decoded {}x{} image", image.width(), image.height());

    let mut ppm = PpmWriter::create(&cli.output, image.width(), image.height())
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    for row in image.rows() {
        ppm.write_scanline(row)?;
    }
    ppm.finish().with_context(|| format!("failed to write {}", cli.output.display()))?;

    info!("wrote {}", cli.output.display());

    Ok(())
}
