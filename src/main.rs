/*!
  fontasm compiles segment-display font artwork into 8086 assembly.

  `fontasm font` runs the core pipeline: the image is decoded into a pixel
  grid, flood-filled into 4-connected uniform-color segments, each segment's
  rows are compressed to contiguous runs, and the runs become the minimal
  sequence of framebuffer writes for the page-interleaved target.

  `fontasm chartable` emits the static 55-segment glyph lookup table for the
  segment-display target; it shares nothing with the pipeline above.
*/

mod address;
mod chartable;
mod codegen;
mod compile;
mod errors;
mod grid;
mod run;
mod segment;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use crate::address::AddressMapper;
use crate::compile::Compilation;
use crate::grid::PixelGrid;

#[derive(Parser)]
#[command(name = "fontasm", about = "Converts font images to .asm code")]
struct Cli {
  #[command(subcommand)]
  command: Command,

  /// Debug logging and a per-segment summary on stderr
  #[arg(short, long, global = true)]
  verbose: bool,
}

#[derive(Subcommand)]
enum Command {
  /// Compile a font image into per-segment framebuffer writes
  Font {
    /// Image file to convert
    filename: PathBuf,

    /// Output file. Default: stdout
    #[arg(short, long, value_name = "FILE")]
    output_file: Option<PathBuf>,

    /// BIOS video mode number of the target
    #[arg(short, long, default_value_t = 4)]
    mode: u8,
  },

  /// Emit the static 55-segment glyph lookup table
  Chartable {
    /// Output file. Default: stdout
    #[arg(short, long, value_name = "FILE")]
    output_file: Option<PathBuf>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  // Logs go to stderr; stdout belongs to the assembly output.
  let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info };
  TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;

  match cli.command {

    Command::Font { filename, output_file, mode } => {
      // Mode validation precedes the (potentially large) image decode.
      let mapper = AddressMapper::for_mode(mode)?;
      let grid = PixelGrid::load(&filename)?;
      info!("{}: {}x{}", filename.display(), grid.width(), grid.height());

      let compilation = Compilation::compile(&grid, &mapper)?;
      if cli.verbose {
        compilation.summary().print(&mut io::stderr())?;
      }

      with_output(output_file, |out| compilation.write_assembly(out))?;
    }

    Command::Chartable { output_file } => {
      with_output(output_file, chartable::write_table)?;
    }

  }

  Ok(())
}

/// Runs the writer against the chosen sink: a created file, or stdout.
fn with_output(
  path   : Option<PathBuf>,
  writer : impl FnOnce(&mut dyn Write) -> io::Result<()>,
) -> io::Result<()>
{
  match path {
    Some(path) => {
      let mut out = BufWriter::new(File::create(path)?);
      writer(&mut out)?;
      out.flush()
    }
    None => writer(&mut io::stdout().lock()),
  }
}
