/*!
  The textual form of the instruction stream: 8086 assembly, one labeled
  `segment_<id>_on` block per segment. Offsets render as 4-digit hex, masks
  as 8-bit binary, matching the output the target build consumes.
*/

use std::io::{self, Write};

use crate::run::CompressedSegment;

use super::instruction::WriteOp;

/// The word `segment_<id>_on` loads into AX before its stores: every pixel
/// of both packed bytes set to color 1.
pub const FILL_PATTERN: &str = "0b01010101_01010101";

const BANNER: &str =
  ";=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-;";

/// Writes one segment's "on" block: banner, label, the AX register load,
/// then every write operation in generation order.
pub fn write_segment_on(
  out     : &mut dyn Write,
  segment : &CompressedSegment,
  ops     : &[WriteOp],
) -> io::Result<()>
{
  write!(
    out,
    "\n{}\nsegment_{}_on:\n        mov     ax,{}\n",
    BANNER, segment.id, FILL_PATTERN
  )?;

  for op in ops {
    write_op(out, op)?;
  }

  Ok(())
}

/// The "off" block of a segment. Clearing is not generated yet, so nothing
/// is written, not even a label.
pub fn write_segment_off(
  out      : &mut dyn Write,
  _segment : &CompressedSegment,
  ops      : &[WriteOp],
) -> io::Result<()>
{
  debug_assert!(ops.is_empty(), "clearing instructions have no text form yet");
  let _ = out;
  Ok(())
}

fn write_op(out: &mut dyn Write, op: &WriteOp) -> io::Result<()> {
  match *op {

    WriteOp::WordFill { offset, count } => {
      write_destination(out, offset)?;
      if count > 1 {
        writeln!(out, "        mov     cx,{}", count)?;
        writeln!(out, "        rep stosw")
      } else {
        writeln!(out, "        stosw")
      }
    }

    WriteOp::ByteFill { offset } => {
      write_destination(out, offset)?;
      writeln!(out, "        stosb")
    }

    WriteOp::MaskedOr { offset, mask } => {
      writeln!(out, "        or      [0x{:04x}], 0b{:08b}", offset, mask)
    }

  }
}

/// Loads DI with the destination of the following store.
fn write_destination(out: &mut dyn Write, offset: usize) -> io::Result<()> {
  writeln!(out, "        mov     di,0x{:04x}", offset)
}
