/*!
  Drives the full pipeline and holds its result.

  ```text
  PixelGrid -> [segment::extract_segments] -> Segments ->
  [run::compress] -> CompressedSegments ->
  [codegen::emit_segment_on] -> WriteOps -> [codegen::write_segment_on] -> text
  ```

  Each stage consumes the previous stage's frozen output; nothing is shared
  for mutation across stages, and everything lives only for one invocation.
*/

use std::io::{self, Write};

use log::info;
use prettytable::{row, Table};

use crate::address::AddressMapper;
use crate::codegen::{self, Opcode, WriteOp};
use crate::errors::CompileError;
use crate::grid::PixelGrid;
use crate::run::{self, CompressedSegment};
use crate::segment::{self, SegmentId};

/// The per-segment instruction sequences. `off` is carried even though it is
/// empty today, so a clearing variant can slot in without changing callers.
pub struct SegmentProgram {
  pub segment : SegmentId,
  pub on      : Vec<WriteOp>,
  pub off     : Vec<WriteOp>,
}

/// The result of compiling one image: the validated segments and one program
/// per segment, in discovery order.
pub struct Compilation {
  pub segments : Vec<CompressedSegment>,
  pub programs : Vec<SegmentProgram>,
}

impl Compilation {
  /// Runs extract -> compress -> emit over the whole grid. The first decode
  /// or contiguity failure aborts the compilation.
  pub fn compile(grid: &PixelGrid, mapper: &AddressMapper)
    -> Result<Compilation, CompileError>
  {
    let segments = segment::extract_segments(grid)
      .into_iter()
      .map(run::compress)
      .collect::<Result<Vec<_>, _>>()?;

    info!("Total segments: {}", segments.len());

    let programs = segments
      .iter()
      .map(|segment| SegmentProgram {
        segment : segment.id,
        on      : codegen::emit_segment_on(segment, mapper, grid.width()),
        off     : codegen::emit_segment_off(segment),
      })
      .collect();

    Ok(Compilation { segments, programs })
  }

  /// Serializes every segment's blocks in order to the output sink.
  pub fn write_assembly(&self, out: &mut dyn Write) -> io::Result<()> {
    for (segment, program) in self.segments.iter().zip(&self.programs) {
      codegen::write_segment_on(out, segment, &program.on)?;
      codegen::write_segment_off(out, segment, &program.off)?;
    }
    Ok(())
  }

  /// A per-segment report for `--verbose` runs.
  pub fn summary(&self) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["SEGMENT", "COLOR", "ROWS", "STOSW", "STOSB", "OR"]);

    for (segment, program) in self.segments.iter().zip(&self.programs) {
      let count = |opcode: Opcode| {
        program.on.iter().filter(|op| op.opcode() == opcode).count()
      };
      table.add_row(row![
        program.segment,
        segment.color,
        segment.rows.len(),
        count(Opcode::WordFill),
        count(Opcode::ByteFill),
        count(Opcode::MaskedOr)
      ]);
    }

    table
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn compile_to_text(bytes: &[u8], width: usize, height: usize) -> String {
    let grid   = PixelGrid::from_bytes(bytes.to_vec(), width, height).unwrap();
    let mapper = AddressMapper::for_mode(4).unwrap();
    let compilation = Compilation::compile(&grid, &mapper).unwrap();

    let mut buffer = Vec::new();
    compilation.write_assembly(&mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
  }

  #[test]
  fn uniform_image_compiles_to_one_centered_segment() {
    // 4x2, one color. Centering shifts x to 158, which is mid-byte, so each
    // row is two masked ORs; row 1 lands in page 1.
    let text = compile_to_text(&[5; 8], 4, 2);

    let expected = "\n\
;=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-;\n\
segment_0_on:\n        \
mov     ax,0b01010101_01010101\n        \
or      [0x0027], 0b11111111\n        \
or      [0x0028], 0b11111111\n        \
or      [0x2027], 0b11111111\n        \
or      [0x2028], 0b11111111\n";
    assert_eq!(text, expected);
  }

  #[test]
  fn segments_are_written_in_discovery_order() {
    // Left column color 1, right column color 2.
    let text = compile_to_text(&[1, 2, 1, 2], 2, 2);
    let first  = text.find("segment_0_on:").unwrap();
    let second = text.find("segment_1_on:").unwrap();
    assert!(first < second);
    assert!(text.find("segment_2_on:").is_none());
  }

  #[test]
  fn recompiling_identical_input_is_byte_identical() {
    let bytes: Vec<u8> = (0u8..64).map(|n| n % 3).collect();
    let a = compile_to_text(&bytes, 8, 8);
    let b = compile_to_text(&bytes, 8, 8);
    assert_eq!(a, b);
  }

  #[test]
  fn contiguity_failure_aborts_the_whole_compilation() {
    // Color 1 occupies columns 0..2 and 3..5 of row 0, joined through row 1,
    // so one segment has a gap at row 0.
    let grid = PixelGrid::from_bytes(vec![
      1, 1, 0, 1, 1,
      1, 1, 1, 1, 1,
    ], 5, 2).unwrap();
    let mapper = AddressMapper::for_mode(4).unwrap();

    let result = Compilation::compile(&grid, &mapper);
    assert!(matches!(
      result,
      Err(CompileError::NonContiguousRun { row: 0, .. })
    ));
  }

  #[test]
  fn summary_counts_operations_per_segment() {
    let grid   = PixelGrid::from_bytes(vec![7; 8], 8, 1).unwrap();
    let mapper = AddressMapper::for_mode(4).unwrap();
    let compilation = Compilation::compile(&grid, &mapper).unwrap();
    // 8 pixels centered at x 156: aligned, exactly two bytes, one stosw.
    assert_eq!(compilation.programs.len(), 1);
    assert_eq!(compilation.programs[0].segment, 0);
    assert_eq!(compilation.programs[0].on.len(), 1);
    assert_eq!(compilation.summary().len(), 1);
  }
}
