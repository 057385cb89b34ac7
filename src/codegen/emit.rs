/*!
  Turns a segment's row runs into the shortest write sequence that sets the
  run's pixels, honoring byte and word alignment.
*/

use log::debug;

use crate::address::AddressMapper;
use crate::run::CompressedSegment;

use super::instruction::WriteOp;

/// Mask ORed into a byte holding a partial run.
///
/// Known limitation: the mask is a constant full byte rather than the precise
/// bits of the partial span at its starting position, so a masked write also
/// sets its byte's other pixels. Generated output is matched against the
/// reference tool, which has the same behavior, so a corrected formula must
/// not be introduced here on its own.
fn partial_mask(_start: usize, _pixels: usize) -> u8 {
  0xff
}

/**
  Emits the write sequence that turns a segment on. Rows are walked in
  ascending order and each run is consumed left to right:

  - run start byte-aligned, two or more whole bytes left: one word fill of
    `floor(bytes/2)` words, consuming that many words' worth of pixels (an
    odd trailing byte falls through to the next iteration);
  - run start byte-aligned, exactly one whole byte left: one byte fill;
  - otherwise: one masked OR covering up to the next byte boundary or the
    rest of the run, whichever is shorter.

  `image_width` fixes the horizontal centering shift for images narrower
  than the display.
*/
pub fn emit_segment_on(
  segment     : &CompressedSegment,
  mapper      : &AddressMapper,
  image_width : usize,
) -> Vec<WriteOp>
{
  let shift   = mapper.centering_offset(image_width);
  let mut ops = Vec::new();

  for (&row, run) in &segment.rows {
    let mut start  = run.start + shift;
    let mut length = run.length;

    while length > 0 {
      let offset = mapper.offset(row, start);
      let consumed;

      if start % mapper.pixels_per_byte == 0 {
        let bytes = length / mapper.pixels_per_byte;

        if bytes >= 2 {
          let words = bytes / 2;
          ops.push(WriteOp::WordFill { offset, count: words });
          consumed = words * 2 * mapper.pixels_per_byte;
        } else if bytes == 1 {
          ops.push(WriteOp::ByteFill { offset });
          consumed = mapper.pixels_per_byte;
        } else {
          // Aligned, but fewer pixels remain than one byte holds.
          ops.push(WriteOp::MaskedOr { offset, mask: partial_mask(start, length) });
          consumed = length;
        }
      } else {
        // The run starts inside a byte: OR up to the next byte boundary.
        let to_boundary = mapper.pixels_per_byte - start % mapper.pixels_per_byte;
        consumed = to_boundary.min(length);
        ops.push(WriteOp::MaskedOr { offset, mask: partial_mask(start, consumed) });
      }

      start  += consumed;
      length -= consumed;
    }
  }

  debug!("segment {}: {} write ops", segment.id, ops.len());
  ops
}

/// The "turn segment off" counterpart. The contract exists so a second
/// visibility variant can slot in later, but no clearing instructions are
/// generated yet: the sequence is empty.
pub fn emit_segment_off(_segment: &CompressedSegment) -> Vec<WriteOp> {
  Vec::new()
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use super::*;
  use crate::run::RowRun;

  /// A one-row segment, emitted without a centering shift.
  fn emit_row(start: usize, length: usize) -> Vec<WriteOp> {
    let mut rows = BTreeMap::new();
    rows.insert(0, RowRun { start, length });
    let segment = CompressedSegment { id: 0, color: 1, rows };
    let mapper  = AddressMapper::for_mode(4).unwrap();
    emit_segment_on(&segment, &mapper, mapper.display_width)
  }

  #[test]
  fn two_aligned_bytes_become_one_word_fill() {
    // start 0, length 8, four pixels per byte: both bytes in one stosw,
    // never two stosb.
    let ops = emit_row(0, 8);
    assert_eq!(ops, vec![WriteOp::WordFill { offset: 0, count: 1 }]);
  }

  #[test]
  fn short_unaligned_run_is_one_masked_or() {
    // start 1, length 2: stays inside the first byte.
    let ops = emit_row(1, 2);
    assert_eq!(ops, vec![WriteOp::MaskedOr { offset: 0, mask: 0xff }]);
  }

  #[test]
  fn odd_trailing_byte_falls_through_to_a_byte_fill() {
    // Three whole bytes: one word fill covers two, the third gets a stosb.
    let ops = emit_row(0, 12);
    assert_eq!(ops, vec![
      WriteOp::WordFill { offset: 0, count: 1 },
      WriteOp::ByteFill { offset: 2 },
    ]);
  }

  #[test]
  fn aligned_sub_byte_tail_is_masked() {
    let ops = emit_row(0, 3);
    assert_eq!(ops, vec![WriteOp::MaskedOr { offset: 0, mask: 0xff }]);
  }

  #[test]
  fn long_unaligned_run_reaches_alignment_then_fills_words() {
    // start 2: two pixels to the boundary, then 20 pixels = 5 bytes, so a
    // 2-word fill, a byte fill, and a final sub-byte tail of 2.
    let ops = emit_row(2, 24);
    assert_eq!(ops, vec![
      WriteOp::MaskedOr { offset: 0, mask: 0xff },
      WriteOp::WordFill { offset: 1, count: 2 },
      WriteOp::ByteFill { offset: 5 },
      WriteOp::MaskedOr { offset: 6, mask: 0xff },
    ]);
  }

  #[test]
  fn centering_shift_changes_alignment_decisions() {
    // A 4-pixel image centers at x 158, which is mid-byte: the aligned
    // 4-pixel run becomes two masked ORs.
    let mut rows = BTreeMap::new();
    rows.insert(0, RowRun { start: 0, length: 4 });
    let segment = CompressedSegment { id: 0, color: 1, rows };
    let mapper  = AddressMapper::for_mode(4).unwrap();
    let ops = emit_segment_on(&segment, &mapper, 4);
    assert_eq!(ops, vec![
      WriteOp::MaskedOr { offset: 39, mask: 0xff },
      WriteOp::MaskedOr { offset: 40, mask: 0xff },
    ]);
  }

  #[test]
  fn segment_off_emits_nothing() {
    let segment = CompressedSegment { id: 0, color: 1, rows: BTreeMap::new() };
    assert!(emit_segment_off(&segment).is_empty());
  }
}
