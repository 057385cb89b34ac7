/*!
  Run compression. Each row of a segment must be a single contiguous span of
  pixels; the span replaces the raw column set. Rows that are not contiguous
  are a hard compiler error rather than being split into several runs, since
  the glyph shapes this tool targets are convex per row.
*/

use std::collections::BTreeMap;

use crate::errors::CompileError;
use crate::grid::Color;
use crate::segment::{Segment, SegmentId};

/// A contiguous horizontal span of pixels within one row.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RowRun {
  /// Leftmost occupied column.
  pub start  : usize,
  /// Count of occupied pixels.
  pub length : usize,
}

/// A segment whose rows have been validated and collapsed to runs.
pub struct CompressedSegment {
  pub id    : SegmentId,
  pub color : Color,
  pub rows  : BTreeMap<usize, RowRun>,
}

/// Sorts each row's columns ascending and asserts contiguity:
/// `len - 1 == max - min`. Flood fill visits each pixel once, so the columns
/// hold no duplicates and the check is exact.
pub fn compress(segment: Segment) -> Result<CompressedSegment, CompileError> {
  let mut rows = BTreeMap::new();

  for (row, mut columns) in segment.rows {
    columns.sort_unstable();
    // A row key only exists because at least one pixel was appended.
    let min = columns[0];
    let max = columns[columns.len() - 1];

    if columns.len() - 1 != max - min {
      return Err(CompileError::NonContiguousRun { segment: segment.id, row });
    }

    rows.insert(row, RowRun { start: min, length: columns.len() });
  }

  Ok(CompressedSegment { id: segment.id, color: segment.color, rows })
}
