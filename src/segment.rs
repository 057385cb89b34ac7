/*!
  Flood-fill extraction of segments: maximal 4-connected regions of uniform
  color. Segment numbering and pixel visitation order are reproducible for a
  fixed input, which pins down the order of everything emitted downstream.
*/

use std::collections::{BTreeMap, VecDeque};

use log::debug;

use crate::grid::{Color, PixelGrid};

pub type SegmentId = usize;

/// One maximal 4-connected region of uniform color. `rows` maps a row index
/// to the columns the segment occupies there, in visitation order. Mutated
/// only during extraction, frozen afterwards.
pub struct Segment {
  pub id    : SegmentId,
  pub color : Color,
  pub rows  : BTreeMap<usize, Vec<usize>>,
}

/// Walks the grid with outer loop x, inner loop y, and flood-fills every
/// unvisited pixel into a new segment. The column-major walk discovers the
/// strokes of a font strip left to right, and segment ids follow discovery
/// order. Every pixel lands in exactly one segment.
pub fn extract_segments(grid: &PixelGrid) -> Vec<Segment> {
  let mut visited  = vec![false; grid.width() * grid.height()];
  let mut segments = Vec::new();

  for x in 0..grid.width() {
    for y in 0..grid.height() {
      if !visited[grid.width() * y + x] {
        let id = segments.len();
        segments.push(fill_segment(grid, &mut visited, id, x, y));
      }
    }
  }

  segments
}

/// Breadth-first fill from (x, y) over 4-connected neighbors of the same
/// color. The explicit FIFO queue keeps the traversal on the heap; a deep
/// region would overflow the call stack if the fill recursed.
fn fill_segment(
  grid    : &PixelGrid,
  visited : &mut [bool],
  id      : SegmentId,
  x       : usize,
  y       : usize,
) -> Segment
{
  let color = grid.color(x, y);
  debug!("segment {}: color {} seeded at ({}, {})", id, color, x, y);

  let mut segment = Segment { id, color, rows: BTreeMap::new() };
  let mut queue   = VecDeque::new();
  queue.push_back((x, y));

  while let Some((x, y)) = queue.pop_front() {
    // A pixel can be enqueued by two of its neighbors before either is
    // popped, so the visited check repeats here.
    if visited[grid.width() * y + x] {
      continue;
    }
    visited[grid.width() * y + x] = true;
    segment.rows.entry(y).or_default().push(x);

    // Left, right, up, down. At an edge the wrapped coordinate is
    // `usize::MAX` and fails the bounds check.
    let neighbors = [
      (x.wrapping_sub(1), y),
      (x + 1, y),
      (x, y.wrapping_sub(1)),
      (x, y + 1),
    ];
    for (nx, ny) in neighbors {
      if nx < grid.width() && ny < grid.height()
        && !visited[grid.width() * ny + nx]
        && grid.color(nx, ny) == color
      {
        queue.push_back((nx, ny));
      }
    }
  }

  segment
}

#[cfg(test)]
mod tests {
  use super::*;

  fn grid(bytes: &[u8], width: usize, height: usize) -> PixelGrid {
    PixelGrid::from_bytes(bytes.to_vec(), width, height).unwrap()
  }

  #[test]
  fn every_pixel_lands_in_exactly_one_segment() {
    // Two colors, an L of 1s inside a field of 0s.
    let grid = grid(&[
      0, 1, 0, 0,
      0, 1, 1, 0,
      0, 0, 0, 0,
    ], 4, 3);

    let segments = extract_segments(&grid);
    let mut seen = vec![0u8; 12];
    for segment in &segments {
      for (&row, columns) in &segment.rows {
        for &column in columns {
          seen[4 * row + column] += 1;
        }
      }
    }
    assert!(seen.iter().all(|&n| n == 1));
  }

  #[test]
  fn connectivity_is_4_not_8() {
    // A checkerboard: every pixel touches its equals only diagonally, so
    // each of the four pixels is its own segment.
    let grid = grid(&[
      1, 0,
      0, 1,
    ], 2, 2);

    let segments = extract_segments(&grid);
    assert_eq!(segments.len(), 4);
  }

  #[test]
  fn discovery_order_is_column_major() {
    // Column 0 is color 2, column 1 is color 7. The left stroke must get
    // id 0 even though row-major order would reach (1, 0) second.
    let grid = grid(&[
      2, 7,
      2, 7,
    ], 2, 2);

    let segments = extract_segments(&grid);
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].color, 2);
    assert_eq!(segments[1].color, 7);
  }

  #[test]
  fn fill_spans_concave_regions() {
    let grid = grid(&[
      1, 1, 1,
      1, 0, 1,
      1, 1, 1,
    ], 3, 3);

    let segments = extract_segments(&grid);
    assert_eq!(segments.len(), 2);
    let ring: usize = segments[0].rows.values().map(Vec::len).sum();
    assert_eq!(ring, 8);
    assert_eq!(segments[1].rows[&1], vec![1]);
  }
}
