/*!
  The pixel grid the compiler consumes: an immutable width x height array of
  small integer color codes, loaded once and read-only afterwards.
*/

use std::collections::HashMap;
use std::path::Path;

use image::RgbaImage;

use crate::errors::CompileError;

pub type Color = u8;

pub struct PixelGrid {
  width  : usize,
  height : usize,
  pixels : Vec<Color>,
}

impl PixelGrid {
  /// Wraps raw image bytes, one color code per pixel, row-major. Fails with a
  /// decode error if the byte count does not match the declared geometry.
  pub fn from_bytes(bytes: Vec<u8>, width: usize, height: usize)
    -> Result<PixelGrid, CompileError>
  {
    if bytes.len() != width * height {
      return Err(CompileError::decode(format!(
        "expected {} bytes for a {}x{} image, got {}",
        width * height, width, height, bytes.len()
      )));
    }

    Ok(PixelGrid { width, height, pixels: bytes })
  }

  /// Decodes an image file into a grid.
  pub fn load(path: &Path) -> Result<PixelGrid, CompileError> {
    let decoded = image::open(path)
      .map_err(|e| CompileError::decode(format!("{}: {}", path.display(), e)))?;

    PixelGrid::from_rgba(&decoded.to_rgba8())
  }

  /// Assigns every distinct source color a sequential code, in scan order.
  /// The mapping is injective: two colors never share a code, however close
  /// their channel values, so regions of different colors cannot merge.
  /// More distinct colors than a code can hold is a decode error.
  pub fn from_rgba(image: &RgbaImage) -> Result<PixelGrid, CompileError> {
    let (width, height) = (image.width() as usize, image.height() as usize);

    let mut codes: HashMap<[u8; 4], usize> = HashMap::new();
    let mut pixels = Vec::with_capacity(width * height);

    for pixel in image.pixels() {
      let next = codes.len();
      let code = *codes.entry(pixel.0).or_insert(next);
      if code > usize::from(Color::MAX) {
        return Err(CompileError::decode(format!(
          "more than {} distinct colors in a {}x{} image",
          usize::from(Color::MAX) + 1, width, height
        )));
      }
      pixels.push(code as Color);
    }

    PixelGrid::from_bytes(pixels, width, height)
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn height(&self) -> usize {
    self.height
  }

  /// Color code at (x, y). Callers stay in bounds.
  pub fn color(&self, x: usize, y: usize) -> Color {
    self.pixels[self.width * y + x]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn byte_count_must_match_geometry() {
    let result = PixelGrid::from_bytes(vec![0u8; 7], 4, 2);
    assert!(matches!(result, Err(CompileError::Decode { .. })));
  }

  #[test]
  fn indexing_is_row_major() {
    let grid = PixelGrid::from_bytes(vec![0, 1, 2, 3, 4, 5], 3, 2).unwrap();
    assert_eq!(grid.color(0, 0), 0);
    assert_eq!(grid.color(2, 0), 2);
    assert_eq!(grid.color(0, 1), 3);
    assert_eq!(grid.color(2, 1), 5);
  }

  #[test]
  fn equal_luma_colors_keep_distinct_codes() {
    // Red and a gray with the same Rec. 709 luma (54). A brightness-based
    // flattening would collapse these into one region.
    let image = RgbaImage::from_raw(2, 1, vec![
      255, 0, 0, 255,
      54, 54, 54, 255,
    ]).unwrap();

    let grid = PixelGrid::from_rgba(&image).unwrap();
    assert_ne!(grid.color(0, 0), grid.color(1, 0));
  }

  #[test]
  fn codes_are_assigned_in_scan_order_and_reused() {
    let image = RgbaImage::from_raw(2, 2, vec![
      9, 9, 9, 255,     0, 0, 255, 255,
      0, 0, 255, 255,   9, 9, 9, 255,
    ]).unwrap();

    let grid = PixelGrid::from_rgba(&image).unwrap();
    assert_eq!(grid.color(0, 0), 0);
    assert_eq!(grid.color(1, 0), 1);
    assert_eq!(grid.color(0, 1), 1);
    assert_eq!(grid.color(1, 1), 0);
  }
}
