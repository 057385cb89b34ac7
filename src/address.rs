/*!
  Mapping from pixel coordinates to framebuffer byte offsets.

  The target stores its raster in two interleaved pages: even display rows
  live in page 0, odd rows in page 1, each page a fixed byte span. Within a
  page, rows are packed four pixels to the byte (2 bits of color each).
*/

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::errors::CompileError;

/// BIOS-style mode numbers the tool recognizes on the command line.
#[derive(TryFromPrimitive, IntoPrimitive, Copy, Clone, Eq, PartialEq, Debug)]
#[repr(u8)]
pub enum VideoMode {
  /// 320 x 200, 4 colors, 2 bits per pixel.
  Mode4 = 4,
  /// 640 x 200, 2 colors, 1 bit per pixel. Recognized but not implemented.
  Mode6 = 6,
}

/// Framebuffer geometry for one video mode. A pure coordinate calculator
/// with no failure modes once constructed.
#[derive(Copy, Clone, Debug)]
pub struct AddressMapper {
  pub display_width   : usize,
  pub pixels_per_byte : usize,
  pub pages           : usize,
  pub page_stride     : usize,
}

impl AddressMapper {
  /// Only mode 4 is wired up. Any other mode number is a configuration
  /// error, reported before a single pixel is read.
  pub fn for_mode(mode: u8) -> Result<AddressMapper, CompileError> {
    match VideoMode::try_from(mode) {
      Ok(VideoMode::Mode4) => Ok(AddressMapper {
        display_width   : 320,
        pixels_per_byte : 4,
        pages           : 2,
        page_stride     : 8192,
      }),
      _ => Err(CompileError::UnsupportedMode { mode }),
    }
  }

  /// Bytes one full display row occupies within its page.
  pub fn row_bytes_per_page(&self) -> usize {
    self.display_width / self.pixels_per_byte
  }

  /// Linear byte offset of the byte holding pixel (x, y).
  pub fn offset(&self, y: usize, x: usize) -> usize {
    let page = y % self.pages;

    page * self.page_stride
      + (y / self.pages) * self.row_bytes_per_page()
      + x / self.pixels_per_byte
  }

  /// Horizontal shift that centers a source image narrower than the display.
  /// Applied to run starts before emission, so it participates in the
  /// emitter's alignment decisions.
  pub fn centering_offset(&self, image_width: usize) -> usize {
    self.display_width.saturating_sub(image_width) / 2
  }
}
