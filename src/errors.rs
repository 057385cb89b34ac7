/*!
  Error taxonomy of the compiler. Every failure is terminal for the run: this
  is a deterministic single-pass batch tool, so nothing is retried and nothing
  is recovered locally. Once an error surfaces, no guarantee is made about
  partial output.
*/

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
  /// The input image is malformed or does not match the declared geometry.
  #[error("decode: {detail}")]
  Decode { detail: String },

  /// A segment row occupies columns that do not form one contiguous span.
  /// Multi-run rows are not supported; the target glyph set is convex per row.
  #[error("segment {segment}, row {row}: columns are not a contiguous span")]
  NonContiguousRun { segment: usize, row: usize },

  /// Only mode 4 (320x200, 4 colors) is wired up.
  #[error("video mode {mode} is not supported (only mode 4: 320x200, 4 colors)")]
  UnsupportedMode { mode: u8 },

  #[error("output: {0}")]
  Io(#[from] std::io::Error),
}

impl CompileError {
  pub fn decode(detail: impl Into<String>) -> Self {
    CompileError::Decode { detail: detail.into() }
  }
}
