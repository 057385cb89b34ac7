/*!
  The write operations the emitter produces. Operations are built once, never
  mutated, and rendered in generation order: rows ascending, left to right
  within a row, segments in discovery order.
*/

use std::fmt::{Display, Formatter};

use strum::{Display as StrumDisplay, IntoStaticStr};

/// Discriminates the three write forms; carries the store mnemonic.
#[derive(StrumDisplay, IntoStaticStr, Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Opcode {
  #[strum(serialize = "stosw")]
  WordFill,
  #[strum(serialize = "stosb")]
  ByteFill,
  #[strum(serialize = "or")]
  MaskedOr,
}

/// One framebuffer memory write.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WriteOp {
  /// Store the fill word at `count` consecutive word locations from `offset`.
  WordFill { offset: usize, count: usize },
  /// Store one fill byte at `offset`.
  ByteFill { offset: usize },
  /// OR `mask` into the byte at `offset`. Used for sub-byte partial runs.
  MaskedOr { offset: usize, mask: u8 },
}

impl WriteOp {
  pub fn opcode(&self) -> Opcode {
    match self {
      WriteOp::WordFill { .. } => Opcode::WordFill,
      WriteOp::ByteFill { .. } => Opcode::ByteFill,
      WriteOp::MaskedOr { .. } => Opcode::MaskedOr,
    }
  }
}

impl Display for WriteOp {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      WriteOp::WordFill { offset, count } => {
        write!(f, "{}(0x{:04x}, x{})", self.opcode(), offset, count)
      }

      WriteOp::ByteFill { offset } => {
        write!(f, "{}(0x{:04x})", self.opcode(), offset)
      }

      WriteOp::MaskedOr { offset, mask } => {
        write!(f, "{}(0x{:04x}, 0b{:08b})", self.opcode(), offset, mask)
      }

    }
  }
}
