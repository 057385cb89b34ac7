/*!
  Instruction generation.

  A write operation is the abstract form of one framebuffer memory write; the
  emitter produces them from a segment's row runs, and the assembly module
  serializes them as 8086 text. The three forms are:

    WordFill   a repeated 16-bit store, two packed bytes per word
    ByteFill   a single byte store
    MaskedOr   an OR into a byte holding a partial run

  A run is consumed left to right, preferring word fills at byte-aligned
  starts, so long runs cost few instructions and partial boundary pixels are
  handled by masking.
*/

mod assembly;
mod emit;
mod instruction;

pub use assembly::{write_segment_off, write_segment_on, FILL_PATTERN};
pub use emit::{emit_segment_off, emit_segment_on};
pub use instruction::{Opcode, WriteOp};
