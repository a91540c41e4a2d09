//! Extension points for a future IR-lifting consumer.
//!
//! The decoder itself never calls into these traits. They fix the shape of
//! the hooks a host would implement to attach instruction semantics, so a
//! lifter can be added without touching the decode path.

use crate::registers::Flag;
use crate::DecodedInstr;

/// Per-instruction semantic lifting.
///
/// `Il` is the host's IR expression type. A host returns `None` for
/// instructions it does not model, which the caller should treat as an
/// unimplemented instruction rather than an error.
pub trait Lift {
    type Il;

    /// Lift `instr` at byte address `addr` into host IR.
    fn lift(&mut self, instr: &DecodedInstr, addr: u32) -> Option<Self::Il>;
}

/// Flag-computation semantics for hosts that track SREG precisely.
///
/// The decoder only tags flag-write groups (see
/// [`crate::Mnemonic::flag_write_group`]); computing the written values is
/// left entirely to an implementation of this trait.
pub trait FlagSemantics {
    type Il;

    /// Expression for `flag` after `instr` executes.
    fn flag_write(&mut self, instr: &DecodedInstr, flag: Flag) -> Option<Self::Il>;
}
