//! AVR instruction set definitions and decoder.
//!
//! This crate classifies 16-bit AVR instruction words, extracts their
//! operands, assembles complete 2/4-byte instructions from raw little-endian
//! bytes, and renders operand text. Control-flow edge derivation lives in
//! the companion `avr-cfg` crate; IR lifting is an extension point only
//! (see [`lift`]).

mod classify;
mod decode;
pub mod disasm;
pub mod lift;
mod mnemonic;
mod operand;
pub mod registers;

pub use classify::classify;
pub use decode::{decode, DecodeError, DecodedInstr, Result};
pub use mnemonic::Mnemonic;
pub use operand::{extract, IndexMode, Operand, OperandKind, Pointer, PointerPair};
