//! Instruction decoding from raw bytes.

use thiserror::Error;
use tracing::debug;

use crate::{classify, extract, Mnemonic, Operand};

/// Decode failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The leading word matched no known encoding.
    #[error("unrecognized opcode {word:#06x}")]
    UnrecognizedOpcode { word: u16 },
    /// Fewer bytes were supplied than the instruction needs.
    #[error("truncated instruction: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/// A fully decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedInstr {
    pub mnemonic: Mnemonic,
    /// Encoded size in bytes, 2 or 4.
    pub length: usize,
    pub src: Option<Operand>,
    pub dst: Option<Operand>,
}

/// Decode one instruction from the start of `data`.
///
/// Words are read little-endian. The four wide mnemonics (`jmp`, `call`,
/// `lds`, `sts`) consume a second word carrying a direct address; everything
/// else is a single word. `data` may extend past the instruction.
pub fn decode(data: &[u8]) -> Result<DecodedInstr> {
    if data.len() < 2 {
        debug!(available = data.len(), "instruction truncated");
        return Err(DecodeError::Truncated {
            needed: 2,
            available: data.len(),
        });
    }
    let word = u16::from_le_bytes([data[0], data[1]]);
    let Some(mnemonic) = classify(word) else {
        debug!(word = %format_args!("{word:#06x}"), "unrecognized opcode");
        return Err(DecodeError::UnrecognizedOpcode { word });
    };

    let (mut src, mut dst) = extract(mnemonic, word);
    let length = if mnemonic.is_wide() {
        if data.len() < 4 {
            debug!(
                %mnemonic,
                available = data.len(),
                "wide instruction truncated"
            );
            return Err(DecodeError::Truncated {
                needed: 4,
                available: data.len(),
            });
        }
        let ext = u16::from_le_bytes([data[2], data[3]]);
        // The extension word is the direct address. lds loads from it,
        // the other three write or jump to it.
        match mnemonic {
            Mnemonic::Lds => src = Some(Operand::DirectAddress(ext)),
            _ => dst = Some(Operand::DirectAddress(ext)),
        }
        4
    } else {
        2
    };

    Ok(DecodedInstr {
        mnemonic,
        length,
        src,
        dst,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::{Pointer, PointerPair};

    #[test]
    fn test_short_instruction() {
        // add r1, r2
        let instr = decode(&[0x12, 0x0C]).unwrap();
        assert_eq!(instr.mnemonic, Mnemonic::Add);
        assert_eq!(instr.length, 2);
        assert_eq!(instr.src, Some(Operand::Register(2)));
        assert_eq!(instr.dst, Some(Operand::Register(1)));
    }

    #[test]
    fn test_wide_call() {
        // call 0x0100 (word address) -> 94 0E 00 01
        let instr = decode(&[0x0E, 0x94, 0x00, 0x01]).unwrap();
        assert_eq!(instr.mnemonic, Mnemonic::Call);
        assert_eq!(instr.length, 4);
        assert_eq!(instr.src, None);
        assert_eq!(instr.dst, Some(Operand::DirectAddress(0x0100)));
    }

    #[test]
    fn test_wide_lds_sts() {
        // lds r16, 0x0200
        let instr = decode(&[0x00, 0x91, 0x00, 0x02]).unwrap();
        assert_eq!(instr.mnemonic, Mnemonic::Lds);
        assert_eq!(instr.src, Some(Operand::DirectAddress(0x0200)));
        assert_eq!(instr.dst, Some(Operand::Register(16)));
        // sts 0x0200, r16
        let instr = decode(&[0x00, 0x93, 0x00, 0x02]).unwrap();
        assert_eq!(instr.mnemonic, Mnemonic::Sts);
        assert_eq!(instr.src, Some(Operand::Register(16)));
        assert_eq!(instr.dst, Some(Operand::DirectAddress(0x0200)));
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(
            decode(&[0xFF, 0xFF]),
            Err(DecodeError::UnrecognizedOpcode { word: 0xFFFF })
        );
    }

    #[test]
    fn test_truncated() {
        assert_eq!(
            decode(&[0x12]),
            Err(DecodeError::Truncated {
                needed: 2,
                available: 1
            })
        );
        assert_eq!(
            decode(&[]),
            Err(DecodeError::Truncated {
                needed: 2,
                available: 0
            })
        );
        // jmp with a missing extension word
        assert_eq!(
            decode(&[0x0C, 0x94]),
            Err(DecodeError::Truncated {
                needed: 4,
                available: 2
            })
        );
        assert_eq!(
            decode(&[0x0C, 0x94, 0x00]),
            Err(DecodeError::Truncated {
                needed: 4,
                available: 3
            })
        );
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let instr = decode(&[0x00, 0x00, 0xAA, 0xBB, 0xCC]).unwrap();
        assert_eq!(instr.mnemonic, Mnemonic::Nop);
        assert_eq!(instr.length, 2);
    }

    #[test]
    fn test_indexed_store() {
        // st x+, r17
        let instr = decode(&[0x1D, 0x93]).unwrap();
        assert_eq!(instr.mnemonic, Mnemonic::St);
        assert_eq!(instr.src, Some(Operand::Register(17)));
        assert_eq!(
            instr.dst,
            Some(Operand::Indirect(Pointer::post_inc(PointerPair::X)))
        );
    }

    #[test]
    fn test_decode_is_deterministic() {
        // Repeated decodes of the same bytes are bit-identical, success
        // and failure alike.
        for word in 0..=u16::MAX {
            let bytes = word.to_le_bytes();
            let data = [bytes[0], bytes[1], 0x34, 0x12];
            assert_eq!(decode(&data), decode(&data), "word {word:#06x}");
        }
    }

    #[test]
    fn test_length_matches_wideness() {
        // Every decodable word yields length 2, or 4 exactly for the
        // extension-word mnemonics.
        for word in 0..=u16::MAX {
            let bytes = word.to_le_bytes();
            let data = [bytes[0], bytes[1], 0x00, 0x00];
            let Ok(instr) = decode(&data) else { continue };
            let expected = if instr.mnemonic.is_wide() { 4 } else { 2 };
            assert_eq!(instr.length, expected, "word {word:#06x}");
        }
    }
}
