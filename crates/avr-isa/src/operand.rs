//! Operand types and per-mnemonic field extraction.

use crate::Mnemonic;

/// Plain kind tag for an operand slot, exposed to hosts that key rendering
/// or analysis on the kind alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandKind {
    Register,
    IoRegister,
    DirectAddress,
    IndirectAddress,
    Immediate,
    DesImmediate,
    RelativeAddress,
}

/// Pointer register pairs usable as indirect operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerPair {
    /// The `r25:r24` word pair (adiw/sbiw only).
    R24,
    X,
    Y,
    Z,
}

impl PointerPair {
    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::R24 => "r25:r24",
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

/// Indirect addressing mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexMode {
    /// Plain pointer access (also used for the register pairs of adiw/sbiw).
    None,
    PostIncrement,
    PreDecrement,
    /// Fixed 6-bit displacement (ldd/std).
    Displacement(u8),
}

/// An indirect operand: pointer pair plus addressing mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pointer {
    pub pair: PointerPair,
    pub mode: IndexMode,
}

impl Pointer {
    pub const fn plain(pair: PointerPair) -> Self {
        Self {
            pair,
            mode: IndexMode::None,
        }
    }

    pub const fn post_inc(pair: PointerPair) -> Self {
        Self {
            pair,
            mode: IndexMode::PostIncrement,
        }
    }

    pub const fn pre_dec(pair: PointerPair) -> Self {
        Self {
            pair,
            mode: IndexMode::PreDecrement,
        }
    }

    pub const fn displaced(pair: PointerPair, q: u8) -> Self {
        Self {
            pair,
            mode: IndexMode::Displacement(q),
        }
    }

    /// Assembly text for this pointer (`x`, `z+`, `-y`, `z+5`, `r25:r24`).
    pub fn to_text(self) -> String {
        match self.mode {
            IndexMode::None => self.pair.name().to_string(),
            IndexMode::PostIncrement => format!("{}+", self.pair.name()),
            IndexMode::PreDecrement => format!("-{}", self.pair.name()),
            IndexMode::Displacement(q) => format!("{}+{}", self.pair.name(), q),
        }
    }
}

/// A decoded operand: kind and value in one tagged union.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// General-purpose register index (0..=31).
    Register(u8),
    /// I/O register index (0..=63).
    IoRegister(u8),
    /// Direct program/data address in words; scaled by 2 only when rendered
    /// as a byte address.
    DirectAddress(u16),
    /// Indirect access through a pointer pair.
    Indirect(Pointer),
    /// 8-bit unsigned immediate.
    Immediate(u8),
    /// 4-bit DES round index (distinct from `Immediate` for rendering only).
    DesRound(u8),
    /// Sign-extended word offset relative to the next instruction.
    RelativeAddress(i16),
}

impl Operand {
    /// The plain kind tag for this operand.
    pub fn kind(&self) -> OperandKind {
        match self {
            Self::Register(_) => OperandKind::Register,
            Self::IoRegister(_) => OperandKind::IoRegister,
            Self::DirectAddress(_) => OperandKind::DirectAddress,
            Self::Indirect(_) => OperandKind::IndirectAddress,
            Self::Immediate(_) => OperandKind::Immediate,
            Self::DesRound(_) => OperandKind::DesImmediate,
            Self::RelativeAddress(_) => OperandKind::RelativeAddress,
        }
    }
}

// Field extraction helpers. Bit positions follow the AVR encoding map.

/// Destination register, bits [8:4].
#[inline]
fn d5(word: u16) -> u8 {
    ((word >> 4) & 0x1F) as u8
}

/// Source register: bit 9 carried into bit 4, combined with bits [3:0].
#[inline]
fn r5(word: u16) -> u8 {
    (((word & 0x0200) >> 5) | (word & 0x000F)) as u8
}

/// Upper-half destination register r16..r31, bits [7:4].
#[inline]
fn d4_upper(word: u16) -> u8 {
    16 + ((word >> 4) & 0xF) as u8
}

/// Upper-half source register r16..r31, bits [3:0].
#[inline]
fn r4_upper(word: u16) -> u8 {
    16 + (word & 0xF) as u8
}

/// Restricted destination register r16..r23, bits [6:4].
#[inline]
fn d3_upper(word: u16) -> u8 {
    16 + ((word >> 4) & 0x7) as u8
}

/// Restricted source register r16..r23, bits [2:0].
#[inline]
fn r3_upper(word: u16) -> u8 {
    16 + (word & 0x7) as u8
}

/// 8-bit immediate from bits [11:8] and [3:0].
#[inline]
fn imm8(word: u16) -> u8 {
    (((word & 0x0F00) >> 4) | (word & 0x000F)) as u8
}

/// 6-bit immediate from bits [7:6] and [3:0] (adiw/sbiw).
#[inline]
fn imm6(word: u16) -> u8 {
    (((word & 0x00C0) >> 2) | (word & 0x000F)) as u8
}

/// 3-bit bit index from bits [2:0].
#[inline]
fn bit3(word: u16) -> u8 {
    (word & 0x7) as u8
}

/// 5-bit I/O register from bits [7:3] (cbi/sbi/sbic/sbis).
#[inline]
fn io5(word: u16) -> u8 {
    ((word >> 3) & 0x1F) as u8
}

/// 6-bit I/O register from bits [10:9] and [3:0] (in/out).
#[inline]
fn io6(word: u16) -> u8 {
    (((word & 0x0600) >> 5) | (word & 0x000F)) as u8
}

/// 6-bit ldd/std displacement from bits [2:0], [11:10], and [13].
#[inline]
fn disp6(word: u16) -> u8 {
    ((word & 0x0007) | ((word & 0x0C00) >> 7) | ((word & 0x2000) >> 8)) as u8
}

/// 12-bit two's-complement offset from bits [11:0] (rjmp/rcall).
#[inline]
fn rel12(word: u16) -> i16 {
    let k = word & 0x0FFF;
    if k & 0x0800 == 0 {
        k as i16
    } else {
        k as i16 - 4096
    }
}

/// 7-bit two's-complement offset from bits [9:3] (conditional branches).
#[inline]
fn rel7(word: u16) -> i16 {
    let k = (word >> 3) & 0x7F;
    if k & 0x40 == 0 {
        k as i16
    } else {
        k as i16 - 128
    }
}

/// Extract `(src, dst)` operands for a classified mnemonic.
///
/// Total for every mnemonic the classifier can produce; a reserved
/// addressing-mode code yields `(None, None)` rather than failing. The
/// direct-address slot of `lds`/`sts`/`jmp`/`call` is left empty here and
/// filled in by [`crate::decode`] from the extension word.
pub fn extract(mnemonic: Mnemonic, word: u16) -> (Option<Operand>, Option<Operand>) {
    use Operand::{DesRound, Immediate, Indirect, IoRegister, Register, RelativeAddress};

    match mnemonic {
        // movw moves register pairs but the fields are reported as plain
        // 4-bit register indices (not doubled into pair bases).
        Mnemonic::Movw => (
            Some(Register((word & 0xF) as u8)),
            Some(Register(((word >> 4) & 0xF) as u8)),
        ),
        Mnemonic::Muls => (
            Some(Register(r4_upper(word))),
            Some(Register(d4_upper(word))),
        ),
        Mnemonic::Mulsu | Mnemonic::Fmul | Mnemonic::Fmuls | Mnemonic::Fmulsu => (
            Some(Register(r3_upper(word))),
            Some(Register(d3_upper(word))),
        ),
        Mnemonic::Cpc
        | Mnemonic::Sbc
        | Mnemonic::Add
        | Mnemonic::Lsl
        | Mnemonic::Cpse
        | Mnemonic::Cp
        | Mnemonic::Sub
        | Mnemonic::Adc
        | Mnemonic::Rol
        | Mnemonic::And
        | Mnemonic::Eor
        | Mnemonic::Or
        | Mnemonic::Mov
        | Mnemonic::Mul => (Some(Register(r5(word))), Some(Register(d5(word)))),
        Mnemonic::Cpi
        | Mnemonic::Sbci
        | Mnemonic::Subi
        | Mnemonic::Ori
        | Mnemonic::Andi
        | Mnemonic::Ldi => (
            Some(Immediate(imm8(word))),
            Some(Register(d4_upper(word))),
        ),
        Mnemonic::Ldd => (
            Some(Indirect(Pointer::displaced(displacement_pair(word), disp6(word)))),
            Some(Register(d5(word))),
        ),
        Mnemonic::Std => (
            Some(Register(d5(word))),
            Some(Indirect(Pointer::displaced(displacement_pair(word), disp6(word)))),
        ),
        // Direct-address slot filled from the extension word by the caller.
        Mnemonic::Lds => (None, Some(Register(d5(word)))),
        Mnemonic::Sts => (Some(Register(d5(word))), None),
        Mnemonic::Jmp | Mnemonic::Call => (None, None),
        Mnemonic::Ld => match indexed_pointer(word) {
            Some(ptr) => (Some(Indirect(ptr)), Some(Register(d5(word)))),
            None => (None, None),
        },
        Mnemonic::St => match indexed_pointer(word) {
            Some(ptr) => (Some(Register(d5(word))), Some(Indirect(ptr))),
            None => (None, None),
        },
        Mnemonic::Lpm => match word & 0xF {
            0x4 => (
                Some(Indirect(Pointer::plain(PointerPair::Z))),
                Some(Register(d5(word))),
            ),
            0x5 => (
                Some(Indirect(Pointer::post_inc(PointerPair::Z))),
                Some(Register(d5(word))),
            ),
            // The implied-r0 form (fixed opcode) has no rendered operands.
            _ => (None, None),
        },
        Mnemonic::Elpm => match word & 0xF {
            0x6 => (
                Some(Indirect(Pointer::plain(PointerPair::Z))),
                Some(Register(d5(word))),
            ),
            0x7 => (
                Some(Indirect(Pointer::post_inc(PointerPair::Z))),
                Some(Register(d5(word))),
            ),
            _ => (None, None),
        },
        Mnemonic::Xch | Mnemonic::Las | Mnemonic::Lac | Mnemonic::Lat => (
            Some(Register(d5(word))),
            Some(Indirect(Pointer::plain(PointerPair::Z))),
        ),
        Mnemonic::Push => (Some(Register(d5(word))), None),
        Mnemonic::Pop
        | Mnemonic::Com
        | Mnemonic::Neg
        | Mnemonic::Swap
        | Mnemonic::Inc
        | Mnemonic::Asr
        | Mnemonic::Lsr
        | Mnemonic::Ror
        | Mnemonic::Dec => (None, Some(Register(d5(word)))),
        Mnemonic::Des => (None, Some(DesRound(((word >> 4) & 0xF) as u8))),
        Mnemonic::Adiw | Mnemonic::Sbiw => (
            Some(Immediate(imm6(word))),
            Some(Indirect(Pointer::plain(word_pair(word)))),
        ),
        Mnemonic::Cbi | Mnemonic::Sbi | Mnemonic::Sbic | Mnemonic::Sbis => (
            Some(Immediate(bit3(word))),
            Some(IoRegister(io5(word))),
        ),
        Mnemonic::In => (Some(IoRegister(io6(word))), Some(Register(d5(word)))),
        Mnemonic::Out => (Some(Register(d5(word))), Some(IoRegister(io6(word)))),
        Mnemonic::Rjmp | Mnemonic::Rcall => (None, Some(RelativeAddress(rel12(word)))),
        Mnemonic::Brbs | Mnemonic::Brbc => (
            Some(RelativeAddress(rel7(word))),
            Some(Immediate(bit3(word))),
        ),
        Mnemonic::Brcs
        | Mnemonic::Breq
        | Mnemonic::Brmi
        | Mnemonic::Brvs
        | Mnemonic::Brlt
        | Mnemonic::Brhs
        | Mnemonic::Brts
        | Mnemonic::Brie
        | Mnemonic::Brcc
        | Mnemonic::Brne
        | Mnemonic::Brpl
        | Mnemonic::Brvc
        | Mnemonic::Brge
        | Mnemonic::Brhc
        | Mnemonic::Brtc
        | Mnemonic::Brid => (None, Some(RelativeAddress(rel7(word)))),
        Mnemonic::Bld | Mnemonic::Bst | Mnemonic::Sbrc | Mnemonic::Sbrs => (
            Some(Immediate(bit3(word))),
            Some(Register(d5(word))),
        ),
        Mnemonic::Nop
        | Mnemonic::Ret
        | Mnemonic::Reti
        | Mnemonic::Sec
        | Mnemonic::Seh
        | Mnemonic::Sei
        | Mnemonic::Sen
        | Mnemonic::Ses
        | Mnemonic::Set
        | Mnemonic::Sev
        | Mnemonic::Sez
        | Mnemonic::Clc
        | Mnemonic::Clh
        | Mnemonic::Cli
        | Mnemonic::Cln
        | Mnemonic::Cls
        | Mnemonic::Clt
        | Mnemonic::Clv
        | Mnemonic::Clz
        | Mnemonic::Sleep
        | Mnemonic::Spm
        | Mnemonic::SpmZInc
        | Mnemonic::Wdr
        | Mnemonic::Break
        | Mnemonic::Eicall
        | Mnemonic::Eijmp
        | Mnemonic::Icall
        | Mnemonic::Ijmp => (None, None),
    }
}

/// Y/Z selection for displacement load/store, bit 3.
#[inline]
fn displacement_pair(word: u16) -> PointerPair {
    if word & 0x0008 == 0 {
        PointerPair::Z
    } else {
        PointerPair::Y
    }
}

/// Register pair selection for adiw/sbiw, bits [5:4].
#[inline]
fn word_pair(word: u16) -> PointerPair {
    match (word >> 4) & 0x3 {
        0 => PointerPair::R24,
        1 => PointerPair::X,
        2 => PointerPair::Y,
        _ => PointerPair::Z,
    }
}

/// Pointer and mode for the auto-indexed `ld`/`st` family, keyed by the
/// 4-bit addressing-mode field. Reserved codes give `None`.
fn indexed_pointer(word: u16) -> Option<Pointer> {
    let ptr = match word & 0xF {
        0x0 => Pointer::plain(PointerPair::Z),
        0x1 => Pointer::post_inc(PointerPair::Z),
        0x2 => Pointer::pre_dec(PointerPair::Z),
        0x8 => Pointer::plain(PointerPair::Y),
        0x9 => Pointer::post_inc(PointerPair::Y),
        0xA => Pointer::pre_dec(PointerPair::Y),
        0xC => Pointer::plain(PointerPair::X),
        0xD => Pointer::post_inc(PointerPair::X),
        0xE => Pointer::pre_dec(PointerPair::X),
        _ => return None,
    };
    Some(ptr)
}
