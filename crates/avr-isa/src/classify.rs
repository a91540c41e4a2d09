//! Opcode classification.
//!
//! Maps a raw 16-bit instruction word to a [`Mnemonic`], or `None` for
//! unallocated encodings. Total over all 65536 words: fixed zero-operand
//! opcodes are matched exactly first, then the word is dispatched on its
//! high nibble and progressively narrower bitfields following the AVR
//! encoding map.

use crate::Mnemonic;

/// Classify a raw instruction word.
pub fn classify(word: u16) -> Option<Mnemonic> {
    if let Some(mnemonic) = classify_fixed(word) {
        return Some(mnemonic);
    }

    match (word >> 12) & 0xF {
        0x0 => classify_nibble0(word),
        0x1 => classify_nibble1(word),
        0x2 => classify_nibble2(word),
        0x3 => Some(Mnemonic::Cpi),
        0x4 => Some(Mnemonic::Sbci),
        0x5 => Some(Mnemonic::Subi),
        // `sbr` is the same operation with the same encoding
        0x6 => Some(Mnemonic::Ori),
        // `cbr` is the same operation with the same encoding
        0x7 => Some(Mnemonic::Andi),
        // The q=0 forms are bit-identical to plain `ld`/`st` Z; this region
        // always reports ldd/std (not canonicalized).
        0x8 | 0xA => Some(if word & 0x0200 == 0 {
            Mnemonic::Ldd
        } else {
            Mnemonic::Std
        }),
        0x9 => classify_nibble9(word),
        0xB => Some(if word & 0x0800 == 0 {
            Mnemonic::In
        } else {
            Mnemonic::Out
        }),
        0xC => Some(Mnemonic::Rjmp),
        0xD => Some(Mnemonic::Rcall),
        0xE => Some(Mnemonic::Ldi),
        0xF => classify_nibble_f(word),
        _ => None,
    }
}

/// Fully-specified opcodes with no operand fields. Takes precedence over the
/// general nibble dispatch.
fn classify_fixed(word: u16) -> Option<Mnemonic> {
    let mnemonic = match word {
        0x0000 => Mnemonic::Nop,
        0x9508 => Mnemonic::Ret,
        0x9518 => Mnemonic::Reti,
        0x9408 => Mnemonic::Sec,
        0x9458 => Mnemonic::Seh,
        0x9478 => Mnemonic::Sei,
        0x9428 => Mnemonic::Sen,
        0x9448 => Mnemonic::Ses,
        0x9468 => Mnemonic::Set,
        0x9438 => Mnemonic::Sev,
        0x9418 => Mnemonic::Sez,
        0x9488 => Mnemonic::Clc,
        0x94D8 => Mnemonic::Clh,
        0x94F8 => Mnemonic::Cli,
        0x94A8 => Mnemonic::Cln,
        0x94C8 => Mnemonic::Cls,
        0x94E8 => Mnemonic::Clt,
        0x94B8 => Mnemonic::Clv,
        0x9498 => Mnemonic::Clz,
        0x9588 => Mnemonic::Sleep,
        0x95E8 => Mnemonic::Spm,
        0x95F8 => Mnemonic::SpmZInc,
        0x95A8 => Mnemonic::Wdr,
        0x9598 => Mnemonic::Break,
        // Implied-r0 program memory loads.
        0x95C8 => Mnemonic::Lpm,
        0x95D8 => Mnemonic::Elpm,
        0x9519 => Mnemonic::Eicall,
        0x9419 => Mnemonic::Eijmp,
        0x9509 => Mnemonic::Icall,
        0x9409 => Mnemonic::Ijmp,
        _ => return None,
    };
    Some(mnemonic)
}

/// Self-operand test distinguishing `lsl`/`rol` from `add`/`adc`: the source
/// and destination register fields are bit-for-bit equal, including the
/// carry bit of the 5-bit source index (bit 9 vs bit 8).
fn is_self_shift(word: u16) -> bool {
    (word & 0x00F0) >> 4 == (word & 0x000F) && (word & 0x0200) >> 1 == word & 0x0100
}

fn classify_nibble0(word: u16) -> Option<Mnemonic> {
    match (word >> 10) & 0x3 {
        0b00 => match (word >> 8) & 0x3 {
            0b01 => Some(Mnemonic::Movw),
            0b10 => Some(Mnemonic::Muls),
            0b11 => Some(match (word & 0x0080 != 0, word & 0x0004 != 0) {
                (false, false) => Mnemonic::Mulsu,
                (false, true) => Mnemonic::Fmul,
                (true, false) => Mnemonic::Fmuls,
                (true, true) => Mnemonic::Fmulsu,
            }),
            // 0x00xx is only valid as nop (caught by the fixed table)
            _ => None,
        },
        0b01 => Some(Mnemonic::Cpc),
        0b10 => Some(Mnemonic::Sbc),
        _ => Some(if is_self_shift(word) {
            Mnemonic::Lsl
        } else {
            Mnemonic::Add
        }),
    }
}

fn classify_nibble1(word: u16) -> Option<Mnemonic> {
    match (word >> 10) & 0x3 {
        0b00 => Some(Mnemonic::Cpse),
        0b01 => Some(Mnemonic::Cp),
        0b10 => Some(Mnemonic::Sub),
        _ => Some(if is_self_shift(word) {
            Mnemonic::Rol
        } else {
            Mnemonic::Adc
        }),
    }
}

fn classify_nibble2(word: u16) -> Option<Mnemonic> {
    match (word >> 10) & 0x3 {
        0b00 => Some(Mnemonic::And),
        0b01 => Some(Mnemonic::Eor),
        0b10 => Some(Mnemonic::Or),
        _ => Some(Mnemonic::Mov),
    }
}

fn classify_nibble9(word: u16) -> Option<Mnemonic> {
    match (word >> 10) & 0x3 {
        0b00 => classify_load_store(word),
        0b01 => classify_single_operand(word),
        0b10 => Some(match (word >> 8) & 0x3 {
            0b00 => Mnemonic::Cbi,
            0b01 => Mnemonic::Sbic,
            0b10 => Mnemonic::Sbi,
            _ => Mnemonic::Sbis,
        }),
        _ => Some(Mnemonic::Mul),
    }
}

/// Memory and stack operations keyed by bit 9 (load vs store side) and the
/// 4-bit addressing-mode field in the low nibble.
fn classify_load_store(word: u16) -> Option<Mnemonic> {
    let store = word & 0x0200 != 0;
    match (store, word & 0xF) {
        (false, 0x0) => Some(Mnemonic::Lds),
        (true, 0x0) => Some(Mnemonic::Sts),
        (false, 0x1 | 0x2 | 0x9 | 0xA | 0xC | 0xD | 0xE) => Some(Mnemonic::Ld),
        (true, 0x1 | 0x2 | 0x9 | 0xA | 0xC | 0xD | 0xE) => Some(Mnemonic::St),
        (false, 0x4 | 0x5) => Some(Mnemonic::Lpm),
        (false, 0x6 | 0x7) => Some(Mnemonic::Elpm),
        (true, 0x4) => Some(Mnemonic::Xch),
        (true, 0x5) => Some(Mnemonic::Las),
        (true, 0x6) => Some(Mnemonic::Lac),
        (true, 0x7) => Some(Mnemonic::Lat),
        (false, 0xF) => Some(Mnemonic::Pop),
        (true, 0xF) => Some(Mnemonic::Push),
        _ => None,
    }
}

fn classify_single_operand(word: u16) -> Option<Mnemonic> {
    if word & 0x0200 != 0 {
        return Some(if word & 0x0100 == 0 {
            Mnemonic::Adiw
        } else {
            Mnemonic::Sbiw
        });
    }
    match word & 0xF {
        0x0 => Some(Mnemonic::Com),
        0x1 => Some(Mnemonic::Neg),
        0x2 => Some(Mnemonic::Swap),
        0x3 => Some(Mnemonic::Inc),
        0x5 => Some(Mnemonic::Asr),
        0x6 => Some(Mnemonic::Lsr),
        0x7 => Some(Mnemonic::Ror),
        0xA => Some(Mnemonic::Dec),
        0xB => Some(Mnemonic::Des),
        _ => match (word & 0xE) >> 1 {
            0x6 => Some(Mnemonic::Jmp),
            0x7 => Some(Mnemonic::Call),
            _ => None,
        },
    }
}

fn classify_nibble_f(word: u16) -> Option<Mnemonic> {
    match (word >> 10) & 0x3 {
        // Branch on flag set. The cond-0 arm requires a fully clear low
        // nibble; an offset LSB of 1 with cond 0 falls through to the
        // generic brbs (kept from the original decoder).
        0b00 => Some(if word & 0x000F == 0 {
            Mnemonic::Brcs
        } else {
            match word & 0x7 {
                0x1 => Mnemonic::Breq,
                0x2 => Mnemonic::Brmi,
                0x3 => Mnemonic::Brvs,
                0x4 => Mnemonic::Brlt,
                0x5 => Mnemonic::Brhs,
                0x6 => Mnemonic::Brts,
                0x7 => Mnemonic::Brie,
                _ => Mnemonic::Brbs,
            }
        }),
        // Branch on flag clear, keyed on the 3-bit condition code with the
        // generic brbc as the catch-all arm.
        0b01 => Some(match word & 0x7 {
            0x0 => Mnemonic::Brcc,
            0x1 => Mnemonic::Brne,
            0x2 => Mnemonic::Brpl,
            0x3 => Mnemonic::Brvc,
            0x4 => Mnemonic::Brge,
            0x5 => Mnemonic::Brhc,
            0x6 => Mnemonic::Brtc,
            0x7 => Mnemonic::Brid,
            _ => Mnemonic::Brbc,
        }),
        // Bit transfer / bit test rows carry a 3-bit bit index; a set bit 3
        // is an unallocated encoding.
        0b10 => {
            if word & 0x0008 != 0 {
                return None;
            }
            Some(if word & 0x0200 == 0 {
                Mnemonic::Bld
            } else {
                Mnemonic::Bst
            })
        }
        _ => {
            if word & 0x0008 != 0 {
                return None;
            }
            Some(if word & 0x0200 == 0 {
                Mnemonic::Sbrc
            } else {
                Mnemonic::Sbrs
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_opcodes() {
        assert_eq!(classify(0x0000), Some(Mnemonic::Nop));
        assert_eq!(classify(0x9508), Some(Mnemonic::Ret));
        assert_eq!(classify(0x9518), Some(Mnemonic::Reti));
        assert_eq!(classify(0x95F8), Some(Mnemonic::SpmZInc));
        assert_eq!(classify(0x9409), Some(Mnemonic::Ijmp));
        assert_eq!(classify(0x9519), Some(Mnemonic::Eicall));
        // Implied-r0 lpm/elpm come from the fixed table, not the mode field.
        assert_eq!(classify(0x95C8), Some(Mnemonic::Lpm));
        assert_eq!(classify(0x95D8), Some(Mnemonic::Elpm));
    }

    #[test]
    fn test_two_register_alu() {
        // add r1, r2 (0000 11 0 00001 0010)
        assert_eq!(classify(0x0C12), Some(Mnemonic::Add));
        // cpc r1, r2
        assert_eq!(classify(0x0412), Some(Mnemonic::Cpc));
        // sbc r1, r2
        assert_eq!(classify(0x0812), Some(Mnemonic::Sbc));
        // adc r1, r2
        assert_eq!(classify(0x1C12), Some(Mnemonic::Adc));
        // eor r0, r0
        assert_eq!(classify(0x2400), Some(Mnemonic::Eor));
    }

    #[test]
    fn test_shift_aliases() {
        // add r1, r1 is lsl r1
        assert_eq!(classify(0x0C11), Some(Mnemonic::Lsl));
        // add r17, r17 (both fields 0001 with the high bit in bits 8 and 9)
        assert_eq!(classify(0x0F11), Some(Mnemonic::Lsl));
        // adc r1, r1 is rol r1
        assert_eq!(classify(0x1C11), Some(Mnemonic::Rol));
        // mismatched high bits are a plain add (r1, r17)
        assert_eq!(classify(0x0E11), Some(Mnemonic::Add));
    }

    #[test]
    fn test_movw_mul_family() {
        assert_eq!(classify(0x0112), Some(Mnemonic::Movw));
        assert_eq!(classify(0x0212), Some(Mnemonic::Muls));
        assert_eq!(classify(0x0312), Some(Mnemonic::Mulsu));
        assert_eq!(classify(0x0316), Some(Mnemonic::Fmul));
        assert_eq!(classify(0x0392), Some(Mnemonic::Fmuls));
        assert_eq!(classify(0x0396), Some(Mnemonic::Fmulsu));
        // 0x00xx other than nop is unallocated
        assert_eq!(classify(0x0012), None);
    }

    #[test]
    fn test_immediate_ops() {
        assert_eq!(classify(0x3012), Some(Mnemonic::Cpi));
        assert_eq!(classify(0x4012), Some(Mnemonic::Sbci));
        assert_eq!(classify(0x5012), Some(Mnemonic::Subi));
        assert_eq!(classify(0x6012), Some(Mnemonic::Ori));
        assert_eq!(classify(0x7012), Some(Mnemonic::Andi));
        assert_eq!(classify(0xE012), Some(Mnemonic::Ldi));
    }

    #[test]
    fn test_displacement_region_not_canonicalized() {
        // ldd r0, Z+0 is bit-identical to ld r0, Z but stays ldd
        assert_eq!(classify(0x8000), Some(Mnemonic::Ldd));
        assert_eq!(classify(0x8208), Some(Mnemonic::Std));
        assert_eq!(classify(0xA000), Some(Mnemonic::Ldd));
        assert_eq!(classify(0xA200), Some(Mnemonic::Std));
    }

    #[test]
    fn test_load_store_modes() {
        assert_eq!(classify(0x9000), Some(Mnemonic::Lds));
        assert_eq!(classify(0x9200), Some(Mnemonic::Sts));
        assert_eq!(classify(0x9001), Some(Mnemonic::Ld)); // ld z+
        assert_eq!(classify(0x9201), Some(Mnemonic::St)); // st z+
        assert_eq!(classify(0x900C), Some(Mnemonic::Ld)); // ld x
        assert_eq!(classify(0x920E), Some(Mnemonic::St)); // st -x
        assert_eq!(classify(0x9004), Some(Mnemonic::Lpm));
        assert_eq!(classify(0x9007), Some(Mnemonic::Elpm));
        assert_eq!(classify(0x9204), Some(Mnemonic::Xch));
        assert_eq!(classify(0x9205), Some(Mnemonic::Las));
        assert_eq!(classify(0x9206), Some(Mnemonic::Lac));
        assert_eq!(classify(0x9207), Some(Mnemonic::Lat));
        assert_eq!(classify(0x900F), Some(Mnemonic::Pop));
        assert_eq!(classify(0x920F), Some(Mnemonic::Push));
        // reserved mode codes
        assert_eq!(classify(0x9003), None);
        assert_eq!(classify(0x9008), None);
    }

    #[test]
    fn test_single_operand_ops() {
        assert_eq!(classify(0x9410), Some(Mnemonic::Com));
        assert_eq!(classify(0x9411), Some(Mnemonic::Neg));
        assert_eq!(classify(0x9412), Some(Mnemonic::Swap));
        assert_eq!(classify(0x9413), Some(Mnemonic::Inc));
        assert_eq!(classify(0x9415), Some(Mnemonic::Asr));
        assert_eq!(classify(0x9416), Some(Mnemonic::Lsr));
        assert_eq!(classify(0x9417), Some(Mnemonic::Ror));
        assert_eq!(classify(0x941A), Some(Mnemonic::Dec));
        assert_eq!(classify(0x941B), Some(Mnemonic::Des));
        assert_eq!(classify(0x940C), Some(Mnemonic::Jmp));
        assert_eq!(classify(0x940E), Some(Mnemonic::Call));
        assert_eq!(classify(0x9414), None);
    }

    #[test]
    fn test_word_pair_and_io_bit_ops() {
        assert_eq!(classify(0x9600), Some(Mnemonic::Adiw));
        assert_eq!(classify(0x9700), Some(Mnemonic::Sbiw));
        assert_eq!(classify(0x9800), Some(Mnemonic::Cbi));
        assert_eq!(classify(0x9900), Some(Mnemonic::Sbic));
        assert_eq!(classify(0x9A00), Some(Mnemonic::Sbi));
        assert_eq!(classify(0x9B00), Some(Mnemonic::Sbis));
        assert_eq!(classify(0x9C00), Some(Mnemonic::Mul));
    }

    #[test]
    fn test_io_and_relative() {
        assert_eq!(classify(0xB012), Some(Mnemonic::In));
        assert_eq!(classify(0xB812), Some(Mnemonic::Out));
        assert_eq!(classify(0xC002), Some(Mnemonic::Rjmp));
        assert_eq!(classify(0xD002), Some(Mnemonic::Rcall));
    }

    #[test]
    fn test_conditional_branches() {
        assert_eq!(classify(0xF000), Some(Mnemonic::Brcs));
        assert_eq!(classify(0xF001), Some(Mnemonic::Breq));
        assert_eq!(classify(0xF002), Some(Mnemonic::Brmi));
        assert_eq!(classify(0xF007), Some(Mnemonic::Brie));
        assert_eq!(classify(0xF400), Some(Mnemonic::Brcc));
        assert_eq!(classify(0xF401), Some(Mnemonic::Brne));
        assert_eq!(classify(0xF407), Some(Mnemonic::Brid));
        // cond 0 with offset LSB set goes to the generic form
        assert_eq!(classify(0xF008), Some(Mnemonic::Brbs));
        assert_eq!(classify(0xF009), Some(Mnemonic::Breq));
    }

    #[test]
    fn test_bit_test_ops() {
        assert_eq!(classify(0xF800), Some(Mnemonic::Bld));
        assert_eq!(classify(0xFA00), Some(Mnemonic::Bst));
        assert_eq!(classify(0xFC00), Some(Mnemonic::Sbrc));
        assert_eq!(classify(0xFE00), Some(Mnemonic::Sbrs));
        // set bit 3 is unallocated in the bit-test rows
        assert_eq!(classify(0xF808), None);
        assert_eq!(classify(0xFFFF), None);
    }

    #[test]
    fn test_totality() {
        // Every 16-bit word classifies without panicking.
        for word in 0..=u16::MAX {
            let _ = classify(word);
        }
    }
}
