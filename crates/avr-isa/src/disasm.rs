//! Instruction text rendering.
//!
//! Pure formatting over a decoded instruction: the host owns layout and
//! colorization, so the output is a token stream rather than a string.
//! Operands render destination-first, matching AVR assembly order.

use crate::registers::{io_register_name, register_name};
use crate::{DecodedInstr, Operand};

/// Display role of a token, for hosts that colorize by kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Mnemonic text, padded to a fixed column.
    Mnemonic,
    /// The operand separator.
    Separator,
    Register,
    /// Numeric literal with no address meaning.
    Integer,
    /// A value that is (or resolves to) a byte address.
    Address,
    /// Anything else (pointer expressions).
    Text,
}

/// One piece of rendered instruction text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Numeric payload for integer and address tokens.
    pub value: Option<u64>,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            value: None,
        }
    }

    fn with_value(kind: TokenKind, text: impl Into<String>, value: u64) -> Self {
        Self {
            kind,
            text: text.into(),
            value: Some(value),
        }
    }
}

/// Hex literal that keeps the sign outside the `0x` prefix.
pub fn signed_hex(value: i32) -> String {
    if value < 0 {
        format!("-{:#x}", value.unsigned_abs())
    } else {
        format!("{value:#x}")
    }
}

/// Render one instruction at `addr` (byte address) to display tokens.
///
/// Pure and infallible: operand kinds fully determine the formatting, and
/// relative targets are resolved against `addr` without touching memory.
pub fn render(instr: &DecodedInstr, addr: u32) -> Vec<Token> {
    let mut tokens = vec![Token::new(
        TokenKind::Mnemonic,
        format!("{:7}", instr.mnemonic.as_str()),
    )];

    if let Some(dst) = instr.dst {
        tokens.extend(operand_tokens(dst, addr));
    }
    if instr.dst.is_some() && instr.src.is_some() {
        tokens.push(Token::new(TokenKind::Separator, ", "));
    }
    if let Some(src) = instr.src {
        tokens.extend(operand_tokens(src, addr));
    }

    tokens
}

/// Render to a flat string, mostly for logs and tests.
pub fn render_to_string(instr: &DecodedInstr, addr: u32) -> String {
    render(instr, addr)
        .iter()
        .map(|t| t.text.as_str())
        .collect::<String>()
        .trim_end()
        .to_string()
}

fn operand_tokens(operand: Operand, addr: u32) -> Vec<Token> {
    match operand {
        Operand::Register(r) => vec![Token::new(TokenKind::Register, register_name(r))],
        Operand::IoRegister(r) => vec![Token::new(TokenKind::Register, io_register_name(r))],
        Operand::DirectAddress(a) => {
            // Word-addressed value, shown as a byte address.
            let byte_addr = u64::from(a) * 2;
            vec![Token::with_value(
                TokenKind::Address,
                format!("{byte_addr:#x}"),
                byte_addr,
            )]
        }
        Operand::Indirect(ptr) => vec![Token::new(TokenKind::Text, ptr.to_text())],
        Operand::Immediate(v) => vec![Token::with_value(
            TokenKind::Integer,
            format!("{v:#x}"),
            u64::from(v),
        )],
        Operand::DesRound(v) => vec![Token::with_value(
            TokenKind::Integer,
            format!("{v:#x}"),
            u64::from(v),
        )],
        Operand::RelativeAddress(k) => {
            let offset = i32::from(k) * 2;
            // Wraps in the 32-bit address space when the offset resolves
            // below address 0, same as the CFG edge derivation.
            let target = addr.wrapping_add_signed(offset + 2);
            vec![Token::with_value(
                TokenKind::Address,
                format!("{} ({target:#x})", signed_hex(offset)),
                u64::from(target),
            )]
        }
    }
}
