//! Instruction mnemonics.

use crate::registers::FlagWriteGroup;

/// Every instruction the classifier can produce, one variant per mnemonic.
///
/// `lsl`/`rol` are the self-operand aliases of `add`/`adc` and get their own
/// variants because the classifier reports them distinctly. The
/// zero-displacement `ldd`/`std` alias of `ld`/`st` through Z is NOT given
/// the same treatment: that opcode region always classifies as `Ldd`/`Std`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    // Fixed zero-operand opcodes
    Nop,
    Ret,
    Reti,
    Sec,
    Seh,
    Sei,
    Sen,
    Ses,
    Set,
    Sev,
    Sez,
    Clc,
    Clh,
    Cli,
    Cln,
    Cls,
    Clt,
    Clv,
    Clz,
    Sleep,
    Spm,
    /// `spm z+` (post-increment form, fixed opcode 0x95F8).
    SpmZInc,
    Wdr,
    Break,
    Eicall,
    Eijmp,
    Icall,
    Ijmp,
    // Two-register ALU
    Movw,
    Muls,
    Mulsu,
    Fmul,
    Fmuls,
    Fmulsu,
    Cpc,
    Sbc,
    Add,
    Lsl,
    Cpse,
    Cp,
    Sub,
    Adc,
    Rol,
    And,
    Eor,
    Or,
    Mov,
    Mul,
    // Register-immediate ALU
    Cpi,
    Sbci,
    Subi,
    Ori,
    Andi,
    Ldi,
    // Memory
    Ldd,
    Std,
    Lds,
    Sts,
    Ld,
    St,
    Lpm,
    Elpm,
    Xch,
    Las,
    Lac,
    Lat,
    Push,
    Pop,
    // Single-register ALU
    Com,
    Neg,
    Swap,
    Inc,
    Asr,
    Lsr,
    Ror,
    Dec,
    Des,
    // Word-pair immediate
    Adiw,
    Sbiw,
    // I/O
    Cbi,
    Sbic,
    Sbi,
    Sbis,
    In,
    Out,
    // Control transfer
    Jmp,
    Call,
    Rjmp,
    Rcall,
    // Conditional branches
    Brcs,
    Breq,
    Brmi,
    Brvs,
    Brlt,
    Brhs,
    Brts,
    Brie,
    Brcc,
    Brne,
    Brpl,
    Brvc,
    Brge,
    Brhc,
    Brtc,
    Brid,
    Brbs,
    Brbc,
    // Bit transfer / bit test
    Bld,
    Bst,
    Sbrc,
    Sbrs,
}

impl Mnemonic {
    /// Lowercase assembly mnemonic text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nop => "nop",
            Self::Ret => "ret",
            Self::Reti => "reti",
            Self::Sec => "sec",
            Self::Seh => "seh",
            Self::Sei => "sei",
            Self::Sen => "sen",
            Self::Ses => "ses",
            Self::Set => "set",
            Self::Sev => "sev",
            Self::Sez => "sez",
            Self::Clc => "clc",
            Self::Clh => "clh",
            Self::Cli => "cli",
            Self::Cln => "cln",
            Self::Cls => "cls",
            Self::Clt => "clt",
            Self::Clv => "clv",
            Self::Clz => "clz",
            Self::Sleep => "sleep",
            Self::Spm => "spm",
            Self::SpmZInc => "spm z+",
            Self::Wdr => "wdr",
            Self::Break => "break",
            Self::Eicall => "eicall",
            Self::Eijmp => "eijmp",
            Self::Icall => "icall",
            Self::Ijmp => "ijmp",
            Self::Movw => "movw",
            Self::Muls => "muls",
            Self::Mulsu => "mulsu",
            Self::Fmul => "fmul",
            Self::Fmuls => "fmuls",
            Self::Fmulsu => "fmulsu",
            Self::Cpc => "cpc",
            Self::Sbc => "sbc",
            Self::Add => "add",
            Self::Lsl => "lsl",
            Self::Cpse => "cpse",
            Self::Cp => "cp",
            Self::Sub => "sub",
            Self::Adc => "adc",
            Self::Rol => "rol",
            Self::And => "and",
            Self::Eor => "eor",
            Self::Or => "or",
            Self::Mov => "mov",
            Self::Mul => "mul",
            Self::Cpi => "cpi",
            Self::Sbci => "sbci",
            Self::Subi => "subi",
            Self::Ori => "ori",
            Self::Andi => "andi",
            Self::Ldi => "ldi",
            Self::Ldd => "ldd",
            Self::Std => "std",
            Self::Lds => "lds",
            Self::Sts => "sts",
            Self::Ld => "ld",
            Self::St => "st",
            Self::Lpm => "lpm",
            Self::Elpm => "elpm",
            Self::Xch => "xch",
            Self::Las => "las",
            Self::Lac => "lac",
            Self::Lat => "lat",
            Self::Push => "push",
            Self::Pop => "pop",
            Self::Com => "com",
            Self::Neg => "neg",
            Self::Swap => "swap",
            Self::Inc => "inc",
            Self::Asr => "asr",
            Self::Lsr => "lsr",
            Self::Ror => "ror",
            Self::Dec => "dec",
            Self::Des => "des",
            Self::Adiw => "adiw",
            Self::Sbiw => "sbiw",
            Self::Cbi => "cbi",
            Self::Sbic => "sbic",
            Self::Sbi => "sbi",
            Self::Sbis => "sbis",
            Self::In => "in",
            Self::Out => "out",
            Self::Jmp => "jmp",
            Self::Call => "call",
            Self::Rjmp => "rjmp",
            Self::Rcall => "rcall",
            Self::Brcs => "brcs",
            Self::Breq => "breq",
            Self::Brmi => "brmi",
            Self::Brvs => "brvs",
            Self::Brlt => "brlt",
            Self::Brhs => "brhs",
            Self::Brts => "brts",
            Self::Brie => "brie",
            Self::Brcc => "brcc",
            Self::Brne => "brne",
            Self::Brpl => "brpl",
            Self::Brvc => "brvc",
            Self::Brge => "brge",
            Self::Brhc => "brhc",
            Self::Brtc => "brtc",
            Self::Brid => "brid",
            Self::Brbs => "brbs",
            Self::Brbc => "brbc",
            Self::Bld => "bld",
            Self::Bst => "bst",
            Self::Sbrc => "sbrc",
            Self::Sbrs => "sbrs",
        }
    }

    /// True for the 4-byte instructions that carry an extension word.
    pub fn is_wide(self) -> bool {
        matches!(self, Self::Jmp | Self::Call | Self::Lds | Self::Sts)
    }

    /// True for the conditional branches keyed by a fixed condition code
    /// (`brcs`..`brid`, excluding the generic `brbs`/`brbc`).
    pub fn is_conditional_branch(self) -> bool {
        matches!(
            self,
            Self::Brcs
                | Self::Breq
                | Self::Brmi
                | Self::Brvs
                | Self::Brlt
                | Self::Brhs
                | Self::Brts
                | Self::Brie
                | Self::Brcc
                | Self::Brne
                | Self::Brpl
                | Self::Brvc
                | Self::Brge
                | Self::Brhc
                | Self::Brtc
                | Self::Brid
        )
    }

    /// True for instructions that conditionally skip the following
    /// instruction rather than branching to an encoded target.
    pub fn is_skip(self) -> bool {
        matches!(
            self,
            Self::Cpse | Self::Sbrc | Self::Sbrs | Self::Sbic | Self::Sbis
        )
    }

    /// SREG write group for this instruction, per the AVR instruction set
    /// manual. `None` means no status flags are written.
    pub fn flag_write_group(self) -> Option<FlagWriteGroup> {
        match self {
            Self::Add
            | Self::Adc
            | Self::Sub
            | Self::Subi
            | Self::Sbc
            | Self::Sbci
            | Self::Cp
            | Self::Cpc
            | Self::Cpi
            | Self::Neg => Some(FlagWriteGroup::Hsvnzc),
            Self::Adiw
            | Self::Sbiw
            | Self::Com
            | Self::Lsl
            | Self::Lsr
            | Self::Rol
            | Self::Ror
            | Self::Asr => Some(FlagWriteGroup::Svnzc),
            Self::And | Self::Andi | Self::Or | Self::Ori | Self::Eor | Self::Inc | Self::Dec => {
                Some(FlagWriteGroup::Svnz)
            }
            Self::Mul | Self::Muls | Self::Mulsu | Self::Fmul | Self::Fmuls | Self::Fmulsu => {
                Some(FlagWriteGroup::Zc)
            }
            Self::Bst | Self::Set | Self::Clt => Some(FlagWriteGroup::OnlyT),
            Self::Sec | Self::Clc => Some(FlagWriteGroup::OnlyC),
            Self::Seh | Self::Clh => Some(FlagWriteGroup::OnlyH),
            Self::Sei | Self::Cli | Self::Reti => Some(FlagWriteGroup::OnlyI),
            Self::Sen | Self::Cln => Some(FlagWriteGroup::OnlyN),
            Self::Ses | Self::Cls => Some(FlagWriteGroup::OnlyS),
            Self::Sev | Self::Clv => Some(FlagWriteGroup::OnlyV),
            Self::Sez | Self::Clz => Some(FlagWriteGroup::OnlyZ),
            _ => None,
        }
    }
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
