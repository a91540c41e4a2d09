//! Static register and status-flag catalogs.
//!
//! Process-wide constant data: the 32 general-purpose registers, the 64-slot
//! I/O register namespace (ATmega map, many slots reserved), and the SREG
//! flag metadata a host needs for dataflow analysis. Nothing here is ever
//! mutated after compile time, so concurrent readers need no locking.

/// Number of general-purpose registers.
pub const NUM_REGISTERS: usize = 32;
/// Width of a general-purpose register in bytes.
pub const REGISTER_BYTES: usize = 1;
/// Number of I/O register slots addressable by `in`/`out`.
pub const NUM_IO_REGISTERS: usize = 64;

/// General-purpose register names, indexed by register number.
pub static REGISTER_NAMES: [&str; NUM_REGISTERS] = [
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12", "r13", "r14",
    "r15", "r16", "r17", "r18", "r19", "r20", "r21", "r22", "r23", "r24", "r25", "r26", "r27",
    "r28", "r29", "r30", "r31",
];

/// I/O register names, indexed by I/O slot. Unassigned slots are `Reserved`.
pub static IO_REGISTER_NAMES: [&str; NUM_IO_REGISTERS] = [
    "Reserved", "Reserved", "Reserved", "PINB", "DDRB", "PORTB", "PINC", "DDRC", "PORTC", "PIND",
    "DDRD", "PORTD", "Reserved", "Reserved", "Reserved", "Reserved", "Reserved", "Reserved",
    "Reserved", "Reserved", "Reserved", "TIFR0", "TIFR1", "TIFR2", "Reserved", "Reserved",
    "Reserved", "PCIFR", "EIFR", "EIMSK", "GPIOR0", "EECR", "EEDR", "EEARL", "EEARH", "GTCCR",
    "TCCR0A", "TCCR0B", "TCNT0", "OCR0A", "OCR0B", "Reserved", "GPIOR1", "GPIOR2", "SPCR", "SPSR",
    "SPDR", "Reserved", "ACSR", "Reserved", "Reserved", "SMCR", "MCUSR", "MCUCR", "Reserved",
    "SPMCSR", "Reserved", "Reserved", "Reserved", "Reserved", "Reserved", "SPL", "SPH", "SREG",
];

/// Get a general-purpose register name.
pub fn register_name(reg: u8) -> &'static str {
    REGISTER_NAMES.get(reg as usize).copied().unwrap_or("??")
}

/// Get an I/O register name.
pub fn io_register_name(reg: u8) -> &'static str {
    IO_REGISTER_NAMES.get(reg as usize).copied().unwrap_or("??")
}

/// SREG status flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flag {
    C,
    Z,
    N,
    V,
    S,
    H,
    T,
    I,
}

impl Flag {
    /// Single-letter flag name.
    pub fn name(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::Z => "Z",
            Self::N => "N",
            Self::V => "V",
            Self::S => "S",
            Self::H => "H",
            Self::T => "T",
            Self::I => "I",
        }
    }
}

/// All SREG flags, in the order the original architecture registered them.
pub static FLAGS: [Flag; 8] = [
    Flag::C,
    Flag::Z,
    Flag::N,
    Flag::V,
    Flag::S,
    Flag::H,
    Flag::T,
    Flag::I,
];

/// Named groupings of flags written together.
///
/// Metadata for a host's dataflow analysis: the decoder only tags which group
/// an instruction belongs to, it never computes flag values. Some groups
/// (e.g. [`FlagWriteGroup::All`]) have no statically-taggable instruction but
/// remain part of the namespace the host can key on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlagWriteGroup {
    /// Writes every flag.
    All,
    OnlyT,
    Svnz,
    OnlyC,
    OnlyH,
    OnlyI,
    OnlyN,
    OnlyS,
    OnlyV,
    OnlyZ,
    Svnzc,
    Hsvnzc,
    Zc,
}

impl FlagWriteGroup {
    /// Flags written by instructions in this group.
    pub fn flags(self) -> &'static [Flag] {
        match self {
            Self::All => &FLAGS,
            Self::OnlyT => &[Flag::T],
            Self::Svnz => &[Flag::S, Flag::V, Flag::N, Flag::Z],
            Self::OnlyC => &[Flag::C],
            Self::OnlyH => &[Flag::H],
            Self::OnlyI => &[Flag::I],
            Self::OnlyN => &[Flag::N],
            Self::OnlyS => &[Flag::S],
            Self::OnlyV => &[Flag::V],
            Self::OnlyZ => &[Flag::Z],
            Self::Svnzc => &[Flag::S, Flag::V, Flag::N, Flag::Z, Flag::C],
            Self::Hsvnzc => &[Flag::H, Flag::S, Flag::V, Flag::N, Flag::Z, Flag::C],
            Self::Zc => &[Flag::Z, Flag::C],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_names() {
        assert_eq!(register_name(0), "r0");
        assert_eq!(register_name(31), "r31");
        assert_eq!(register_name(32), "??");
    }

    #[test]
    fn test_io_register_names() {
        assert_eq!(io_register_name(0), "Reserved");
        assert_eq!(io_register_name(0x3F), "SREG");
        assert_eq!(io_register_name(0x3D), "SPL");
        assert_eq!(io_register_name(64), "??");
    }

    #[test]
    fn test_flag_groups() {
        assert_eq!(FlagWriteGroup::All.flags().len(), 8);
        assert_eq!(FlagWriteGroup::OnlyT.flags(), &[Flag::T]);
        assert_eq!(
            FlagWriteGroup::Svnz.flags(),
            &[Flag::S, Flag::V, Flag::N, Flag::Z]
        );
        assert_eq!(FlagWriteGroup::Hsvnzc.flags().len(), 6);
    }
}
