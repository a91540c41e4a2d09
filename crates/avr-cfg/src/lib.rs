//! Control flow edge derivation for decoded AVR instructions.
//!
//! Maps one decoded instruction at a byte address to the outgoing edges a
//! CFG pass needs. All targets are byte addresses: AVR program memory is
//! word-addressed, so encoded word values are scaled by 2 here.

use tracing::debug;

use avr_isa::{DecodedInstr, Mnemonic, Operand};

/// Kind of outgoing control-flow edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BranchKind {
    /// Function return; target is dynamic.
    Return,
    /// Call with a known static target.
    Call,
    UnconditionalJump,
    /// Taken side of a conditional branch or skip.
    ConditionalTrue,
    /// Fall-through side of a conditional branch or skip.
    ConditionalFalse,
    /// Jump or call through a pointer register; target is dynamic.
    IndirectBranch,
}

/// One outgoing edge. `target` is `None` when the destination cannot be
/// derived statically (returns and indirect branches).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub kind: BranchKind,
    pub target: Option<u32>,
}

impl Edge {
    fn to(kind: BranchKind, target: u32) -> Self {
        Self {
            kind,
            target: Some(target),
        }
    }

    fn dynamic(kind: BranchKind) -> Self {
        Self { kind, target: None }
    }
}

/// Resolve a word-relative offset to a byte address past this instruction.
/// A backward offset that resolves below address 0 wraps in the 32-bit
/// address space rather than clamping.
fn relative_target(addr: u32, offset: i16) -> u32 {
    addr.wrapping_add_signed(i32::from(offset) * 2 + 2)
}

/// Derive the outgoing control-flow edges of `instr` at byte address `addr`.
///
/// Instructions with plain sequential flow get no edge; the caller infers
/// fall-through from `instr.length`. Skip instructions report their taken
/// edge as `addr + 4`, assuming the skipped instruction is 2 bytes wide;
/// a 4-byte-wide skipped instruction is not accounted for.
pub fn branch_edges(instr: &DecodedInstr, addr: u32) -> Vec<Edge> {
    match instr.mnemonic {
        Mnemonic::Ret | Mnemonic::Reti => vec![Edge::dynamic(BranchKind::Return)],
        Mnemonic::Call | Mnemonic::Jmp => {
            let kind = if instr.mnemonic == Mnemonic::Call {
                BranchKind::Call
            } else {
                BranchKind::UnconditionalJump
            };
            match instr.dst {
                Some(Operand::DirectAddress(word)) => {
                    vec![Edge::to(kind, u32::from(word) * 2)]
                }
                _ => {
                    debug!(mnemonic = %instr.mnemonic, "missing direct-address operand");
                    vec![]
                }
            }
        }
        Mnemonic::Rcall | Mnemonic::Rjmp => {
            let kind = if instr.mnemonic == Mnemonic::Rcall {
                BranchKind::Call
            } else {
                BranchKind::UnconditionalJump
            };
            match instr.dst {
                Some(Operand::RelativeAddress(k)) => {
                    vec![Edge::to(kind, relative_target(addr, k))]
                }
                _ => {
                    debug!(mnemonic = %instr.mnemonic, "missing relative-address operand");
                    vec![]
                }
            }
        }
        Mnemonic::Icall | Mnemonic::Ijmp | Mnemonic::Eicall | Mnemonic::Eijmp => {
            vec![Edge::dynamic(BranchKind::IndirectBranch)]
        }
        m if m.is_conditional_branch() => match instr.dst {
            Some(Operand::RelativeAddress(k)) => vec![
                Edge::to(BranchKind::ConditionalTrue, relative_target(addr, k)),
                Edge::to(BranchKind::ConditionalFalse, addr + 2),
            ],
            _ => {
                debug!(mnemonic = %m, "missing relative-address operand");
                vec![]
            }
        },
        // brbs/brbc carry the offset in the source slot; the destination
        // slot holds the condition-code immediate.
        Mnemonic::Brbs | Mnemonic::Brbc => match instr.src {
            Some(Operand::RelativeAddress(k)) => vec![
                Edge::to(BranchKind::ConditionalTrue, relative_target(addr, k)),
                Edge::to(BranchKind::ConditionalFalse, addr + 2),
            ],
            _ => {
                debug!(mnemonic = %instr.mnemonic, "missing relative-address operand");
                vec![]
            }
        },
        m if m.is_skip() => vec![
            Edge::to(BranchKind::ConditionalTrue, addr + 4),
            Edge::to(BranchKind::ConditionalFalse, addr + 2),
        ],
        _ => vec![],
    }
}
