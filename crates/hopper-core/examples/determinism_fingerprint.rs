//! Prints a fingerprint of a reference run, for cross-host comparison.

use hopper_core::{disassemble, GeneralRegister, Instruction, Session, StopReason};
use log as _;
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

fn reference_image() -> Vec<u8> {
    [
        Instruction::MoveImmediate { reg: 0, imm: 0x0400 },
        Instruction::MoveImmediate { reg: 1, imm: 0xFFFF },
        Instruction::MoveImmediate { reg: 2, imm: 0x0003 },
        Instruction::AddRegister { dst: 2, src: 0 },
        Instruction::AddRegister { dst: 0, src: 1 },
        Instruction::JumpIfZero { target: 0x0018 },
        Instruction::Jump { target: 0x000C },
        Instruction::Unknown(0x42),
        Instruction::MoveRegister { dst: 7, src: 2 },
        Instruction::Halt,
    ]
    .iter()
    .flat_map(|instruction| instruction.encode())
    .collect()
}

fn hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= u64::from(*byte);
        *hash = hash.wrapping_mul(0x1000_0000_01B3);
    }
}

fn fingerprint() -> String {
    let image = reference_image();
    let mut session = Session::with_image(&image);
    let outcome = match session.execute(Some(1 << 20)) {
        Ok(outcome) => outcome,
        Err(err) => return format!("error: {err}"),
    };

    let mut hash = 0xcbf2_9ce4_8422_2325_u64;
    hash_bytes(&mut hash, &outcome.steps.to_le_bytes());

    match outcome.stop {
        StopReason::Halted => hash_bytes(&mut hash, &[0x10]),
        StopReason::OutOfBounds { pc } => {
            hash_bytes(&mut hash, &[0x11]);
            hash_bytes(&mut hash, &pc.to_le_bytes());
        }
        StopReason::StepLimit => hash_bytes(&mut hash, &[0x12]),
    }

    let state = session.state();
    hash_bytes(&mut hash, &state.pc().to_le_bytes());
    for reg in GeneralRegister::ALL {
        hash_bytes(&mut hash, &state.gpr(reg).to_le_bytes());
    }
    hash_bytes(&mut hash, &[u8::from(state.zero()), u8::from(state.is_halted())]);

    for line in disassemble(&image) {
        hash_bytes(&mut hash, line.as_bytes());
    }

    format!("{hash:016x}")
}

fn main() {
    println!("{}", fingerprint());
}
