//! Fetch-decode-execute interpreter.
//!
//! Every instruction is total: invalid register operands make the instruction
//! a no-op that still advances `PC`, and unknown bytes are skipped. The only
//! ways a run ends are `HLT`, `PC` leaving the execution limit, or the step
//! budget running out.

mod helpers;

use log::{debug, trace};

use crate::api::{RunConfig, RunOutcome, StepOutcome, StopReason};
use crate::decoder::{Decoded, Decoder, Instruction};
use crate::memory::Memory;
use crate::state::{GeneralRegister, MachineState};

use helpers::{register_pair, wrap_pc};

/// Applies one decoded instruction to `state`, except for the `PC` update.
///
/// Returns the continuation address: the decoder's next offset, or the jump
/// target when a jump is taken. The value is not masked to 16 bits.
pub fn execute_instruction(decoded: &Decoded, state: &mut MachineState) -> usize {
    let fall_through = decoded.next_offset();

    match decoded.instruction {
        Instruction::MoveImmediate { reg, imm } => {
            if let Ok(reg) = GeneralRegister::try_from(reg) {
                state.set_gpr(reg, imm);
            }
            fall_through
        }
        Instruction::MoveRegister { dst, src } => {
            if let Some((dst, src)) = register_pair(dst, src) {
                state.set_gpr(dst, state.gpr(src));
            }
            fall_through
        }
        Instruction::AddRegister { dst, src } => {
            if let Some((dst, src)) = register_pair(dst, src) {
                let result = state.gpr(dst).wrapping_add(state.gpr(src));
                state.set_gpr(dst, result);
                state.set_zero(result == 0);
            }
            fall_through
        }
        Instruction::Jump { target } => usize::from(target),
        Instruction::JumpIfZero { target } => {
            if state.zero() {
                usize::from(target)
            } else {
                fall_through
            }
        }
        Instruction::Halt => {
            state.halt();
            fall_through
        }
        Instruction::Unknown(_) => fall_through,
    }
}

/// Executes exactly one instruction at `PC`.
///
/// Does nothing and returns [`StepOutcome::Idle`] if the machine is halted.
pub fn step(memory: &Memory, state: &mut MachineState) -> StepOutcome {
    if state.is_halted() {
        return StepOutcome::Idle;
    }

    let decoded = Decoder::decode(memory.as_bytes(), usize::from(state.pc()));
    let next_pc = execute_instruction(&decoded, state);
    state.set_pc(wrap_pc(next_pc));

    trace!(
        "{:04X}: {} -> PC={:04X}",
        decoded.offset,
        decoded.instruction,
        state.pc()
    );

    StepOutcome::Retired {
        instruction: decoded,
        next_pc,
    }
}

/// Steps until the machine halts, `PC` leaves the execution limit, or the
/// step budget is exhausted.
///
/// The limit is checked before each step, so a jump out of range is noticed
/// on the following iteration. A fall-through that runs off the end of the
/// 16-bit address space also stops the run instead of wrapping to 0.
pub fn run(memory: &Memory, state: &mut MachineState, config: &RunConfig) -> RunOutcome {
    let limit = config.effective_limit();
    let mut steps = 0_usize;

    debug!(
        "run from PC={:04X} limit={limit} max_steps={:?}",
        state.pc(),
        config.max_steps
    );

    let stop = loop {
        if state.is_halted() {
            break StopReason::Halted;
        }

        let pc = usize::from(state.pc());
        if pc >= limit {
            break StopReason::OutOfBounds { pc };
        }

        if config.max_steps.is_some_and(|max| steps >= max) {
            break StopReason::StepLimit;
        }

        steps += 1;
        if let StepOutcome::Retired { next_pc, .. } = step(memory, state) {
            if next_pc > usize::from(u16::MAX) && !state.is_halted() {
                break StopReason::OutOfBounds { pc: next_pc };
            }
        }
    };

    debug!("run stopped after {steps} steps: {stop:?}");

    RunOutcome { steps, stop }
}

#[cfg(test)]
mod tests {
    use super::{execute_instruction, run, step};
    use crate::api::{RunConfig, StepOutcome, StopReason};
    use crate::decoder::{Decoded, Decoder, Instruction};
    use crate::memory::Memory;
    use crate::state::{GeneralRegister, MachineState};

    fn decoded(instruction: Instruction) -> Decoded {
        Decoder::decode(&instruction.encode(), 0)
    }

    #[test]
    fn mov_immediate_loads_register() {
        let mut state = MachineState::new();
        let next = execute_instruction(
            &decoded(Instruction::MoveImmediate { reg: 4, imm: 0xBEEF }),
            &mut state,
        );
        assert_eq!(state.gpr(GeneralRegister::R4), 0xBEEF);
        assert_eq!(next, 4);
    }

    #[test]
    fn mov_immediate_with_invalid_register_is_noop() {
        let mut state = MachineState::new();
        let next = execute_instruction(
            &decoded(Instruction::MoveImmediate { reg: 200, imm: 5 }),
            &mut state,
        );
        assert_eq!(state.registers(), &[0; 8]);
        assert_eq!(next, 4);
    }

    #[test]
    fn mov_register_copies_value() {
        let mut state = MachineState::new();
        state.set_gpr(GeneralRegister::R1, 0x1234);
        let next = execute_instruction(
            &decoded(Instruction::MoveRegister { dst: 0, src: 1 }),
            &mut state,
        );
        assert_eq!(state.gpr(GeneralRegister::R0), 0x1234);
        assert_eq!(state.gpr(GeneralRegister::R1), 0x1234);
        assert_eq!(next, 3);
    }

    #[test]
    fn mov_register_with_invalid_source_is_noop() {
        let mut state = MachineState::new();
        state.set_gpr(GeneralRegister::R0, 7);
        execute_instruction(
            &decoded(Instruction::MoveRegister { dst: 0, src: 8 }),
            &mut state,
        );
        assert_eq!(state.gpr(GeneralRegister::R0), 7);
    }

    #[test]
    fn add_wraps_and_sets_zero() {
        let mut state = MachineState::new();
        state.set_gpr(GeneralRegister::R0, 0xFFFF);
        state.set_gpr(GeneralRegister::R1, 0x0001);
        execute_instruction(
            &decoded(Instruction::AddRegister { dst: 0, src: 1 }),
            &mut state,
        );
        assert_eq!(state.gpr(GeneralRegister::R0), 0x0000);
        assert!(state.zero());
    }

    #[test]
    fn add_clears_zero_on_nonzero_result() {
        let mut state = MachineState::new();
        state.set_zero(true);
        state.set_gpr(GeneralRegister::R0, 0x7FFF);
        state.set_gpr(GeneralRegister::R1, 0x0001);
        execute_instruction(
            &decoded(Instruction::AddRegister { dst: 0, src: 1 }),
            &mut state,
        );
        assert_eq!(state.gpr(GeneralRegister::R0), 0x8000);
        assert!(!state.zero());
    }

    #[test]
    fn add_with_invalid_register_leaves_zero_flag() {
        let mut state = MachineState::new();
        state.set_zero(true);
        let next = execute_instruction(
            &decoded(Instruction::AddRegister { dst: 9, src: 0 }),
            &mut state,
        );
        assert!(state.zero());
        assert_eq!(next, 3);
    }

    #[test]
    fn jz_follows_zero_flag() {
        let mut state = MachineState::new();
        let jz = decoded(Instruction::JumpIfZero { target: 0x0040 });
        assert_eq!(execute_instruction(&jz, &mut state), 3);
        state.set_zero(true);
        assert_eq!(execute_instruction(&jz, &mut state), 0x0040);
    }

    #[test]
    fn jmp_is_always_taken() {
        let mut state = MachineState::new();
        let jmp = decoded(Instruction::Jump { target: 0xFFFF });
        assert_eq!(execute_instruction(&jmp, &mut state), 0xFFFF);
    }

    #[test]
    fn step_on_halted_machine_is_idle() {
        let memory = Memory::from_image(&[0x01, 0x00, 0x05, 0x00]);
        let mut state = MachineState::new();
        state.halt();
        assert_eq!(step(&memory, &mut state), StepOutcome::Idle);
        assert_eq!(state.pc(), 0);
        assert_eq!(state.gpr(GeneralRegister::R0), 0);
    }

    #[test]
    fn step_halt_advances_pc_and_latches() {
        let memory = Memory::from_image(&[0xFF]);
        let mut state = MachineState::new();
        let outcome = step(&memory, &mut state);
        assert!(matches!(outcome, StepOutcome::Retired { next_pc: 1, .. }));
        assert_eq!(state.pc(), 1);
        assert!(state.is_halted());
    }

    #[test]
    fn unknown_byte_advances_one() {
        let memory = Memory::from_image(&[0x99]);
        let mut state = MachineState::new();
        step(&memory, &mut state);
        assert_eq!(state.pc(), 1);
        assert!(!state.is_halted());
    }

    #[test]
    fn run_stops_at_image_end() {
        let memory = Memory::from_image(&[0x99, 0x98]);
        let mut state = MachineState::new();
        let outcome = run(&memory, &mut state, &RunConfig::for_image(2));
        assert_eq!(outcome.steps, 2);
        assert_eq!(outcome.stop, StopReason::OutOfBounds { pc: 2 });
    }

    #[test]
    fn run_respects_step_budget() {
        // JMP 0000: spins forever without a budget.
        let memory = Memory::from_image(&[0x10, 0x00, 0x00]);
        let mut state = MachineState::new();
        let config = RunConfig::for_image(3).with_max_steps(10);
        let outcome = run(&memory, &mut state, &config);
        assert_eq!(outcome.steps, 10);
        assert_eq!(outcome.stop, StopReason::StepLimit);
        assert_eq!(state.pc(), 0);
    }

    #[test]
    fn run_on_halted_machine_executes_nothing() {
        let memory = Memory::from_image(&[0x01, 0x00, 0x05, 0x00]);
        let mut state = MachineState::new();
        state.halt();
        let outcome = run(&memory, &mut state, &RunConfig::unbounded());
        assert_eq!(outcome.steps, 0);
        assert_eq!(outcome.stop, StopReason::Halted);
    }

    #[test]
    fn jump_past_limit_is_detected_on_next_check() {
        let memory = Memory::from_image(&[0x10, 0x00, 0x01, 0xFF]);
        let mut state = MachineState::new();
        let outcome = run(&memory, &mut state, &RunConfig::for_image(4));
        assert_eq!(outcome.steps, 1);
        assert_eq!(state.pc(), 0x0100);
        assert_eq!(outcome.stop, StopReason::OutOfBounds { pc: 0x0100 });
        assert!(!state.is_halted());
    }

    #[test]
    fn fall_through_off_address_space_stops_run() {
        let mut image = vec![0x00; 0x1_0000];
        image[0xFFFE] = 0x01;
        let memory = Memory::from_image(&image);
        let mut state = MachineState::new();
        state.set_pc(0xFFFE);
        let outcome = run(&memory, &mut state, &RunConfig::unbounded());
        assert_eq!(outcome.steps, 1);
        assert_eq!(outcome.stop, StopReason::OutOfBounds { pc: 0x1_0002 });
        assert_eq!(state.pc(), 0x0002);
    }

    #[test]
    fn halt_at_last_address_reports_halted() {
        let mut image = vec![0x00; 0x1_0000];
        image[0xFFFF] = 0xFF;
        let memory = Memory::from_image(&image);
        let mut state = MachineState::new();
        state.set_pc(0xFFFF);
        let outcome = run(&memory, &mut state, &RunConfig::unbounded());
        assert_eq!(outcome.stop, StopReason::Halted);
        assert!(state.is_halted());
    }
}
