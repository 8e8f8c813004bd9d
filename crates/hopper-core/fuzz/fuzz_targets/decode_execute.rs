#![no_main]

use hopper_core::{disassemble, run, Decoder, MachineState, Memory, RunConfig, StopReason};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let lines = disassemble(data);
    assert_eq!(lines.len(), Decoder::instructions(data).count());

    let memory = Memory::from_image(data);
    let mut state = MachineState::new();
    let config = RunConfig::for_image(data.len()).with_max_steps(1 << 16);
    let outcome = run(&memory, &mut state, &config);

    if outcome.stop == StopReason::Halted {
        assert!(state.is_halted());
    }
});
