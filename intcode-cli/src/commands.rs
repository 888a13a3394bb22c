//! CLI command implementations.

use std::fs;
use std::path::Path;
use std::time::Instant;

use intcode_common::{Cell, Opcode, Program};
use intcode_vm::{Machine, RuntimeError, State};
use tracing::info;

use crate::RunArgs;

/// Run a program with the batch driver and print all outputs.
pub fn run(args: &RunArgs) -> Result<(), i32> {
    let program = read_program(&args.file)?;
    let input = parse_input(args);

    let started = Instant::now();
    let outputs = intcode_vm::run_with_config(&program, &input, &args.config()).map_err(|e| {
        eprintln!("runtime error: {e}");
        3
    })?;
    info!(
        elapsed = ?started.elapsed(),
        outputs = outputs.len(),
        "program halted"
    );

    println!("{outputs:?}");
    Ok(())
}

/// Run a program one instruction at a time, printing each instruction
/// before it executes and each output as it is produced.
pub fn trace(args: &RunArgs) -> Result<(), i32> {
    let program = read_program(&args.file)?;
    let config = args.config();
    let mut input = parse_input(args).into_iter();

    let fault = |e: RuntimeError| {
        eprintln!("runtime error: {e}");
        3
    };

    let mut machine = Machine::with_config(program, &config).map_err(fault)?;

    loop {
        if let Some(limit) = config.step_limit {
            if machine.steps() >= limit {
                return Err(fault(RuntimeError::StepLimitExceeded { limit }));
            }
        }

        let pc = machine.pc();
        let instr = machine.decode_current().map_err(fault)?;
        println!("{pc:>5}: {}", intcode_assembler::disassemble(&instr));

        // Fill the input slot before an `in` executes so it never blocks
        // and every listed line is one executed step.
        if instr.opcode == Opcode::In && !machine.has_input() {
            let value = input
                .next()
                .ok_or(RuntimeError::InputExhausted { at: pc })
                .map_err(fault)?;
            println!("       <- {value}");
            machine.set_input(value).map_err(fault)?;
        }

        match machine.run(Some(1)).map_err(fault)? {
            State::Paused | State::Executing => {}
            State::WaitingForInput => {
                return Err(fault(RuntimeError::InputExhausted { at: pc }));
            }
            State::WaitingForOutput => {
                // An `out` blocked on an undrained slot is impossible here:
                // every output is drained immediately.
                let value = machine.get_output().map_err(fault)?;
                println!("       -> {value}");
            }
            State::Halted => {
                println!("halted after {} steps", machine.steps());
                return Ok(());
            }
        }
    }
}

/// Print the disassembly listing of a program file.
pub fn disassemble(path: &Path) -> Result<(), i32> {
    let program = read_program(path)?;
    print!("{}", intcode_assembler::listing(&program));
    Ok(())
}

/// Read and load a program file, rejecting files with no cells.
fn read_program(path: &Path) -> Result<Program, i32> {
    let text = fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{}': {e}", path.display());
        1
    })?;

    let program = intcode_assembler::load(&text);
    if program.is_empty() {
        eprintln!("error: '{}' contains no program", path.display());
        return Err(1);
    }
    Ok(program)
}

/// The `--input` list, loaded with the same rules as program text.
fn parse_input(args: &RunArgs) -> Vec<Cell> {
    args.input
        .as_deref()
        .map(|text| intcode_assembler::load(text).cells().to_vec())
        .unwrap_or_default()
}
