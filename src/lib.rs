/*!

A CHIP-8 virtual machine as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Crossterm Frontend

If you want to try the emulator on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
The keypad is mapped onto the left side of the keyboard:

```text
1 2 3 4        1 2 3 C
q w e r   ->   4 5 6 D
a s d f        7 8 9 E
z x c v        A 0 B F
```

Space pauses and resumes, escape quits. Set `RUST_LOG=trace` to log every instruction.

# Library

If you are not interested in handling input (key presses and such),
then you can use `Emulator::new()` to get an emulator to work with.
It runs 700 instructions per second in batches of one 60 Hz frame.

```rust
use chip8_vm::emulator::Emulator;

let mut emulator = Emulator::new();

// Load a program at address 0x200: clear the screen, then loop forever.
let program = [0x00, 0xE0, 0x12, 0x02];
emulator.load(&program).unwrap();
emulator.run_frame().unwrap();
assert_eq!(emulator.machine().pc(), 0x202);
```

Alternatively, you can experiment by executing instructions on a bare machine.

```rust
use chip8_vm::emulator::{Machine, Quirks};
use chip8_vm::emulator::instruction::{Instruction, Reg, Const};

let mut machine = Machine::new(Quirks::default());

machine.execute(Instruction::SetRegToConst(Reg(0xA), Const(250))).unwrap();
machine.execute(Instruction::SetRegToConst(Reg(0xB), Const(10))).unwrap();
machine.execute(Instruction::IncRegByReg(Reg(0xA), Reg(0xB))).unwrap();

assert_eq!(machine.register(0xA), 4);
assert_eq!(machine.register(0xF), 1); // carry
```

## Custom input and output

To get keypresses, you must implement `EmulatorInput` and `EmulatorOutput`,
which represent somewhere to get keyboard input from and a screen respectively.
Take a look at `src/emulator/input.rs` and `src/emulator/output.rs` to see how to implement this, then do the following.

```ignore
use chip8_vm::emulator::{Config, Emulator};

let mut emulator = Emulator::with_io(Config::default(), MyInput::new(), MyOutput::new());
emulator.load(&program)?;
emulator.run()?;
```

You can then implement the emulator using your own custom frontend, as done with crossterm in crossterm_frontend.
*/

pub mod cli;
pub mod emulator;
