//! The CHIP-8 virtual machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use crate::emulator::config::Quirks;
use crate::emulator::display::Display;
use crate::emulator::error::Result;
use crate::emulator::instruction::Instruction;
use crate::emulator::keypad::Keypad;
use crate::emulator::memory::{Memory, PROGRAM_START};
use crate::emulator::opcode::Opcode;
use crate::emulator::stack::CallStack;
use crate::emulator::timers::Timers;
use crate::emulator::trace::{TraceEvent, Tracer};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const NUM_REGISTERS: usize = 16;
pub const FLAG: usize = 0xF;

/// Whether the machine is fetching instructions or parked on FX0A.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    Ready,
    /// PC points at the FX0A instruction, VX receives the next key.
    WaitingForKey { register: u8 },
}

/// All state of one machine. Owned by a single scheduler and only
/// changed through `step`, `execute` and `tick_timers`.
pub struct Machine {
    pub(crate) memory: Memory,
    pub(crate) registers: [u8; NUM_REGISTERS],
    pub(crate) i: u16,
    pub(crate) program_counter: u16,
    pub(crate) stack: CallStack,
    pub(crate) timers: Timers,
    pub(crate) keypad: Keypad,
    pub(crate) display: Display,
    pub(crate) execution: Execution,
    pub(crate) quirks: Quirks,
    pub(crate) rng: StdRng,
    tracer: Option<Box<dyn Tracer>>,
}

impl Machine {
    /// Create a machine in its reset state, with the random generator seeded from the OS.
    pub fn new(quirks: Quirks) -> Machine {
        Machine::with_rng(quirks, StdRng::from_entropy())
    }

    /// Create a machine whose CXNN results are reproducible.
    pub fn with_seed(quirks: Quirks, seed: u64) -> Machine {
        Machine::with_rng(quirks, StdRng::seed_from_u64(seed))
    }

    fn with_rng(quirks: Quirks, rng: StdRng) -> Machine {
        Machine {
            memory: Memory::new(),
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: PROGRAM_START,
            stack: CallStack::new(),
            timers: Timers::new(),
            keypad: Keypad::new(),
            display: Display::new(),
            execution: Execution::Ready,
            quirks,
            rng,
            tracer: None,
        }
    }

    /// Put everything back to power-on state. The loaded program is gone,
    /// quirks, random generator and tracer are kept.
    pub fn reset(&mut self) {
        self.memory = Memory::new();
        self.registers = [0; NUM_REGISTERS];
        self.i = 0;
        self.program_counter = PROGRAM_START;
        self.stack = CallStack::new();
        self.timers = Timers::new();
        self.keypad.release_all();
        self.display.clear();
        self.execution = Execution::Ready;
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        self.memory.load_program(program)?;
        log::info!("Loaded {} byte program at {:#05x}", program.len(), PROGRAM_START);
        Ok(())
    }

    pub fn set_tracer(&mut self, tracer: Box<dyn Tracer>) {
        self.tracer = Some(tracer);
    }

    /// Read the instruction word at PC and move PC past it.
    pub fn fetch(&mut self) -> Result<Opcode> {
        let opcode = self.memory.fetch(self.program_counter)?;
        self.program_counter += 2;
        Ok(opcode)
    }

    /// Run one cycle. Normally that is fetch, decode and execute.
    /// While waiting for a key nothing is fetched, the keypad is checked instead.
    pub fn step(&mut self) -> Result<()> {
        if let Execution::WaitingForKey { register } = self.execution {
            self.resume_on_key(register);
            return Ok(());
        }

        let address = self.program_counter;
        let opcode = self.fetch()?;
        let instruction = Instruction::decode(opcode);
        self.execute(instruction)?;

        if self.tracer.is_some() {
            let event = TraceEvent {
                address,
                opcode,
                instruction,
                pc: self.program_counter,
                index: self.i,
                registers: self.registers,
            };
            if let Some(tracer) = self.tracer.as_mut() {
                tracer.trace(&event);
            }
        }

        Ok(())
    }

    fn resume_on_key(&mut self, register: u8) {
        if let Some(key) = self.keypad.lowest_pressed() {
            log::debug!("Key {:X} pressed, stored in V{:X}", key, register);
            self.registers[register as usize] = key;
            self.program_counter += 2;
            self.execution = Execution::Ready;
        }
    }

    /// Count both timers down, called once per frame.
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    pub fn pc(&self) -> u16 {
        self.program_counter
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn register(&self, x: u8) -> u8 {
        self.registers[x as usize & 0xF]
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn timers(&self) -> Timers {
        self.timers
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn execution(&self) -> Execution {
        self.execution
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::emulator::error::Error;
    use crate::emulator::memory::MEM_SIZE;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn machine_with(program: &[u8]) -> Machine {
        let mut machine = Machine::with_seed(Quirks::default(), 0);
        machine.load(program).unwrap();
        machine
    }

    #[test]
    fn starts_at_0x200() {
        let machine = Machine::new(Quirks::default());
        assert_eq!(0x200, machine.pc());
        assert_eq!(0, machine.index());
        assert_eq!(&[0; 16], machine.registers());
        assert_eq!(0, machine.stack_depth());
        assert_eq!(Execution::Ready, machine.execution());
    }

    #[test]
    fn non_jumping_instructions_advance_pc_by_two() {
        let mut machine = machine_with(&[
            0x60, 0x05, // LD V0, 5
            0x70, 0x01, // ADD V0, 1
            0x30, 0x00, // SE V0, 0 (false)
            0xA3, 0x00, // LD I, 0x300
            0xF0, 0x55, // LD [I], V0
            0x00, 0xE0, // CLS
            0xFF, 0xFF, // unknown
        ]);
        for step in 1..=7 {
            machine.step().unwrap();
            assert_eq!(0x200 + 2 * step, machine.pc());
        }
    }

    #[test]
    fn return_after_call_is_neutral() {
        let mut machine = machine_with(&[
            0x22, 0x06, // 0x00, call 0x206
            0x00, 0x00, // 0x02
            0x00, 0x00, // 0x04
            0x00, 0xEE, // 0x06, return
        ]);

        machine.step().unwrap(); // Call 0x206
        assert_eq!(0x206, machine.pc());
        assert_eq!(1, machine.stack_depth());
        machine.step().unwrap(); // Return to 202
        assert_eq!(0x202, machine.pc());
        assert_eq!(0, machine.stack_depth());
    }

    #[test]
    fn nested_calls_unwind_to_their_call_sites() {
        // Each subroutine at 0x200 + 4k calls the next one, the last returns.
        let depth = crate::emulator::stack::STACK_CAPACITY;
        let mut program = Vec::new();
        for k in 1..depth {
            let target = 0x200 + 4 * k as u16;
            program.extend_from_slice(&[0x20 | (target >> 8) as u8, target as u8, 0x00, 0xEE]);
        }
        program.extend_from_slice(&[0x00, 0xEE]);

        let mut machine = machine_with(&[]);
        machine.program_counter = 0x300;
        machine.memory.load_program(&program).unwrap();
        // Enter the chain with one more call from 0x300.
        machine.memory.write(0x300, 0x22).unwrap();
        machine.memory.write(0x301, 0x00).unwrap();

        for _ in 0..depth {
            machine.step().unwrap();
        }
        assert_eq!(depth, machine.stack_depth());
        for _ in 0..depth {
            machine.step().unwrap();
        }
        assert_eq!(0x302, machine.pc());
        assert_eq!(0, machine.stack_depth());
    }

    #[test]
    fn recursion_overflows_the_stack() {
        let mut machine = machine_with(&[0x22, 0x00]); // call self
        for _ in 0..crate::emulator::stack::STACK_CAPACITY {
            machine.step().unwrap();
        }
        assert!(matches!(machine.step(), Err(Error::StackOverflow { .. })));
    }

    #[test]
    fn fetch_past_memory_is_fatal() {
        let mut machine = machine_with(&[0x1F, 0xFF]); // jump to 0xFFF
        machine.step().unwrap();
        assert!(matches!(machine.step(), Err(Error::Decode { pc: 0xFFF })));
    }

    #[test]
    fn last_word_in_memory_can_be_fetched() {
        let mut machine = machine_with(&[0x1F, 0xFE]);
        machine.step().unwrap();
        machine.step().unwrap();
        assert_eq!(MEM_SIZE as u16, machine.pc());
        assert!(matches!(machine.step(), Err(Error::Decode { .. })));
    }

    #[test]
    fn waits_for_key_without_fetching() {
        let mut machine = machine_with(&[0xF3, 0x0A, 0x60, 0x01]);
        machine.registers[3] = 0x42;

        for _ in 0..5 {
            machine.step().unwrap();
            assert_eq!(0x200, machine.pc());
            assert_eq!(0x42, machine.register(3));
            assert_eq!(Execution::WaitingForKey { register: 3 }, machine.execution());
        }

        machine.keypad_mut().press(0xB);
        machine.keypad_mut().press(0x7);
        machine.step().unwrap();
        assert_eq!(0x7, machine.register(3));
        assert_eq!(0x202, machine.pc());
        assert_eq!(Execution::Ready, machine.execution());

        machine.step().unwrap();
        assert_eq!(1, machine.register(0));
    }

    #[test]
    fn reset_clears_everything_but_keeps_quirks() {
        let quirks = Quirks {
            logic_resets_vf: true,
            shift_reads_vy: true,
        };
        let mut machine = Machine::with_seed(quirks, 1);
        machine.load(&[0x6A, 0x10, 0xA2, 0x34, 0x22, 0x00]).unwrap();
        for _ in 0..3 {
            machine.step().unwrap();
        }
        machine.timers.delay = 9;
        machine.keypad_mut().press(1);

        machine.reset();
        assert_eq!(0x200, machine.pc());
        assert_eq!(0, machine.index());
        assert_eq!(0, machine.register(0xA));
        assert_eq!(0, machine.stack_depth());
        assert_eq!(Timers::new(), machine.timers());
        assert_eq!(None, machine.keypad().lowest_pressed());
        assert_eq!(0, machine.memory().read(0x200).unwrap());
        assert_eq!(quirks, machine.quirks());
    }

    struct Recorder(Rc<RefCell<Vec<TraceEvent>>>);

    impl Tracer for Recorder {
        fn trace(&mut self, event: &TraceEvent) {
            self.0.borrow_mut().push(*event);
        }
    }

    #[test]
    fn tracer_sees_every_instruction() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut machine = machine_with(&[0x61, 0x07, 0xA2, 0x22]);
        machine.set_tracer(Box::new(Recorder(events.clone())));
        machine.step().unwrap();
        machine.step().unwrap();

        let events = events.borrow();
        assert_eq!(2, events.len());
        assert_eq!(0x200, events[0].address);
        assert_eq!(Instruction::from_u16(0x6107), events[0].instruction);
        assert_eq!(7, events[0].registers[1]);
        assert_eq!(0x202, events[1].address);
        assert_eq!(0x204, events[1].pc);
        assert_eq!(0x222, events[1].index);
    }
}
