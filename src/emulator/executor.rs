use crate::emulator::error::Result;
use crate::emulator::instruction::*;
use crate::emulator::machine::{Execution, Machine, FLAG};
use crate::emulator::memory::Memory;
use rand::Rng;

impl Machine {
    /// Execute a single decoded instruction. PC has already been moved past it.
    pub fn execute(&mut self, instruction: Instruction) -> Result<()> {
        match instruction {
            // Clear the screen
            Instruction::ClearScreen => self.display.clear(),

            // Return to the previous call site via the stack.
            Instruction::Return => {
                self.program_counter = self.stack.pop()?;
            }

            // Go to a specific memory address
            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr;
            }

            // Store the return address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                self.stack.push(self.program_counter)?;
                self.program_counter = addr;
            }

            // If the register equals the constant, skip the next instruction
            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                if self.registers[x as usize] == n {
                    self.program_counter += 2;
                }
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                if self.registers[x as usize] != n {
                    self.program_counter += 2;
                }
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                if self.registers[x as usize] == self.registers[y as usize] {
                    self.program_counter += 2;
                }
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
                if self.registers[x as usize] != self.registers[y as usize] {
                    self.program_counter += 2;
                }
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = n;
            }

            // Wraps, VF is left alone
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = self.registers[x as usize].wrapping_add(n);
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.registers[x as usize] = self.registers[y as usize];
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.registers[x as usize] |= self.registers[y as usize];
                self.reset_flag_after_logic();
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.registers[x as usize] &= self.registers[y as usize];
                self.reset_flag_after_logic();
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.registers[x as usize] ^= self.registers[y as usize];
                self.reset_flag_after_logic();
            }

            // VF is 1 on carry
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) =
                    self.registers[x as usize].overflowing_add(self.registers[y as usize]);
                self.set_with_flag(x, sum, carry);
            }

            // VF is 0 on borrow
            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.registers[x as usize], self.registers[y as usize]);
                self.set_with_flag(x, vx.wrapping_sub(vy), vx >= vy);
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.registers[x as usize], self.registers[y as usize]);
                self.set_with_flag(x, vy.wrapping_sub(vx), vy >= vx);
            }

            // VF gets the bit shifted out
            Instruction::ShiftRight(Reg(x), Reg(y)) => {
                let value = self.shift_source(x, y);
                self.set_with_flag(x, value >> 1, value & 0x01 == 1);
            }

            Instruction::ShiftLeft(Reg(x), Reg(y)) => {
                let value = self.shift_source(x, y);
                self.set_with_flag(x, value << 1, value & 0x80 != 0);
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
            }

            Instruction::JumpV0PlusAddr(Addr(addr)) => {
                self.program_counter = addr + self.registers[0] as u16;
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                self.registers[x as usize] = self.rng.gen::<u8>() & n;
            }

            Instruction::Draw(Reg(x), Reg(y), Const(height)) => {
                let x_coord = self.registers[x as usize];
                let y_coord = self.registers[y as usize];

                // Each sprite row is one byte, starting at I
                let sprite = self.memory.slice(self.i as usize, height as usize)?;
                let collision = self.display.draw_sprite(x_coord, y_coord, sprite);

                self.registers[FLAG] = collision as u8;
            }

            Instruction::IfKeyPressed(Reg(x)) => {
                if self.keypad.is_pressed(self.registers[x as usize]) {
                    self.program_counter += 2;
                }
            }

            Instruction::IfKeyNotPressed(Reg(x)) => {
                if !self.keypad.is_pressed(self.registers[x as usize]) {
                    self.program_counter += 2;
                }
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.registers[x as usize] = self.timers.delay;
            }

            // Park on this instruction until a key is down
            Instruction::WaitForKey(Reg(x)) => match self.keypad.lowest_pressed() {
                Some(key) => self.registers[x as usize] = key,
                None => {
                    self.program_counter = self.program_counter.wrapping_sub(2);
                    self.execution = Execution::WaitingForKey { register: x };
                }
            },

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.timers.delay = self.registers[x as usize];
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                self.timers.sound = self.registers[x as usize];
            }

            // I stays a 12-bit address
            Instruction::AddRegToI(Reg(x)) => {
                self.i = (self.i + self.registers[x as usize] as u16) & 0x0FFF;
            }

            Instruction::SetIToFontGlyph(Reg(x)) => {
                self.i = Memory::font_address(self.registers[x as usize]);
            }

            Instruction::StoreBcd(Reg(x)) => {
                let i = self.i as usize;
                let value = self.registers[x as usize];
                self.memory.write(i, value / 100)?;
                self.memory.write(i + 1, (value / 10) % 10)?;
                self.memory.write(i + 2, value % 10)?;
            }

            // Dump register values up to Vx, I is left as is
            Instruction::RegDump(Reg(x)) => {
                let i = self.i as usize;
                for reg_no in 0..=x as usize {
                    self.memory.write(i + reg_no, self.registers[reg_no])?;
                }
            }

            // Load register values up to Vx, I is left as is
            Instruction::RegLoad(Reg(x)) => {
                let i = self.i as usize;
                for reg_no in 0..=x as usize {
                    self.registers[reg_no] = self.memory.read(i + reg_no)?;
                }
            }

            Instruction::Unknown(opcode) => {
                log::debug!(
                    "Ignoring unknown opcode {} at {:#06x}",
                    opcode,
                    self.program_counter.wrapping_sub(2)
                );
            }
        };

        Ok(())
    }

    /// Write a result and then the flag, so VF holds the flag even when X is F.
    fn set_with_flag(&mut self, x: u8, value: u8, flag: bool) {
        self.registers[x as usize] = value;
        self.registers[FLAG] = flag as u8;
    }

    fn reset_flag_after_logic(&mut self) {
        if self.quirks.logic_resets_vf {
            self.registers[FLAG] = 0;
        }
    }

    fn shift_source(&self, x: u8, y: u8) -> u8 {
        if self.quirks.shift_reads_vy {
            self.registers[y as usize]
        } else {
            self.registers[x as usize]
        }
    }
}
