use crate::emulator::error::{Error, Result};

/// How many nested calls fit on the stack.
pub const STACK_CAPACITY: usize = 16;

/// Return addresses for subroutine calls.
#[derive(Debug, Clone)]
pub struct CallStack {
    frames: [u16; STACK_CAPACITY],
    depth: usize,
}

impl CallStack {
    pub fn new() -> CallStack {
        CallStack {
            frames: [0; STACK_CAPACITY],
            depth: 0,
        }
    }

    pub fn push(&mut self, address: u16) -> Result<()> {
        if self.depth == STACK_CAPACITY {
            return Err(Error::StackOverflow {
                capacity: STACK_CAPACITY,
            });
        }
        self.frames[self.depth] = address;
        self.depth += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        if self.depth == 0 {
            return Err(Error::StackUnderflow);
        }
        self.depth -= 1;
        Ok(self.frames[self.depth])
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn pops_in_reverse_order() {
        let mut stack = CallStack::new();
        stack.push(0x202).unwrap();
        stack.push(0x304).unwrap();
        assert_eq!(2, stack.depth());
        assert_eq!(0x304, stack.pop().unwrap());
        assert_eq!(0x202, stack.pop().unwrap());
        assert!(stack.is_empty());
    }

    #[test]
    fn overflow_is_an_error() {
        let mut stack = CallStack::new();
        for i in 0..STACK_CAPACITY {
            stack.push(i as u16).unwrap();
        }
        assert!(matches!(
            stack.push(0),
            Err(Error::StackOverflow { capacity: STACK_CAPACITY })
        ));
        assert_eq!(STACK_CAPACITY, stack.depth());
    }

    #[test]
    fn underflow_is_an_error() {
        let mut stack = CallStack::new();
        assert!(matches!(stack.pop(), Err(Error::StackUnderflow)));
    }
}
