/*!
 * Simulated Main Memory
 * A flat array of instruction words, partitioned into per-process windows
 */

use crate::core::types::{Address, Size};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One memory word of the simulated machine.
///
/// The instruction set is deliberately tiny: just enough to drive every
/// trap path of the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Word {
    /// Uninitialized memory; fetching it raises an exception
    Empty,
    Nop,
    /// accumulator = n
    Set(i64),
    /// accumulator += n
    Add(i64),
    /// Window-relative jump
    Jump(Address),
    /// A register = n, raise a system-call trap
    Trap(i64),
    /// Privileged power-off; an exception in user mode
    Halt,
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Word::Empty => write!(f, "<empty>"),
            Word::Nop => write!(f, "nop"),
            Word::Set(n) => write!(f, "set {n}"),
            Word::Add(n) => write!(f, "add {n}"),
            Word::Jump(a) => write!(f, "jump {a}"),
            Word::Trap(n) => write!(f, "trap {n}"),
            Word::Halt => write!(f, "halt"),
        }
    }
}

impl FromStr for Word {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let mnemonic = tokens.next().ok_or("empty instruction")?;
        let operand = tokens.next();
        if tokens.next().is_some() {
            return Err(format!("trailing tokens after {mnemonic}"));
        }

        let parse_i64 = |value: Option<&str>| -> Result<i64, String> {
            value
                .ok_or_else(|| format!("{mnemonic} needs an operand"))?
                .parse::<i64>()
                .map_err(|e| e.to_string())
        };

        match mnemonic {
            "nop" => Ok(Word::Nop),
            "halt" => Ok(Word::Halt),
            "set" => Ok(Word::Set(parse_i64(operand)?)),
            "add" => Ok(Word::Add(parse_i64(operand)?)),
            "trap" => Ok(Word::Trap(parse_i64(operand)?)),
            "jump" => {
                let target = parse_i64(operand)?;
                usize::try_from(target)
                    .map(Word::Jump)
                    .map_err(|_| "jump target must be non-negative".to_string())
            }
            other => Err(format!("unknown instruction {other}")),
        }
    }
}

/// Simulated main memory
#[derive(Debug)]
pub struct MainMemory {
    cells: Vec<Word>,
}

impl MainMemory {
    #[must_use]
    pub fn with_size(size: Size) -> Self {
        Self {
            cells: vec![Word::Empty; size],
        }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.cells.len()
    }

    #[must_use]
    pub fn read(&self, address: Address) -> Option<Word> {
        self.cells.get(address).copied()
    }

    /// Copy a program's instruction text into memory starting at `base`
    pub fn load(&mut self, base: Address, text: &[Word]) {
        self.cells[base..base + text.len()].copy_from_slice(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_parsing() {
        assert_eq!("nop".parse(), Ok(Word::Nop));
        assert_eq!("set -3".parse(), Ok(Word::Set(-3)));
        assert_eq!("trap 7".parse(), Ok(Word::Trap(7)));
        assert_eq!("jump 0".parse(), Ok(Word::Jump(0)));
        assert!("jump -1".parse::<Word>().is_err());
        assert!("bogus".parse::<Word>().is_err());
        assert!("nop 1 2".parse::<Word>().is_err());
    }

    #[test]
    fn test_load_and_read() {
        let mut memory = MainMemory::with_size(8);
        memory.load(2, &[Word::Set(1), Word::Halt]);

        assert_eq!(memory.read(2), Some(Word::Set(1)));
        assert_eq!(memory.read(3), Some(Word::Halt));
        assert_eq!(memory.read(0), Some(Word::Empty));
        assert_eq!(memory.read(99), None);
    }
}
