/*!
 * Memory Management Unit
 * Base+limit window translation for the executing process
 */

use crate::core::types::{Address, Size};

/// Base+limit MMU. Unprivileged addresses are window-relative and fault
/// outside the limit; privileged mode uses real addresses.
#[derive(Debug, Default)]
pub struct Mmu {
    base: Address,
    limit: Size,
}

/// Address outside the current window (or outside physical memory)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryFault {
    pub address: Address,
}

impl Mmu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_base(&mut self, base: Address) {
        self.base = base;
    }

    pub fn set_limit(&mut self, limit: Size) {
        self.limit = limit;
    }

    #[must_use]
    pub fn base(&self) -> Address {
        self.base
    }

    #[must_use]
    pub fn limit(&self) -> Size {
        self.limit
    }

    /// Translate a program address to a physical one
    pub fn translate(
        &self,
        address: Address,
        privileged: bool,
        memory_size: Size,
    ) -> Result<Address, MemoryFault> {
        if privileged {
            if address < memory_size {
                return Ok(address);
            }
            return Err(MemoryFault { address });
        }
        if address < self.limit {
            Ok(self.base + address)
        } else {
            Err(MemoryFault { address })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_addresses_are_window_relative() {
        let mut mmu = Mmu::new();
        mmu.set_base(60);
        mmu.set_limit(20);

        assert_eq!(mmu.translate(0, false, 300), Ok(60));
        assert_eq!(mmu.translate(19, false, 300), Ok(79));
        assert_eq!(
            mmu.translate(20, false, 300),
            Err(MemoryFault { address: 20 })
        );
    }

    #[test]
    fn test_privileged_addresses_are_real() {
        let mut mmu = Mmu::new();
        mmu.set_base(60);
        mmu.set_limit(20);

        assert_eq!(mmu.translate(240, true, 300), Ok(240));
        assert_eq!(
            mmu.translate(300, true, 300),
            Err(MemoryFault { address: 300 })
        );
    }
}
