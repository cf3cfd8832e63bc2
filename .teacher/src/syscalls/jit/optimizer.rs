/*!
 * Syscall Optimizer
 * Analyzes syscall patterns and selects optimizations
 */

use super::types::*;
use tracing::debug;

/// Optimizer that analyzes patterns and selects optimizations
pub struct SyscallOptimizer {
    // Optimizer state would go here
}

impl SyscallOptimizer {
    /// Create a new optimizer
    pub fn new() -> Self {
        Self {}
    }

    /// Analyze a syscall pattern and determine optimizations
    pub fn analyze(&self, pattern: &SyscallPattern) -> Result<Vec<Optimization>, JitError> {
        debug!(pattern = ?pattern, "Analyzing syscall pattern for optimization");

        let mut optimizations = Vec::new();

        match pattern {
            SyscallPattern::Simple(SimpleSyscallType::GetProcessList) => {
                // GetProcessList is read-only - apply optimizations
                optimizations.push(Optimization::FastPath);
                optimizations.push(Optimization::Inlining);
                optimizations.push(Optimization::DataCache);
            }

            SyscallPattern::Simple(SimpleSyscallType::GetProcessInfo) => {
                // GetProcessInfo is also read-only
                optimizations.push(Optimization::FastPath);
                optimizations.push(Optimization::Inlining);
            }

            SyscallPattern::Simple(SimpleSyscallType::KillProcess) => {
                // KillProcess needs minimal optimization
                optimizations.push(Optimization::FastPath);
            }

            SyscallPattern::FileOp(FileOpType::Read) => {
                // Read operations can benefit from several optimizations
                optimizations.push(Optimization::EliminateBoundsCheck);
                optimizations.push(Optimization::FastPath);
                optimizations.push(Optimization::Specialize);
            }

            SyscallPattern::FileOp(FileOpType::Write) => {
                // Write operations similar to read
                optimizations.push(Optimization::EliminateBoundsCheck);
                optimizations.push(Optimization::FastPath);
                optimizations.push(Optimization::Specialize);
            }

            SyscallPattern::IpcOp(_) => {
                // IPC operations can use caching
                optimizations.push(Optimization::DataCache);
                optimizations.push(Optimization::FastPath);
            }

            SyscallPattern::NetworkOp(_) => {
                // Network operations - conservative optimization
                optimizations.push(Optimization::FastPath);
            }

            SyscallPattern::MemoryOp(_) => {
                // Memory operations - be careful with optimizations
                optimizations.push(Optimization::FastPath);
                optimizations.push(Optimization::EliminateBoundsCheck);
            }

            _ => {
                // Unknown pattern - use minimal optimizations
                optimizations.push(Optimization::FastPath);
            }
        }

        debug!(
            pattern = ?pattern,
            optimizations = ?optimizations,
            "Selected optimizations"
        );

        Ok(optimizations)
    }

    /// Check if an optimization is safe for a pattern
    pub fn is_safe(&self, pattern: &SyscallPattern, optimization: &Optimization) -> bool {
        match (pattern, optimization) {
            // Skip permission checks only for read-only syscalls
            (SyscallPattern::Simple(SimpleSyscallType::GetProcessList), Optimization::SkipPermissionCheck) => true,
            (_, Optimization::SkipPermissionCheck) => false,

            // Eliminate bounds checks only for fixed-size operations
            (SyscallPattern::FileOp(_), Optimization::EliminateBoundsCheck) => true,
            (SyscallPattern::MemoryOp(_), Optimization::EliminateBoundsCheck) => false,

            // Most optimizations are generally safe
            _ => true,
        }
    }

    /// Estimate performance improvement from optimizations
    pub fn estimate_speedup(&self, optimizations: &[Optimization]) -> f64 {
        let mut speedup = 1.0;

        for opt in optimizations {
            speedup *= match opt {
                Optimization::Inlining => 1.2,
                Optimization::SkipPermissionCheck => 1.5,
                Optimization::FastPath => 2.0,
                Optimization::EliminateBoundsCheck => 1.3,
                Optimization::Specialize => 1.4,
                Optimization::DataCache => 3.0,
            };
        }

        speedup
    }
}

impl Default for SyscallOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_process_list() {
        let optimizer = SyscallOptimizer::new();
        let pattern = SyscallPattern::Simple(SimpleSyscallType::GetProcessList);

        let optimizations = optimizer.analyze(&pattern).unwrap();
        assert!(!optimizations.is_empty());
        assert!(optimizations.contains(&Optimization::FastPath));
    }

    #[test]
    fn test_is_safe() {
        let optimizer = SyscallOptimizer::new();
        let pattern = SyscallPattern::Simple(SimpleSyscallType::GetProcessList);

        assert!(optimizer.is_safe(&pattern, &Optimization::SkipPermissionCheck));
        assert!(optimizer.is_safe(&pattern, &Optimization::FastPath));
    }

    #[test]
    fn test_estimate_speedup() {
        let optimizer = SyscallOptimizer::new();
        let optimizations = vec![
            Optimization::FastPath,
            Optimization::Inlining,
        ];

        let speedup = optimizer.estimate_speedup(&optimizations);
        assert!(speedup > 1.0);
    }
}

