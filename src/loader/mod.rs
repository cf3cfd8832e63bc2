/*!
 * Program Loader
 * Program images, the text format, and the name-indexed program library
 */

use crate::core::errors::LoadError;
use crate::core::limits::MAIN_MEMORY_SECTION_SIZE;
use crate::hardware::memory::Word;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Name of the operating-system code image; boot fails without it
pub const OS_IMAGE_NAME: &str = "OperatingSystemCode";

/// Name of the idle daemon; boot fails without it
pub const IDLE_PROGRAM_NAME: &str = "SystemIdleProcess";

/// Offset inside the idle program of its shutdown entry (an End trap).
/// The kernel points the idle process here once the user workload is gone.
pub const IDLE_SHUTDOWN_OFFSET: usize = 2;

/// A loadable program: declared memory size, declared priority, and text.
///
/// Text format, one item per line: `.size N` and `.priority P` directives
/// (any order, before the instructions), then instruction words. Blank
/// lines and `#` comments are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramImage {
    pub declared_size: i64,
    pub priority: i64,
    pub text: Vec<Word>,
}

impl ProgramImage {
    /// Build an image directly (test fixtures and built-in daemons)
    #[must_use]
    pub fn new(declared_size: i64, priority: i64, text: Vec<Word>) -> Self {
        Self {
            declared_size,
            priority,
            text,
        }
    }

    pub fn parse(name: &str, source: &str) -> Result<Self, LoadError> {
        let malformed = |line: usize, reason: String| LoadError::Malformed {
            name: name.to_string(),
            line,
            reason,
        };

        let mut declared_size = None;
        let mut priority = None;
        let mut text = Vec::new();

        for (index, raw) in source.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if let Some(value) = line.strip_prefix(".size") {
                declared_size = Some(
                    value
                        .trim()
                        .parse::<i64>()
                        .map_err(|e| malformed(index + 1, e.to_string()))?,
                );
            } else if let Some(value) = line.strip_prefix(".priority") {
                priority = Some(
                    value
                        .trim()
                        .parse::<i64>()
                        .map_err(|e| malformed(index + 1, e.to_string()))?,
                );
            } else {
                text.push(
                    line.parse::<Word>()
                        .map_err(|reason| malformed(index + 1, reason))?,
                );
            }
        }

        let declared_size =
            declared_size.ok_or_else(|| malformed(0, "missing .size directive".to_string()))?;
        let priority =
            priority.ok_or_else(|| malformed(0, "missing .priority directive".to_string()))?;
        Ok(Self {
            declared_size,
            priority,
            text,
        })
    }
}

/// Resolves program names to images for the long-term scheduler
#[derive(Debug, Default)]
pub struct ProgramLibrary {
    programs: HashMap<String, ProgramImage>,
}

impl ProgramLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Library pre-populated with the OS image and the idle daemon
    #[must_use]
    pub fn with_system_programs() -> Self {
        let mut library = Self::new();
        library.insert(
            OS_IMAGE_NAME,
            ProgramImage::new(MAIN_MEMORY_SECTION_SIZE as i64, 0, vec![Word::Halt]),
        );
        // Busy loop; slot IDLE_SHUTDOWN_OFFSET holds the End trap the
        // kernel redirects the idle process to at shutdown time.
        library.insert(
            IDLE_PROGRAM_NAME,
            ProgramImage::new(4, 0, vec![Word::Nop, Word::Jump(0), Word::Trap(3)]),
        );
        library
    }

    pub fn insert(&mut self, name: impl Into<String>, image: ProgramImage) {
        self.programs.insert(name.into(), image);
    }

    pub fn open(&self, name: &str) -> Result<&ProgramImage, LoadError> {
        self.programs
            .get(name)
            .ok_or_else(|| LoadError::NotFound(name.to_string()))
    }

    /// Load every parseable program file in a directory; the file stem is
    /// the program name. Unreadable files are skipped with a diagnostic.
    /// Returns the number of programs added.
    pub fn load_dir(&mut self, dir: &Path) -> std::io::Result<usize> {
        let mut added = 0;
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(String::from) else {
                continue;
            };
            let source = fs::read_to_string(&path)?;
            match ProgramImage::parse(&name, &source) {
                Ok(image) => {
                    self.insert(name, image);
                    added += 1;
                }
                Err(e) => warn!(program = %name, error = %e, "skipping unparseable program"),
            }
        }
        Ok(added)
    }
}
