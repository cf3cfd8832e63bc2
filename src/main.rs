/*!
 * OS Simulator - Main Entry Point
 *
 * Boots the kernel with the programs named on the command line and runs the
 * simulated machine until power-off.
 */

use std::error::Error;
use std::path::Path;
use tracing::{error, info};

use sim_os_kernel::hardware::{Clock, Hardware};
use sim_os_kernel::{init_tracing, Machine, ProgramDescriptor, ProgramLibrary};

const DEFAULT_MAX_CYCLES: u64 = 100_000;

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let library = build_library()?;
    let program_list: Vec<ProgramDescriptor> = std::env::args()
        .skip(1)
        .enumerate()
        .map(|(order, name)| ProgramDescriptor::user(name, order))
        .collect();

    let mut hw = Hardware::new();
    if let Ok(interval) = std::env::var("SIM_CLOCK_INTERVAL") {
        hw.clock = Clock::with_interval(interval.parse()?);
    }

    info!(programs = program_list.len(), "powering on");
    let mut machine = match Machine::power_on_with_hardware(&program_list, &library, hw) {
        Ok(machine) => machine,
        Err(e) => {
            error!(error = %e, "FATAL: boot failed");
            return Err(e.into());
        }
    };

    let max_cycles = match std::env::var("SIM_MAX_CYCLES") {
        Ok(value) => value.parse()?,
        Err(_) => DEFAULT_MAX_CYCLES,
    };
    let cycles = machine.run(max_cycles);
    if !machine.powered_off() {
        error!(cycles, "cycle budget exhausted before power-off");
    }
    Ok(())
}

/// System programs plus everything under `SIM_PROGRAM_DIR`, if set
fn build_library() -> Result<ProgramLibrary, Box<dyn Error>> {
    let mut library = ProgramLibrary::with_system_programs();
    if let Ok(dir) = std::env::var("SIM_PROGRAM_DIR") {
        let added = library.load_dir(Path::new(&dir))?;
        info!(dir = %dir, added, "program directory loaded");
    }
    Ok(library)
}
