//! spritemaker - Command-line tool for converting and exporting 1-bit sprites

use std::process::ExitCode;

use spritemaker::cli;

fn main() -> ExitCode {
    cli::run()
}
