//! Uiforge - build engine UI layouts from property forms and export them as scripts

use std::process::ExitCode;

use uiforge::cli;

fn main() -> ExitCode {
    cli::run()
}
