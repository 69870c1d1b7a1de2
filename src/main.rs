mod demos;

use std::process::ExitCode;

fn main() -> ExitCode {
    rutest::cli::main(demos::sources())
}
