use std::process::ExitCode;

fn main() -> ExitCode {
    locrest::cli::main_exit_code()
}
