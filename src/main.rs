use std::process::ExitCode;

fn main() -> ExitCode {
    match linken_cli::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            linken_logger::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
