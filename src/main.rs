use std::process::ExitCode;

fn main() -> ExitCode {
    match dirqueue::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "dirqueue failed");
            ExitCode::FAILURE
        }
    }
}
