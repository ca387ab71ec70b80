use std::process::ExitCode;

fn main() -> ExitCode {
    casetips_lib::init_tracing();

    match casetips_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "casetips stopped");
            ExitCode::FAILURE
        }
    }
}
