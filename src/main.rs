//! Binary entrypoint for the `area-status` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    area_status::logging::init();

    let result = {
        let mut out = std::io::stdout().lock();
        let mut err = std::io::stderr().lock();
        area_status::run(std::env::args_os(), &mut out, &mut err)
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
