use std::process::ExitCode;

use ortho_config::OrthoConfig;
use reading_time::cli::{ReadtimeArgs, init_logging, run};

fn main() -> ExitCode {
    init_logging();
    let args = match ReadtimeArgs::load() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("readtime: {e}");
            return ExitCode::from(2);
        }
    };
    let stdout = std::io::stdout();
    match run(&args, &mut std::io::stdin().lock(), &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "analysis failed");
            eprintln!("readtime: {e}");
            ExitCode::FAILURE
        }
    }
}
