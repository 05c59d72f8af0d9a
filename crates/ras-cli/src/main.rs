use ras_cli::logging::{self, LogFormat};
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = ras_cli::cli().get_matches();

    let format = if matches.get_flag("log-json") {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    logging::init(matches.get_flag("verbose"), format);

    let mut stdout = std::io::stdout().lock();
    match ras_cli::execute(&matches, &mut stdout) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
