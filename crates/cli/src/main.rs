use std::process::ExitCode;

fn main() -> ExitCode {
    shortlist_cli::run()
}
