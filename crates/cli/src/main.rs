use std::process::ExitCode;

fn main() -> ExitCode {
    policyscope_cli::run()
}
