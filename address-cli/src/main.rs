//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = address_cli::run() {
        eprintln!("address: {err}");
        std::process::exit(1);
    }
}
