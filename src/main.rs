use std::process;

fn main() {
    if let Err(error) = ccheader::run() {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}
