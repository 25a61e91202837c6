use quantctl::core::error::QuantError;

fn main() {
    if let Err(e) = quantctl::run() {
        if let QuantError::Usage(usage) = &e {
            usage.exit();
        }
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
