fn main() {
    if let Err(e) = habcat::adapters::run() {
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}
