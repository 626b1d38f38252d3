fn main() {
    if let Err(e) = script_explainer::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
