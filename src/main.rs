fn main() {
    if let Err(err) = vlprep::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
