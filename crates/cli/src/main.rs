fn main() -> Result<(), Box<dyn std::error::Error>> {
    jlayout_cli::run()
}
