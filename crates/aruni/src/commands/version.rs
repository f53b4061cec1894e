pub fn run() -> anyhow::Result<()> {
    println!("aruni {}", env!("CARGO_PKG_VERSION"));
    println!("Spaced-repetition tracker for learning with an AI tutor");
    Ok(())
}
