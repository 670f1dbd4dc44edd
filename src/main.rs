//! chargpt binary: train a character-level GPT on the corpus, then sample.

use chargpt::config;

fn main() -> Result<(), chargpt::Error> {
    tracing_subscriber::fmt::init();

    let cfg = config::from_env()?;
    chargpt::run(&cfg)
}
