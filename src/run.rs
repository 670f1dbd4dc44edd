//! End-to-end pipeline: corpus → tokenizer → model → training → sampling.

use rand::{prelude::*, rngs::StdRng};

use crate::autograd::Tape;
use crate::config::Config;
use crate::data::{DataLoader, FetchLoader};
use crate::model::ModelParams;
use crate::tokenizer::{CharTokenizer, Tokenizer};
use crate::{sample, train, Error};

/// Marker symbol delimiting documents; doubles as begin and end of sequence.
const BOS_SYMBOL: &str = "<BOS>";

/// Runs the full pipeline: fetch/load the corpus, train from scratch, then
/// generate samples. Prints one loss line per logging interval and one line
/// per sample to stdout.
///
/// # Errors
///
/// Fatal and unrecovered: invalid configuration, corpus fetch/load failure.
pub fn run(cfg: &Config) -> Result<(), Error> {
    cfg.validate()?;
    let mut rng = StdRng::seed_from_u64(cfg.seed);

    let data = FetchLoader::new(&cfg.input_path, cfg.corpus_url.clone()).load()?;
    let mut docs = data.lines();
    docs.shuffle(&mut rng);
    tracing::info!("num docs: {}", docs.len());

    let corpus: String = docs.concat();
    let tokenizer = CharTokenizer::from_corpus(&corpus, BOS_SYMBOL);
    tracing::info!("vocab size: {}", tokenizer.vocab_size());

    let mut tape = Tape::new();
    let model = ModelParams::init(&mut tape, cfg, tokenizer.vocab_size(), &mut rng);
    tracing::info!("num params: {}", model.params().len());

    train::train(&mut tape, &model, &tokenizer, &docs, cfg)?;

    let base = tape.mark();
    for sample_idx in 0..cfg.sample_size {
        let text = sample::generate(
            &mut tape,
            &model,
            &tokenizer,
            cfg.temperature,
            cfg.block_size,
            &mut rng,
        )?;
        println!("sample {:2}: {}", sample_idx + 1, text);
        tape.release(base);
    }
    Ok(())
}
