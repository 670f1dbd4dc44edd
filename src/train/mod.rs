//! Training loop: per-document loss construction, backward, Adam update.
//!
//! Each step builds a fresh forward graph for one document, position by
//! position, accumulates a mean negative-log-likelihood loss, backpropagates
//! once, and applies one Adam update. Everything built on the tape during the
//! step is released afterwards; only parameters and optimizer state persist.

use crate::autograd::{Tape, Val};
use crate::config::Config;
use crate::model::{softmax, KvCache, ModelParams};
use crate::optim::Adam;
use crate::tokenizer::{Tokenizer, TokenizerError};

/// One training step for a pre-tokenized document (BOS-delimited).
///
/// Processes at most `block_size` positions, builds the mean NLL loss, runs
/// backward, applies the Adam update, and returns the loss value. The caller
/// is responsible for releasing the tape back to the parameter watermark.
pub fn train_step(
    tape: &mut Tape,
    model: &ModelParams,
    params: &[Val],
    adam: &mut Adam,
    tokens: &[usize],
    block_size: usize,
) -> f64 {
    let n = (tokens.len() - 1).min(block_size);

    let mut cache = KvCache::new(model.n_layer());
    let mut losses = Vec::with_capacity(n);
    for pos_id in 0..n {
        let token_id = tokens[pos_id];
        let target_id = tokens[pos_id + 1];

        let logits = model.forward(tape, token_id, pos_id, &mut cache);
        let probs = softmax(tape, &logits);
        let lp = tape.log(probs[target_id]);
        losses.push(tape.neg(lp));
    }

    let mut loss = tape.leaf(0.0);
    for &l in &losses {
        loss = tape.add(loss, l);
    }
    let count = tape.leaf(n as f64);
    let loss = tape.div(loss, count);

    tape.backward(loss);
    adam.step(tape, params);
    tape.data(loss)
}

/// Full training loop: cycles through `docs` for `num_steps` steps, printing
/// one `step … | loss …` line per logging interval. Returns the per-step loss
/// history.
///
/// # Errors
///
/// Returns [`TokenizerError`] if a document contains a symbol outside the
/// tokenizer's vocabulary (cannot happen when the tokenizer was built from
/// the same corpus).
pub fn train<T: Tokenizer>(
    tape: &mut Tape,
    model: &ModelParams,
    tokenizer: &T,
    docs: &[&str],
    cfg: &Config,
) -> Result<Vec<f64>, TokenizerError> {
    let params = model.params();
    let mut adam = Adam::new(cfg, params.len());
    let base = tape.mark();

    let mut losses = Vec::with_capacity(cfg.num_steps);
    for step in 0..cfg.num_steps {
        let doc = docs[step % docs.len()];
        let mut tokens = vec![tokenizer.bos_id()];
        tokens.extend(tokenizer.encode(doc)?);
        tokens.push(tokenizer.bos_id());

        let loss = train_step(tape, model, &params, &mut adam, &tokens, cfg.block_size);
        tape.release(base);
        losses.push(loss);

        if (step + 1) % cfg.loss_log_every == 0 || step == 0 {
            println!("step {:4} / {:4} | loss {:.4}", step + 1, cfg.num_steps, loss);
        }
    }
    Ok(losses)
}
