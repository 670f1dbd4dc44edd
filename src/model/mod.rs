//! Transformer model: parameters, KV cache, numeric layers, forward pass.
//!
//! The forward pass is a stateless function of (token, position, cache): it
//! processes one token at a time and appends that position's key/value vectors
//! to the per-layer [`KvCache`]. Because the cache only ever holds positions
//! at or before the current one, causal masking is implicit — no mask tensor
//! exists anywhere.

mod layers;
mod params;

pub use layers::{linear, rmsnorm, softmax};
pub use params::{LayerParams, Matrix, ModelParams};

use crate::autograd::{Tape, Val};

/// Per-layer growing key/value cache.
///
/// One entry is appended per position processed for the current sequence; a
/// fresh cache is built at the start of every sequence. Cached entries are
/// shared by every later attention step, so their tape nodes accumulate
/// gradient from many parents during backward.
pub struct KvCache {
    keys: Vec<Vec<Vec<Val>>>,
    values: Vec<Vec<Vec<Val>>>,
}

impl KvCache {
    /// Creates an empty cache for `n_layer` layers.
    #[must_use]
    pub fn new(n_layer: usize) -> Self {
        KvCache {
            keys: vec![Vec::new(); n_layer],
            values: vec![Vec::new(); n_layer],
        }
    }

    /// Number of positions cached for `layer`.
    #[must_use]
    pub fn len(&self, layer: usize) -> usize {
        self.keys[layer].len()
    }

    /// Returns `true` if `layer` has no cached positions yet.
    #[must_use]
    pub fn is_empty(&self, layer: usize) -> bool {
        self.keys[layer].is_empty()
    }

    /// Appends one position's key and value vectors to `layer`.
    pub fn push(&mut self, layer: usize, k: Vec<Val>, v: Vec<Val>) {
        self.keys[layer].push(k);
        self.values[layer].push(v);
    }

    fn key(&self, layer: usize, t: usize, dim: usize) -> Val {
        self.keys[layer][t][dim]
    }

    fn value(&self, layer: usize, t: usize, dim: usize) -> Val {
        self.values[layer][t][dim]
    }
}

impl ModelParams {
    /// GPT forward: one token at `pos_id`, with KV cache. Returns logits over
    /// the next token.
    ///
    /// Embeddings → RMSNorm → for each layer: attention (q/k/v projections,
    /// cache append, scaled dot-product over all cached positions, softmax,
    /// weighted value sum, output projection, residual) → MLP (widening
    /// linear, ReLU, narrowing linear, residual) → lm_head.
    pub fn forward(
        &self,
        tape: &mut Tape,
        token_id: usize,
        pos_id: usize,
        cache: &mut KvCache,
    ) -> Vec<Val> {
        // token + position embedding: what the token is + where it sits
        let mut x: Vec<Val> = (0..self.n_embed)
            .map(|j| tape.add(self.wte[token_id][j], self.wpe[pos_id][j]))
            .collect();
        x = rmsnorm(tape, &x, self.rmsnorm_eps);

        for (li, layer) in self.layers.iter().enumerate() {
            // attention block
            let x_residual = x.clone();
            x = rmsnorm(tape, &x, self.rmsnorm_eps);

            let q = linear(tape, &x, &layer.attn_wq);
            let k = linear(tape, &x, &layer.attn_wk);
            let v = linear(tape, &x, &layer.attn_wv);
            cache.push(li, k, v);

            let scale = tape.leaf((self.head_dim as f64).sqrt());
            let mut x_attn = Vec::with_capacity(self.n_embed);
            for h in 0..self.n_head {
                let hs = h * self.head_dim;

                let mut attn_logits = Vec::with_capacity(cache.len(li));
                for t in 0..cache.len(li) {
                    let mut score = tape.leaf(0.0);
                    for j in 0..self.head_dim {
                        let kj = cache.key(li, t, hs + j);
                        let term = tape.mul(q[hs + j], kj);
                        score = tape.add(score, term);
                    }
                    score = tape.div(score, scale);
                    attn_logits.push(score);
                }

                let attn_weights = softmax(tape, &attn_logits);
                for j in 0..self.head_dim {
                    let mut head_out = tape.leaf(0.0);
                    for (t, &w_t) in attn_weights.iter().enumerate() {
                        let vj = cache.value(li, t, hs + j);
                        let term = tape.mul(w_t, vj);
                        head_out = tape.add(head_out, term);
                    }
                    x_attn.push(head_out);
                }
            }

            x = linear(tape, &x_attn, &layer.attn_wo);
            x = x
                .iter()
                .zip(x_residual.iter())
                .map(|(&a, &b)| tape.add(a, b))
                .collect();

            // MLP block
            let x_residual = x.clone();
            x = rmsnorm(tape, &x, self.rmsnorm_eps);
            x = linear(tape, &x, &layer.mlp_fc1);
            x = x.iter().map(|&xi| tape.relu(xi)).collect();
            x = linear(tape, &x, &layer.mlp_fc2);
            x = x
                .iter()
                .zip(x_residual.iter())
                .map(|(&a, &b)| tape.add(a, b))
                .collect();
        }

        linear(tape, &x, &self.lm_head)
    }
}
