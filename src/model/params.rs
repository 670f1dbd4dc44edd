//! Model parameters: typed matrices with Gaussian init and a stable flat view.

use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::autograd::{Tape, Val};
use crate::config::Config;

/// A weight matrix: rows = output features, columns = input features (or
/// vocabulary/position index by embedding dimension for the embedding tables).
pub type Matrix = Vec<Vec<Val>>;

/// MLP hidden size = MLP_RATIO * n_embed (standard 4x in transformers)
const MLP_RATIO: usize = 4;
/// Weight init: Gaussian mean
const INIT_MEAN: f64 = 0.0;

/// Per-layer weights: attention projections and the MLP pair.
pub struct LayerParams {
    /// Query projection, `[n_embed][n_embed]`.
    pub attn_wq: Matrix,
    /// Key projection.
    pub attn_wk: Matrix,
    /// Value projection.
    pub attn_wv: Matrix,
    /// Attention output projection.
    pub attn_wo: Matrix,
    /// MLP widening projection, `[4*n_embed][n_embed]`.
    pub mlp_fc1: Matrix,
    /// MLP narrowing projection, `[n_embed][4*n_embed]`.
    pub mlp_fc2: Matrix,
}

/// All trainable parameters plus the model dimensions.
///
/// Every entry is a [`Val`] on the shared tape so gradients flow through
/// training. [`ModelParams::params`] gives the stable flattened view the
/// optimizer indexes its moment buffers against.
pub struct ModelParams {
    /// Token embedding, `[vocab_size][n_embed]`.
    pub wte: Matrix,
    /// Position embedding, `[block_size][n_embed]`.
    pub wpe: Matrix,
    /// Language-model head, `[vocab_size][n_embed]`.
    pub lm_head: Matrix,
    /// Transformer blocks.
    pub layers: Vec<LayerParams>,
    pub(super) n_embed: usize,
    pub(super) n_head: usize,
    pub(super) head_dim: usize,
    pub(super) rmsnorm_eps: f64,
}

impl ModelParams {
    /// Allocates all weights on `tape` with Gaussian(0, init_std) init drawn
    /// from the explicitly passed `rng`.
    pub fn init(tape: &mut Tape, cfg: &Config, vocab_size: usize, rng: &mut StdRng) -> Self {
        let normal = Normal::new(INIT_MEAN, cfg.init_std).unwrap();
        let mut matrix = |tape: &mut Tape, nout: usize, nin: usize| -> Matrix {
            (0..nout)
                .map(|_| {
                    (0..nin)
                        .map(|_| tape.leaf(normal.sample(rng)))
                        .collect()
                })
                .collect()
        };

        let wte = matrix(tape, vocab_size, cfg.n_embed);
        let wpe = matrix(tape, cfg.block_size, cfg.n_embed);
        let lm_head = matrix(tape, vocab_size, cfg.n_embed);
        let layers = (0..cfg.n_layer)
            .map(|_| LayerParams {
                attn_wq: matrix(tape, cfg.n_embed, cfg.n_embed),
                attn_wk: matrix(tape, cfg.n_embed, cfg.n_embed),
                attn_wv: matrix(tape, cfg.n_embed, cfg.n_embed),
                attn_wo: matrix(tape, cfg.n_embed, cfg.n_embed),
                mlp_fc1: matrix(tape, MLP_RATIO * cfg.n_embed, cfg.n_embed),
                mlp_fc2: matrix(tape, cfg.n_embed, MLP_RATIO * cfg.n_embed),
            })
            .collect();

        ModelParams {
            wte,
            wpe,
            lm_head,
            layers,
            n_embed: cfg.n_embed,
            n_head: cfg.n_head,
            head_dim: cfg.head_dim(),
            rmsnorm_eps: cfg.rmsnorm_eps,
        }
    }

    /// Number of transformer layers.
    #[must_use]
    pub fn n_layer(&self) -> usize {
        self.layers.len()
    }

    /// Returns all parameters as a flat list in a stable order; the optimizer
    /// moment buffers are indexed positionally against it.
    #[must_use]
    pub fn params(&self) -> Vec<Val> {
        let mut params = Vec::new();
        for row in &self.wte {
            params.extend(row.iter().copied());
        }
        for row in &self.wpe {
            params.extend(row.iter().copied());
        }
        for row in &self.lm_head {
            params.extend(row.iter().copied());
        }
        for layer in &self.layers {
            for m in [
                &layer.attn_wq,
                &layer.attn_wk,
                &layer.attn_wv,
                &layer.attn_wo,
                &layer.mlp_fc1,
                &layer.mlp_fc2,
            ] {
                for row in m {
                    params.extend(row.iter().copied());
                }
            }
        }
        params
    }
}
