//! Numeric layers: pure compositions of tape operators.

use crate::autograd::{Tape, Val};

/// Matrix–vector multiply: one dot product per row of `w`, each accumulated
/// from a zero-valued leaf so the whole sum stays in the graph.
pub fn linear(tape: &mut Tape, x: &[Val], w: &[Vec<Val>]) -> Vec<Val> {
    w.iter()
        .map(|row| {
            let mut sum = tape.leaf(0.0);
            for (&wi, &xi) in row.iter().zip(x.iter()) {
                let term = tape.mul(wi, xi);
                sum = tape.add(sum, term);
            }
            sum
        })
        .collect()
}

/// Logits → probabilities in \[0,1] summing to 1. The max logit is subtracted
/// (as a constant leaf, computed on plain data) before exponentiating, for
/// numerical stability.
pub fn softmax(tape: &mut Tape, logits: &[Val]) -> Vec<Val> {
    let max_val = logits
        .iter()
        .map(|&l| tape.data(l))
        .fold(f64::NEG_INFINITY, f64::max);
    let max_v = tape.leaf(max_val);

    let exps: Vec<Val> = logits
        .iter()
        .map(|&l| {
            let shifted = tape.sub(l, max_v);
            tape.exp(shifted)
        })
        .collect();
    let mut total = tape.leaf(0.0);
    for &e in &exps {
        total = tape.add(total, e);
    }

    exps.iter().map(|&e| tape.div(e, total)).collect()
}

/// Root Mean Square Normalization: scale the vector so its RMS is 1. The
/// epsilon keeps the `pow(-0.5)` away from zero. No learned affine parameters.
pub fn rmsnorm(tape: &mut Tape, x: &[Val], eps: f64) -> Vec<Val> {
    let n = tape.leaf(x.len() as f64);
    let mut ms = tape.leaf(0.0);
    for &xi in x {
        let sq = tape.mul(xi, xi);
        ms = tape.add(ms, sq);
    }
    ms = tape.div(ms, n);

    let eps_v = tape.leaf(eps);
    let shifted = tape.add(ms, eps_v);
    let scale = tape.pow(shifted, -0.5);
    x.iter().map(|&xi| tape.mul(xi, scale)).collect()
}
