//! Adam optimizer: bias-corrected moments with linear learning-rate decay.

use crate::autograd::{Tape, Val};
use crate::config::Config;

/// Adam state: per-parameter first/second moment estimates, indexed
/// positionally against the stable parameter order, plus the step counter.
///
/// [`Adam::step`] is deterministic given the gradients, moments, step index,
/// and hyperparameters.
pub struct Adam {
    learning_rate: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    num_steps: usize,
    m: Vec<f64>,
    v: Vec<f64>,
    step: usize,
}

impl Adam {
    /// Creates an optimizer for `n_params` parameters with zeroed moments.
    #[must_use]
    pub fn new(cfg: &Config, n_params: usize) -> Self {
        Adam {
            learning_rate: cfg.learning_rate,
            beta1: cfg.beta1,
            beta2: cfg.beta2,
            epsilon: cfg.epsilon,
            num_steps: cfg.num_steps,
            m: vec![0.0; n_params],
            v: vec![0.0; n_params],
            step: 0,
        }
    }

    /// Steps already applied.
    #[must_use]
    pub fn steps_done(&self) -> usize {
        self.step
    }

    /// Applies one bias-corrected Adam update to every parameter, then zeroes
    /// its gradient.
    ///
    /// The learning rate decays linearly from the configured base rate to 0
    /// over `num_steps`; bias correction uses the 1-indexed step number.
    pub fn step(&mut self, tape: &mut Tape, params: &[Val]) {
        let lr_t = self.learning_rate * (1.0 - self.step as f64 / self.num_steps as f64);
        let t = self.step as i32 + 1;
        for (i, &p) in params.iter().enumerate() {
            let grad = tape.grad(p);
            self.m[i] = self.beta1 * self.m[i] + (1.0 - self.beta1) * grad;
            self.v[i] = self.beta2 * self.v[i] + (1.0 - self.beta2) * grad * grad;

            let m_hat = self.m[i] / (1.0 - self.beta1.powi(t));
            let v_hat = self.v[i] / (1.0 - self.beta2.powi(t));

            let new_data = tape.data(p) - lr_t * m_hat / (v_hat.sqrt() + self.epsilon);
            tape.set_data(p, new_data);
            tape.zero_grad(p);
        }
        self.step += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a tape with one parameter whose gradient is `grad` after backward.
    fn param_with_grad(data: f64, grad: f64) -> (Tape, Val) {
        let mut tape = Tape::new();
        let p = tape.leaf(data);
        let g = tape.leaf(grad);
        let loss = tape.mul(p, g);
        tape.backward(loss);
        (tape, p)
    }

    #[test]
    fn first_step_matches_bias_corrected_formula() {
        let cfg = Config::default();
        let (mut tape, p) = param_with_grad(1.0, 0.5);
        let mut adam = Adam::new(&cfg, 1);
        adam.step(&mut tape, &[p]);

        // at t=1: m_hat = g, v_hat = g^2, lr_t = lr (step 0 of num_steps)
        let g = 0.5_f64;
        let expected = 1.0 - cfg.learning_rate * g / (g.abs() + cfg.epsilon);
        assert!((tape.data(p) - expected).abs() < 1e-12);
        assert_eq!(tape.grad(p), 0.0, "grad reset after the update");
        assert_eq!(adam.steps_done(), 1);
    }

    #[test]
    fn update_is_deterministic() {
        let cfg = Config::default();
        let run = || {
            let (mut tape, p) = param_with_grad(0.3, -0.2);
            let mut adam = Adam::new(&cfg, 1);
            adam.step(&mut tape, &[p]);
            tape.data(p)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn learning_rate_decays_to_zero_on_final_step() {
        let cfg = Config {
            num_steps: 2,
            ..Config::default()
        };
        let (mut tape, p) = param_with_grad(1.0, 1.0);
        let mut adam = Adam::new(&cfg, 1);
        adam.step(&mut tape, &[p]);
        let after_first = tape.data(p);
        assert!(after_first < 1.0);

        // second (final) step has lr_t = lr * (1 - 1/2); rebuild the gradient
        let g = tape.leaf(1.0);
        let loss = tape.mul(p, g);
        tape.backward(loss);
        adam.step(&mut tape, &[p]);
        let second_delta = (after_first - tape.data(p)).abs();
        let first_delta = (1.0 - after_first).abs();
        assert!(second_delta < first_delta, "decayed step is smaller");
    }
}
