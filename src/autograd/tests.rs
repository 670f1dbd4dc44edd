//! Tests for the tape autograd engine.
//!
//! Covers backward-pass correctness for every operator, gradient accumulation
//! through shared nodes, finite-difference checks for composed expressions,
//! and the mark/release lifecycle.

use crate::autograd::{Tape, Val};

/// Checks the backward pass against a central finite-difference estimate for
/// every leaf of the expression built by `f`.
fn finite_diff_check<F>(inputs: &[f64], f: F)
where
    F: Fn(&mut Tape, &[Val]) -> Val,
{
    let mut tape = Tape::new();
    let leaves: Vec<Val> = inputs.iter().map(|&x| tape.leaf(x)).collect();
    let out = f(&mut tape, &leaves);
    tape.backward(out);
    let analytic: Vec<f64> = leaves.iter().map(|&l| tape.grad(l)).collect();

    let eval = |xs: &[f64]| {
        let mut t = Tape::new();
        let ls: Vec<Val> = xs.iter().map(|&x| t.leaf(x)).collect();
        let o = f(&mut t, &ls);
        t.data(o)
    };

    let h = 1e-6;
    for i in 0..inputs.len() {
        let mut plus = inputs.to_vec();
        plus[i] += h;
        let mut minus = inputs.to_vec();
        minus[i] -= h;
        let numeric = (eval(&plus) - eval(&minus)) / (2.0 * h);
        assert!(
            (analytic[i] - numeric).abs() < 1e-4,
            "leaf {i}: analytic {} vs numeric {}",
            analytic[i],
            numeric
        );
    }
}

#[test]
fn add_backward() {
    let mut tape = Tape::new();
    let a = tape.leaf(2.0);
    let b = tape.leaf(3.0);
    let c = tape.add(a, b);
    assert_eq!(tape.data(c), 5.0);
    tape.backward(c);
    assert_eq!(tape.grad(a), 1.0);
    assert_eq!(tape.grad(b), 1.0);
}

#[test]
fn mul_backward() {
    let mut tape = Tape::new();
    let a = tape.leaf(2.0);
    let b = tape.leaf(3.0);
    let c = tape.mul(a, b);
    assert_eq!(tape.data(c), 6.0);
    tape.backward(c);
    assert_eq!(tape.grad(a), 3.0);
    assert_eq!(tape.grad(b), 2.0);
}

#[test]
fn pow_backward() {
    let mut tape = Tape::new();
    let a = tape.leaf(2.0);
    let b = tape.pow(a, 3.0);
    assert!((tape.data(b) - 8.0).abs() < 1e-10);
    tape.backward(b);
    // d/dx x^3 = 3x^2 = 12 at x=2
    assert!((tape.grad(a) - 12.0).abs() < 1e-10);
}

#[test]
fn log_backward() {
    let mut tape = Tape::new();
    let a = tape.leaf(std::f64::consts::E);
    let b = tape.log(a);
    assert!((tape.data(b) - 1.0).abs() < 1e-10);
    tape.backward(b);
    // d/dx ln(x) = 1/x = 1/e at x=e
    assert!((tape.grad(a) - 1.0 / std::f64::consts::E).abs() < 1e-10);
}

#[test]
fn log_of_non_positive_is_non_finite() {
    let mut tape = Tape::new();
    let a = tape.leaf(0.0);
    let b = tape.log(a);
    assert!(!tape.data(b).is_finite());
}

#[test]
fn exp_backward() {
    let mut tape = Tape::new();
    let a = tape.leaf(1.0);
    let b = tape.exp(a);
    assert!((tape.data(b) - std::f64::consts::E).abs() < 1e-10);
    tape.backward(b);
    assert!((tape.grad(a) - std::f64::consts::E).abs() < 1e-10);
}

#[test]
fn relu_backward_positive_and_negative() {
    let mut tape = Tape::new();
    let a = tape.leaf(-1.0);
    let b = tape.leaf(1.0);
    let ra = tape.relu(a);
    let rb = tape.relu(b);
    let c = tape.add(ra, rb);
    assert_eq!(tape.data(c), 1.0);
    tape.backward(c);
    assert_eq!(tape.grad(a), 0.0);
    assert_eq!(tape.grad(b), 1.0);
}

#[test]
fn neg_backward() {
    let mut tape = Tape::new();
    let a = tape.leaf(3.0);
    let b = tape.neg(a);
    assert_eq!(tape.data(b), -3.0);
    tape.backward(b);
    assert_eq!(tape.grad(a), -1.0);
}

#[test]
fn sub_backward() {
    let mut tape = Tape::new();
    let a = tape.leaf(5.0);
    let b = tape.leaf(2.0);
    let c = tape.sub(a, b);
    assert_eq!(tape.data(c), 3.0);
    tape.backward(c);
    assert_eq!(tape.grad(a), 1.0);
    assert_eq!(tape.grad(b), -1.0);
}

#[test]
fn div_backward() {
    let mut tape = Tape::new();
    let a = tape.leaf(6.0);
    let b = tape.leaf(2.0);
    let c = tape.div(a, b);
    assert_eq!(tape.data(c), 3.0);
    tape.backward(c);
    assert_eq!(tape.grad(a), 0.5);
    // d/db (a/b) = -a/b^2 = -6/4 = -1.5
    assert!((tape.grad(b) + 1.5).abs() < 1e-10);
}

#[test]
fn gradient_accumulates_when_node_used_twice() {
    // c = a + a => dc/da = 2
    let mut tape = Tape::new();
    let a = tape.leaf(3.0);
    let c = tape.add(a, a);
    assert_eq!(tape.data(c), 6.0);
    tape.backward(c);
    assert_eq!(tape.grad(a), 2.0);
}

#[test]
fn shared_node_gradient_sums_over_parents() {
    // c = a*a + a*b => dc/da = 2a + b, dc/db = a
    let mut tape = Tape::new();
    let a = tape.leaf(3.0);
    let b = tape.leaf(4.0);
    let aa = tape.mul(a, a);
    let ab = tape.mul(a, b);
    let c = tape.add(aa, ab);
    tape.backward(c);
    assert!((tape.grad(a) - (2.0 * 3.0 + 4.0)).abs() < 1e-10);
    assert!((tape.grad(b) - 3.0).abs() < 1e-10);
}

#[test]
fn chain_compound_backward() {
    // loss = relu(a*b + c); a=1, b=2, c=-1 => loss = 1
    let mut tape = Tape::new();
    let a = tape.leaf(1.0);
    let b = tape.leaf(2.0);
    let c = tape.leaf(-1.0);
    let ab = tape.mul(a, b);
    let s = tape.add(ab, c);
    let loss = tape.relu(s);
    assert_eq!(tape.data(loss), 1.0);
    tape.backward(loss);
    assert!((tape.grad(a) - 2.0).abs() < 1e-10);
    assert!((tape.grad(b) - 1.0).abs() < 1e-10);
    assert!((tape.grad(c) - 1.0).abs() < 1e-10);
}

#[test]
fn zero_grad_after_backward() {
    let mut tape = Tape::new();
    let a = tape.leaf(2.0);
    let three = tape.leaf(3.0);
    let b = tape.mul(a, three);
    tape.backward(b);
    assert_eq!(tape.grad(a), 3.0);
    tape.zero_grad(a);
    assert_eq!(tape.grad(a), 0.0);
}

#[test]
fn release_drops_nodes_after_mark() {
    let mut tape = Tape::new();
    let p = tape.leaf(1.5);
    let mark = tape.mark();
    let q = tape.leaf(2.0);
    let _r = tape.mul(p, q);
    assert!(tape.len() > mark);
    tape.release(mark);
    assert_eq!(tape.len(), mark);
    // the parameter below the mark survives with its value intact
    assert_eq!(tape.data(p), 1.5);
}

#[test]
fn finite_diff_add_mul_chain() {
    finite_diff_check(&[1.3, -0.7, 2.1], |t, x| {
        let ab = t.mul(x[0], x[1]);
        let s = t.add(ab, x[2]);
        t.mul(s, x[0])
    });
}

#[test]
fn finite_diff_log_exp_pow() {
    // f = log(exp(a) + b^2), with b^2 > 0 keeping the log argument positive
    finite_diff_check(&[0.4, 1.2], |t, x| {
        let ea = t.exp(x[0]);
        let b2 = t.pow(x[1], 2.0);
        let s = t.add(ea, b2);
        t.log(s)
    });
}

#[test]
fn finite_diff_relu_div_sub() {
    // f = relu(a - b) / (c + 2), away from the relu kink
    finite_diff_check(&[2.0, 0.5, 1.0], |t, x| {
        let d = t.sub(x[0], x[1]);
        let r = t.relu(d);
        let two = t.leaf(2.0);
        let denom = t.add(x[2], two);
        t.div(r, denom)
    });
}

#[test]
fn finite_diff_shared_subexpression() {
    // f = (a*b) * (a*b) + a; the product node has two parents
    finite_diff_check(&[0.9, -1.1], |t, x| {
        let ab = t.mul(x[0], x[1]);
        let sq = t.mul(ab, ab);
        t.add(sq, x[0])
    });
}

#[test]
fn deep_chain_backward_does_not_overflow() {
    // a long add chain exercises the iterative traversal
    let mut tape = Tape::new();
    let a = tape.leaf(1.0);
    let mut acc = tape.leaf(0.0);
    for _ in 0..50_000 {
        acc = tape.add(acc, a);
    }
    tape.backward(acc);
    assert!((tape.grad(a) - 50_000.0).abs() < 1e-6);
}
