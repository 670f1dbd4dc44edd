//! Autograd: a scalar computation graph stored as a tape arena.
//!
//! Forward operations append nodes to a [`Tape`]; [`Tape::backward`]
//! propagates gradients from a loss node to all of its ancestors using the
//! chain rule in reverse topological order. Nodes are addressed by [`Val`]
//! handles (stable indices into the arena), so a node can be shared by many
//! parents without reference counting.

mod tape;
#[cfg(test)]
mod tests;

pub use tape::{Tape, Val};
