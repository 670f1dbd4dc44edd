//! # chargpt
//!
//! Character-level GPT trained end-to-end on a scalar autograd tape.
//!
//! The computation graph is built one scalar operation at a time during the
//! forward pass; [`autograd::Tape::backward`] propagates gradients from the
//! loss to every parameter using the chain rule in reverse topological order.
//! Pipeline: corpus (fetched if missing) → char tokenizer → transformer
//! forward with KV cache → mean NLL loss → backward → Adam → sampling.

pub mod autograd;
pub mod config;
pub mod data;
pub mod model;
pub mod optim;
pub mod sample;
pub mod tokenizer;
pub mod train;

mod error;
mod run;

pub use error::Error;
pub use run::run;
