//! # Recurrent Cells
//!
//! Single-timestep cells. They are wrapped by the sequence layers in
//! [`crate::rnn`], which handle batching and state threading.
//!
//! | Cell | State | Gates |
//! |------|-------|-------|
//! | [`GruCell`] | `h` | reset, update, candidate |
//! | [`LstmCell`] | `(h, c)` | input, forget, cell, output |
//!
//! Both cells are built from two [`Linear`] maps: one for the input, one for the
//! recurrent state, each projecting onto all gates at once. The gate blocks are
//! then split with `chunk`.
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape |
//! |--------|-------|
//! | `input` | `[batch, input_size]` |
//! | `hidden` / `cell` | `[batch, hidden_size]` |

pub mod gru_cell;
pub mod lstm_cell;

pub use gru_cell::GruCell;
pub use lstm_cell::LstmCell;

use burn::nn::{Initializer, Linear, LinearConfig};
use burn::tensor::backend::Backend;

/// Builds a linear map, overriding Burn's default initializer when one is given.
pub(crate) fn linear_layer<B: Backend>(
    d_input: usize,
    d_output: usize,
    bias: bool,
    initializer: Option<&Initializer>,
    device: &B::Device,
) -> Linear<B> {
    let mut config = LinearConfig::new(d_input, d_output).with_bias(bias);
    if let Some(initializer) = initializer {
        config = config.with_initializer(initializer.clone());
    }
    config.init(device)
}
