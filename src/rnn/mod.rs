//! # Recurrent Sequence Layers
//!
//! [`Gru`] and [`Lstm`] wrap the single-step cells from [`crate::cells`] and run
//! them over a whole batch-first sequence, returning the output at every
//! timestep together with the final state.
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape |
//! |--------|-------|
//! | input | `[batch, seq_len, input_size]` |
//! | output | `[batch, seq_len, hidden_size]` |
//! | state | `[batch, hidden_size]` (`(h, c)` for [`Lstm`]) |
//!
//! ## Example
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use rnn_builder::rnn::{Gru, Lstm};
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let gru = Gru::<Backend>::new(5, 25, &device);
//! let lstm = Lstm::<Backend>::new(25, 23, &device);
//!
//! let input = Tensor::<Backend, 3>::zeros([4, 10, 5], &device);
//! let (hidden, _) = gru.forward(input, None);
//! let (output, (h, c)) = lstm.forward(hidden, None);
//!
//! assert_eq!(output.dims(), [4, 10, 23]);
//! assert_eq!(h.dims(), [4, 23]);
//! assert_eq!(c.dims(), [4, 23]);
//! ```

pub mod gru;
pub mod lstm;

pub use gru::Gru;
pub use lstm::Lstm;
