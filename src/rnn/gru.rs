//! GRU sequence layer

use burn::module::Module;
use burn::nn::Initializer;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::cells::GruCell;

/// Batch-first GRU layer returning the output at every timestep.
#[derive(Module, Debug)]
pub struct Gru<B: Backend> {
    cell: GruCell<B>,
}

impl<B: Backend> Gru<B> {
    /// Create a new GRU layer
    ///
    /// # Arguments
    /// * `input_size` - Number of input features
    /// * `hidden_size` - Number of hidden units
    /// * `device` - Device to create the module on
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        Self::with_initializer(input_size, hidden_size, None, device)
    }

    /// Create a new GRU layer whose weights are drawn from `initializer`
    pub fn with_initializer(
        input_size: usize,
        hidden_size: usize,
        initializer: Option<&Initializer>,
        device: &B::Device,
    ) -> Self {
        Self {
            cell: GruCell::with_initializer(input_size, hidden_size, initializer, device),
        }
    }

    pub fn input_size(&self) -> usize {
        self.cell.input_size()
    }

    pub fn hidden_size(&self) -> usize {
        self.cell.hidden_size()
    }

    /// Forward pass through the GRU layer
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch, seq, input_size]`
    /// * `state` - Optional initial hidden state of shape `[batch, hidden_size]`
    ///
    /// # Returns
    /// Tuple of (output `[batch, seq, hidden_size]`, final state `[batch, hidden_size]`)
    ///
    /// # Panics
    /// If the sequence axis is empty.
    pub fn forward(
        &self,
        input: Tensor<B, 3>,
        state: Option<Tensor<B, 2>>,
    ) -> (Tensor<B, 3>, Tensor<B, 2>) {
        let device = input.device();
        let [batch_size, seq_len, _] = input.dims();
        assert!(seq_len > 0, "GRU input must have at least one timestep");

        let mut hidden = state.unwrap_or_else(|| {
            Tensor::<B, 2>::zeros([batch_size, self.hidden_size()], &device)
        });

        let mut outputs: Vec<Tensor<B, 2>> = Vec::with_capacity(seq_len);
        for t in 0..seq_len {
            // input[batch, t, features] -> [batch, features]
            let step_input = input.clone().narrow(1, t, 1).squeeze::<2>(1);
            hidden = self.cell.forward(step_input, hidden);
            outputs.push(hidden.clone());
        }

        (Tensor::stack(outputs, 1), hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::Distribution;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_gru_creation() {
        let device = Default::default();
        let gru = Gru::<TestBackend>::new(5, 25, &device);

        assert_eq!(gru.input_size(), 5);
        assert_eq!(gru.hidden_size(), 25);
    }

    #[test]
    fn test_gru_forward() {
        let device = Default::default();
        let gru = Gru::<TestBackend>::new(20, 50, &device);

        let input = Tensor::<TestBackend, 3>::zeros([4, 10, 20], &device);
        let (output, state) = gru.forward(input, None);

        assert_eq!(output.dims(), [4, 10, 50]);
        assert_eq!(state.dims(), [4, 50]);
    }

    #[test]
    fn test_gru_last_output_is_final_state() {
        let device = Default::default();
        let gru = Gru::<TestBackend>::new(3, 6, &device);

        let input =
            Tensor::<TestBackend, 3>::random([2, 4, 3], Distribution::Normal(0.0, 1.0), &device);
        let (output, state) = gru.forward(input, None);

        let last = output.narrow(1, 3, 1).squeeze::<2>(1);
        let diff: f32 = (last - state).abs().max().into_scalar();
        assert!(diff < 1e-6);
    }

    #[test]
    fn test_gru_with_initial_state() {
        let device = Default::default();
        let gru = Gru::<TestBackend>::new(20, 50, &device);

        let input = Tensor::<TestBackend, 3>::zeros([4, 10, 20], &device);
        let initial_state = Tensor::<TestBackend, 2>::ones([4, 50], &device);

        let (output, state) = gru.forward(input, Some(initial_state));

        assert_eq!(output.dims(), [4, 10, 50]);
        assert_eq!(state.dims(), [4, 50]);
    }

    #[test]
    #[should_panic(expected = "at least one timestep")]
    fn test_gru_rejects_empty_sequence() {
        let device = Default::default();
        let layer = Gru::<TestBackend>::new(3, 4, &device);
        let input = Tensor::<TestBackend, 3>::zeros([2, 0, 3], &device);
        let _ = layer.forward(input, None);
    }
}
