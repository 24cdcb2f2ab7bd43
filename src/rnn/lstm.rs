//! LSTM sequence layer

use burn::module::Module;
use burn::nn::Initializer;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::cells::LstmCell;

/// Hidden and cell state of an [`Lstm`], each `[batch, hidden_size]`.
pub type LstmState<B> = (Tensor<B, 2>, Tensor<B, 2>);

/// Batch-first LSTM layer returning the hidden output at every timestep.
#[derive(Module, Debug)]
pub struct Lstm<B: Backend> {
    cell: LstmCell<B>,
}

impl<B: Backend> Lstm<B> {
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        Self::with_initializer(input_size, hidden_size, None, device)
    }

    pub fn with_initializer(
        input_size: usize,
        hidden_size: usize,
        initializer: Option<&Initializer>,
        device: &B::Device,
    ) -> Self {
        Self {
            cell: LstmCell::with_initializer(input_size, hidden_size, initializer, device),
        }
    }

    pub fn input_size(&self) -> usize {
        self.cell.input_size()
    }

    pub fn hidden_size(&self) -> usize {
        self.cell.hidden_size()
    }

    /// Forward pass through the LSTM layer
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch, seq, input_size]`
    /// * `state` - Optional initial `(hidden, cell)` state
    ///
    /// # Returns
    /// Tuple of (output `[batch, seq, hidden_size]`, final `(hidden, cell)` state)
    ///
    /// # Panics
    /// If the sequence axis is empty.
    pub fn forward(
        &self,
        input: Tensor<B, 3>,
        state: Option<LstmState<B>>,
    ) -> (Tensor<B, 3>, LstmState<B>) {
        let device = input.device();
        let [batch_size, seq_len, _] = input.dims();
        assert!(seq_len > 0, "LSTM input must have at least one timestep");

        let (mut hidden, mut cell) = state.unwrap_or_else(|| {
            (
                Tensor::<B, 2>::zeros([batch_size, self.hidden_size()], &device),
                Tensor::<B, 2>::zeros([batch_size, self.hidden_size()], &device),
            )
        });

        let mut outputs: Vec<Tensor<B, 2>> = Vec::with_capacity(seq_len);
        for t in 0..seq_len {
            let step_input = input.clone().narrow(1, t, 1).squeeze::<2>(1);
            (hidden, cell) = self.cell.forward(step_input, (hidden, cell));
            outputs.push(hidden.clone());
        }

        (Tensor::stack(outputs, 1), (hidden, cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::Distribution;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_lstm_creation() {
        let device = Default::default();
        let lstm = Lstm::<TestBackend>::new(25, 23, &device);

        assert_eq!(lstm.input_size(), 25);
        assert_eq!(lstm.hidden_size(), 23);
    }

    #[test]
    fn test_lstm_forward() {
        let device = Default::default();
        let lstm = Lstm::<TestBackend>::new(20, 50, &device);

        let input = Tensor::<TestBackend, 3>::zeros([4, 10, 20], &device);
        let (output, (h, c)) = lstm.forward(input, None);

        assert_eq!(output.dims(), [4, 10, 50]);
        assert_eq!(h.dims(), [4, 50]);
        assert_eq!(c.dims(), [4, 50]);
    }

    #[test]
    fn test_lstm_state_persistence() {
        let device = Default::default();
        let lstm = Lstm::<TestBackend>::new(10, 20, &device);

        let batch1 =
            Tensor::<TestBackend, 3>::random([1, 5, 10], Distribution::Uniform(0.0, 1.0), &device);
        let batch2 =
            Tensor::<TestBackend, 3>::random([1, 5, 10], Distribution::Uniform(0.0, 1.0), &device);

        let (_, state) = lstm.forward(batch1, None);
        let (fresh, _) = lstm.forward(batch2.clone(), None);
        let (carried, _) = lstm.forward(batch2, Some(state));

        // Carrying state over must change the first step's output
        let diff: f32 = (fresh.narrow(1, 0, 1) - carried.narrow(1, 0, 1))
            .abs()
            .sum()
            .into_scalar();
        assert!(diff > 0.0);
    }

    #[test]
    #[should_panic(expected = "at least one timestep")]
    fn test_lstm_rejects_empty_sequence() {
        let device = Default::default();
        let layer = Lstm::<TestBackend>::new(3, 4, &device);
        let input = Tensor::<TestBackend, 3>::zeros([2, 0, 3], &device);
        let _ = layer.forward(input, None);
    }
}
