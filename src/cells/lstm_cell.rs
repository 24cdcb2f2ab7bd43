use burn::module::Module;
use burn::nn::{Initializer, Linear};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use super::linear_layer;

/// Standard LSTM cell
///
/// Implements the LSTM equations:
/// - i = sigmoid(W_ii @ x + b_ii + W_hi @ h)
/// - f = sigmoid(W_if @ x + b_if + W_hf @ h)
/// - g = tanh(W_ig @ x + b_ig + W_hg @ h)
/// - o = sigmoid(W_io @ x + b_io + W_ho @ h)
/// - c' = f * c + i * g
/// - h' = o * tanh(c')
#[derive(Module, Debug)]
pub struct LstmCell<B: Backend> {
    input_size: usize,
    hidden_size: usize,
    input_map: Linear<B>,     // input -> 4 * hidden_size (with bias)
    recurrent_map: Linear<B>, // hidden -> 4 * hidden_size (no bias)
}

impl<B: Backend> LstmCell<B> {
    /// Create a new LSTM cell with Burn's default initialization
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        Self::with_initializer(input_size, hidden_size, None, device)
    }

    /// Create a new LSTM cell whose weights are drawn from `initializer`
    ///
    /// # Arguments
    /// * `input_size` - Size of the input features
    /// * `hidden_size` - Size of the hidden state
    /// * `initializer` - Weight initializer, `None` keeps the default
    /// * `device` - Device to create the module on
    pub fn with_initializer(
        input_size: usize,
        hidden_size: usize,
        initializer: Option<&Initializer>,
        device: &B::Device,
    ) -> Self {
        let input_map = linear_layer(input_size, 4 * hidden_size, true, initializer, device);
        let recurrent_map = linear_layer(hidden_size, 4 * hidden_size, false, initializer, device);

        Self {
            input_size,
            hidden_size,
            input_map,
            recurrent_map,
        }
    }

    /// Get the input size
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get the hidden size
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Perform a forward pass through the LSTM cell
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch_size, input_size]`
    /// * `states` - Tuple of (hidden_state, cell_state), each of shape `[batch_size, hidden_size]`
    ///
    /// # Returns
    /// Tuple of (new_hidden_state, new_cell_state)
    pub fn forward(
        &self,
        input: Tensor<B, 2>,
        states: (Tensor<B, 2>, Tensor<B, 2>),
    ) -> (Tensor<B, 2>, Tensor<B, 2>) {
        let (hidden_state, cell_state) = states;

        let z = self.input_map.forward(input) + self.recurrent_map.forward(hidden_state);

        // Split into 4 gates
        let chunks = z.chunk(4, 1);
        let input_gate = chunks[0].clone();
        let forget_gate = chunks[1].clone();
        let cell_gate = chunks[2].clone();
        let output_gate = chunks[3].clone();

        let input_gate = activation::sigmoid(input_gate);
        let forget_gate = activation::sigmoid(forget_gate);
        let cell_gate = cell_gate.tanh();
        let output_gate = activation::sigmoid(output_gate);

        let new_cell = cell_state * forget_gate + input_gate * cell_gate;
        let new_hidden = new_cell.clone().tanh() * output_gate;

        (new_hidden, new_cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::backend::Backend as BurnBackend;

    type TestBackend = NdArray<f32>;
    type TestDevice = <TestBackend as BurnBackend>::Device;

    fn get_test_device() -> TestDevice {
        Default::default()
    }

    #[test]
    fn test_lstm_cell_creation() {
        let device = get_test_device();
        let cell = LstmCell::<TestBackend>::new(20, 50, &device);

        assert_eq!(cell.input_size(), 20);
        assert_eq!(cell.hidden_size(), 50);
    }

    #[test]
    fn test_lstm_forward() {
        let device = get_test_device();
        let cell = LstmCell::<TestBackend>::new(20, 50, &device);

        let batch_size = 4;
        let input = Tensor::<TestBackend, 2>::zeros([batch_size, 20], &device);
        let h = Tensor::<TestBackend, 2>::zeros([batch_size, 50], &device);
        let c = Tensor::<TestBackend, 2>::zeros([batch_size, 50], &device);

        let (new_h, new_c) = cell.forward(input, (h, c));

        assert_eq!(new_h.dims(), [batch_size, 50]);
        assert_eq!(new_c.dims(), [batch_size, 50]);
    }

    #[test]
    fn test_lstm_hidden_is_bounded() {
        let device = get_test_device();
        let init = Initializer::XavierUniform { gain: 1.0 };
        let cell = LstmCell::<TestBackend>::with_initializer(10, 20, Some(&init), &device);

        let input = Tensor::<TestBackend, 2>::random(
            [3, 10],
            burn::tensor::Distribution::Normal(0.0, 10.0),
            &device,
        );
        let h = Tensor::<TestBackend, 2>::zeros([3, 20], &device);
        let c = Tensor::<TestBackend, 2>::zeros([3, 20], &device);

        let (new_h, _) = cell.forward(input, (h, c));
        let max_abs: f32 = new_h.abs().max().into_scalar();
        assert!(max_abs <= 1.0);
    }

    #[test]
    fn test_lstm_forget_gate() {
        let device = get_test_device();
        let cell = LstmCell::<TestBackend>::new(10, 20, &device);

        let h = Tensor::<TestBackend, 2>::zeros([1, 20], &device);
        let c = Tensor::<TestBackend, 2>::ones([1, 20], &device) * 10.0;
        let input = Tensor::<TestBackend, 2>::zeros([1, 10], &device);

        let (_, new_c) = cell.forward(input, (h, c));

        // Forget gate output is strictly inside (0, 1), so the cell state must shrink
        let c_sum_old = 10.0 * 20.0;
        let c_sum_new: f32 = new_c.sum().into_scalar();
        assert!(
            (c_sum_new - c_sum_old).abs() > 0.1,
            "Forget gate should modify cell state"
        );
    }
}
