use burn::module::Module;
use burn::nn::{Initializer, Linear};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use super::linear_layer;

/// Gated recurrent unit cell
///
/// Implements the GRU equations:
/// - r = sigmoid(W_ir @ x + b_ir + W_hr @ h + b_hr)
/// - z = sigmoid(W_iz @ x + b_iz + W_hz @ h + b_hz)
/// - n = tanh(W_in @ x + b_in + r * (W_hn @ h + b_hn))
/// - h' = (1 - z) * n + z * h
///
/// The recurrent map carries its own bias since the candidate gate scales it by `r`.
#[derive(Module, Debug)]
pub struct GruCell<B: Backend> {
    input_size: usize,
    hidden_size: usize,
    input_map: Linear<B>,     // input -> 3 * hidden_size
    recurrent_map: Linear<B>, // hidden -> 3 * hidden_size
}

impl<B: Backend> GruCell<B> {
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
            input_size,
            hidden_size,
            input_map: linear_layer(input_size, 3 * hidden_size, true, initializer, device),
            recurrent_map: linear_layer(hidden_size, 3 * hidden_size, true, initializer, device),
        }
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// One timestep: `[batch, input_size]`, `[batch, hidden_size]` -> `[batch, hidden_size]`
    pub fn forward(&self, input: Tensor<B, 2>, hidden: Tensor<B, 2>) -> Tensor<B, 2> {
        let input_part = self.input_map.forward(input).chunk(3, 1);
        let recurrent_part = self.recurrent_map.forward(hidden.clone()).chunk(3, 1);

        let (x_r, x_z, x_n) = (
            input_part[0].clone(),
            input_part[1].clone(),
            input_part[2].clone(),
        );
        let (h_r, h_z, h_n) = (
            recurrent_part[0].clone(),
            recurrent_part[1].clone(),
            recurrent_part[2].clone(),
        );

        let reset = activation::sigmoid(x_r + h_r);
        let update = activation::sigmoid(x_z + h_z);
        let candidate = (x_n + reset * h_n).tanh();

        let keep = update.clone().neg().add_scalar(1.0);
        candidate * keep + hidden * update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::Distribution;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_gru_cell_creation() {
        let device = Default::default();
        let cell = GruCell::<TestBackend>::new(5, 25, &device);

        assert_eq!(cell.input_size(), 5);
        assert_eq!(cell.hidden_size(), 25);
    }

    #[test]
    fn test_gru_forward_shape() {
        let device = Default::default();
        let cell = GruCell::<TestBackend>::new(5, 25, &device);

        for batch_size in [1, 4, 16] {
            let input = Tensor::<TestBackend, 2>::zeros([batch_size, 5], &device);
            let hidden = Tensor::<TestBackend, 2>::zeros([batch_size, 25], &device);
            assert_eq!(cell.forward(input, hidden).dims(), [batch_size, 25]);
        }
    }

    #[test]
    fn test_gru_state_is_convex_mix() {
        // h' interpolates between a tanh candidate and h, so it stays in [-1, 1]
        let device = Default::default();
        let cell = GruCell::<TestBackend>::new(8, 12, &device);

        let mut hidden = Tensor::<TestBackend, 2>::zeros([2, 12], &device);
        for _ in 0..5 {
            let input =
                Tensor::<TestBackend, 2>::random([2, 8], Distribution::Normal(0.0, 5.0), &device);
            hidden = cell.forward(input, hidden);
        }

        let max_abs: f32 = hidden.abs().max().into_scalar();
        assert!(max_abs <= 1.0);
    }
}
