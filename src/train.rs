//! Gradient-descent harness
//!
//! A minimal full-batch training loop used to check that assembled networks can
//! actually learn: Adam on the mean squared error between the network's
//! last-timestep output and a target. Requires an autodiff backend such as
//! `Autodiff<NdArray<f32>>`.

use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::tensor::backend::{AutodiffBackend, Backend};
use burn::tensor::{ElementConversion, Tensor, TensorData};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::BuilderError;
use crate::network::{last_timestep, Rnn};

/// Settings for [`fit`].
#[derive(Clone, Debug, PartialEq)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub iterations: usize,
    /// Emit an info record every `log_every` iterations (0 disables).
    pub log_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            iterations: 200,
            log_every: 50,
        }
    }
}

/// Loss history of a [`fit`] run.
#[derive(Clone, Debug, Default)]
pub struct TrainReport {
    pub losses: Vec<f32>,
}

impl TrainReport {
    /// Loss of the last iteration, `NaN` if no iteration ran.
    pub fn final_loss(&self) -> f32 {
        self.losses.last().copied().unwrap_or(f32::NAN)
    }
}

/// Mean squared error between the last timestep of `output` and `targets`.
pub fn last_step_mse<B: Backend>(output: Tensor<B, 3>, targets: Tensor<B, 2>) -> Tensor<B, 1> {
    (last_timestep(output) - targets).powf_scalar(2.0).mean()
}

/// Trains `model` on `(inputs, targets)` with full-batch Adam.
///
/// `inputs` is `[batch, seq, input_dim]`; `targets` is `[batch, output_dim]` and is
/// compared against the output at the final timestep.
pub fn fit<B: AutodiffBackend>(
    mut model: Rnn<B>,
    inputs: Tensor<B, 3>,
    targets: Tensor<B, 2>,
    config: &TrainConfig,
) -> Result<(Rnn<B>, TrainReport), BuilderError> {
    // One checked pass up front; the loop below reuses the same tensor.
    let first = model.forward(inputs.clone())?;
    let [batch, _, out_dim] = first.dims();
    if targets.dims() != [batch, out_dim] {
        return Err(BuilderError::Config(format!(
            "targets must be [{batch}, {out_dim}], got {:?}",
            targets.dims()
        )));
    }

    let mut optim = AdamConfig::new().init();
    let mut report = TrainReport {
        losses: Vec::with_capacity(config.iterations),
    };

    for iteration in 0..config.iterations {
        let output = model.forward_unchecked(inputs.clone());
        let loss = last_step_mse(output, targets.clone());
        let loss_value: f32 = loss.clone().into_scalar().elem();
        report.losses.push(loss_value);

        if config.log_every > 0 && iteration % config.log_every == 0 {
            info!("iteration {iteration}: loss {loss_value:.5}");
        }

        let grads = GradientsParams::from_grads(loss.backward(), &model);
        model = optim.step(config.learning_rate, model, grads);
    }

    debug!(
        "training finished after {} iterations, final loss {:.5}",
        config.iterations,
        report.final_loss()
    );
    Ok((model, report))
}

/// Synthetic binary sequence task.
///
/// Every even-indexed sample is a positive: `shift` is added to feature
/// `signal_feature` at every timestep. All features carry uniform noise in
/// `[-1, 1)`. Returns `inputs [n, seq_len, features]` and `targets [n, 1]` in `{0, 1}`.
///
/// # Panics
/// If `signal_feature` is not below `features`.
pub fn synthetic_task<B: Backend>(
    n: usize,
    seq_len: usize,
    features: usize,
    signal_feature: usize,
    shift: f32,
    seed: u64,
    device: &B::Device,
) -> (Tensor<B, 3>, Tensor<B, 2>) {
    assert!(
        signal_feature < features,
        "signal feature {signal_feature} out of range for {features} features"
    );
    let mut rng = StdRng::seed_from_u64(seed);
    let mut inputs = Vec::with_capacity(n * seq_len * features);
    let mut targets = Vec::with_capacity(n);

    for sample in 0..n {
        let positive = sample % 2 == 0;
        for _ in 0..seq_len {
            for feature in 0..features {
                let mut value: f32 = rng.gen_range(-1.0..1.0);
                if positive && feature == signal_feature {
                    value += shift;
                }
                inputs.push(value);
            }
        }
        targets.push(if positive { 1.0f32 } else { 0.0 });
    }

    let inputs = Tensor::from_data(TensorData::new(inputs, [n, seq_len, features]), device);
    let targets = Tensor::from_data(TensorData::new(targets, [n, 1]), device);
    (inputs, targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_synthetic_task_shapes_and_labels() {
        let device = Default::default();
        let (x, y) = synthetic_task::<TestBackend>(10, 5, 15, 3, 4.0, 7, &device);

        assert_eq!(x.dims(), [10, 5, 15]);
        assert_eq!(y.dims(), [10, 1]);

        let labels = y.into_data().to_vec::<f32>().unwrap();
        assert_eq!(labels, vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);

        let signal = x.narrow(2, 3, 1).into_data().to_vec::<f32>().unwrap();
        // sample 0 (positive) and sample 1 (negative), all 5 timesteps each
        assert!(signal[..5].iter().all(|v| *v >= 3.0));
        assert!(signal[5..10].iter().all(|v| *v < 1.0));
    }

    #[test]
    fn test_synthetic_task_is_seeded() {
        let device = Default::default();
        let (a, _) = synthetic_task::<TestBackend>(4, 3, 2, 0, 1.0, 11, &device);
        let (b, _) = synthetic_task::<TestBackend>(4, 3, 2, 0, 1.0, 11, &device);
        assert_eq!(
            a.into_data().to_vec::<f32>().unwrap(),
            b.into_data().to_vec::<f32>().unwrap()
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_synthetic_task_rejects_missing_signal_feature() {
        let device = Default::default();
        let _ = synthetic_task::<TestBackend>(4, 3, 2, 2, 1.0, 11, &device);
    }

    #[test]
    fn test_last_step_mse() {
        let device = Default::default();
        let output = Tensor::<TestBackend, 3>::from_floats(
            [[[9.0], [1.0]], [[9.0], [3.0]]],
            &device,
        );
        let targets = Tensor::<TestBackend, 2>::from_floats([[0.0], [1.0]], &device);

        // last steps are 1.0 and 3.0 -> errors 1 and 4 -> mean 2.5
        let loss: f32 = last_step_mse(output, targets).into_scalar();
        assert!((loss - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_report_final_loss() {
        assert!(TrainReport::default().final_loss().is_nan());
        let report = TrainReport {
            losses: vec![0.5, 0.25],
        };
        assert_eq!(report.final_loss(), 0.25);
    }
}
