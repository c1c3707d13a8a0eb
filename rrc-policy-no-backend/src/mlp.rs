use crate::Mat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
/// Configuration of [`Mlp`].
pub struct MlpConfig {
    pub(crate) in_dim: usize,
    pub(crate) units: Vec<usize>,
    pub(crate) out_dim: usize,
}

impl MlpConfig {
    /// Creates configuration of MLP.
    pub fn new(in_dim: usize, units: Vec<usize>, out_dim: usize) -> Self {
        Self {
            in_dim,
            units,
            out_dim,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
/// Multilayer perceptron with ReLU activation function and `tanh` output.
pub struct Mlp {
    /// Weights of layers.
    ws: Vec<Mat>,

    /// Biases of layers.
    bs: Vec<Mat>,
}

impl Mlp {
    /// Constructs an MLP from weights and biases, checking that layers chain.
    ///
    /// The weight of a layer has shape `[out, in]` and its bias `[out, 1]`.
    pub fn new(ws: Vec<Mat>, bs: Vec<Mat>) -> Result<Self, String> {
        let mlp = Self { ws, bs };
        mlp.validate()?;
        Ok(mlp)
    }

    /// Builds an MLP with weights drawn uniformly from `[-1/sqrt(in), 1/sqrt(in)]`.
    pub fn build(config: &MlpConfig, rng: &mut fastrand::Rng) -> Self {
        let dims: Vec<usize> = std::iter::once(config.in_dim)
            .chain(config.units.iter().copied())
            .chain(std::iter::once(config.out_dim))
            .collect();
        let (ws, bs) = dims
            .windows(2)
            .map(|d| {
                let (i, o) = (d[0], d[1]);
                let bound = 1.0 / (i as f32).sqrt();
                let mut uniform = |n: usize| -> Vec<f32> {
                    (0..n).map(|_| (2.0 * rng.f32() - 1.0) * bound).collect()
                };
                let w = Mat {
                    data: uniform(o * i),
                    shape: [o, i],
                };
                let b = Mat {
                    data: uniform(o),
                    shape: [o, 1],
                };
                (w, b)
            })
            .unzip();
        Self { ws, bs }
    }

    /// Checks the shapes of the layers.
    pub fn validate(&self) -> Result<(), String> {
        if self.ws.is_empty() || self.ws.len() != self.bs.len() {
            return Err(format!(
                "{} weights and {} biases",
                self.ws.len(),
                self.bs.len()
            ));
        }
        for (i, (w, b)) in self.ws.iter().zip(self.bs.iter()).enumerate() {
            if !w.is_consistent() || !b.is_consistent() {
                return Err(format!("layer {}: data does not match shape", i));
            }
            if b.shape != [w.shape[0], 1] {
                return Err(format!(
                    "layer {}: bias of shape {:?} for weight of shape {:?}",
                    i, b.shape, w.shape
                ));
            }
            if i > 0 && self.ws[i - 1].shape[0] != w.shape[1] {
                return Err(format!(
                    "layer {}: input dimension {} after output dimension {}",
                    i,
                    w.shape[1],
                    self.ws[i - 1].shape[0]
                ));
            }
        }
        Ok(())
    }

    /// Dimension of the input.
    pub fn in_dim(&self) -> usize {
        self.ws.first().map_or(0, |w| w.shape[1])
    }

    /// Dimension of the output.
    pub fn out_dim(&self) -> usize {
        self.ws.last().map_or(0, |w| w.shape[0])
    }

    pub fn forward(&self, x: &Mat) -> Mat {
        let n_layers = self.ws.len();
        let mut x = x.clone();
        for i in 0..n_layers {
            x = self.ws[i].matmul(&x).add(&self.bs[i]);
            if i != n_layers - 1 {
                x = x.relu();
            }
        }
        x.tanh()
    }
}
