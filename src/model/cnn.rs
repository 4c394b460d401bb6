//! CNN Model Architecture
//!
//! This module implements a compact VGG-style convolutional network using the
//! Burn framework. The network classifies fixed-size 200×200 RGB images:
//! only the two max-pool layers reduce the spatial resolution (200 → 40 → 8),
//! so the classifier head is sized for an 8×8×128 feature map.

use burn::{
    config::Config,
    module::Module,
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{MaxPool2d, MaxPool2dConfig},
        Dropout, DropoutConfig, Linear, LinearConfig, PaddingConfig2d, Relu,
    },
    tensor::{backend::Backend, Tensor},
};

/// Kernel size of every convolution
const KERNEL_SIZE: usize = 3;

/// Symmetric padding applied by every convolution (preserves spatial size)
const PADDING: usize = 1;

/// Kernel size and stride of the max-pool layers
const POOL_SIZE: usize = 5;

/// Spatial size of the feature map after both pooling stages
const POOLED_SIZE: usize = 8;

/// Channels produced by the second feature stage
const STAGE2_OUT: usize = 128;

/// Hidden units in the classifier head
const HIDDEN_UNITS: usize = 80;

/// Flattened feature length expected by the classifier head
pub const FLATTENED_FEATURES: usize = POOLED_SIZE * POOLED_SIZE * STAGE2_OUT;

/// Configuration for the VggSimple model
#[derive(Config, Debug)]
pub struct VggSimpleConfig {
    /// Number of output classes
    #[config(default = "10")]
    pub num_classes: usize,

    /// Dropout rate for regularization
    #[config(default = "0.15")]
    pub dropout_rate: f64,
}

/// A 3×3 convolution with stride 1 and padding 1
fn conv3x3<B: Backend>(in_channels: usize, out_channels: usize, device: &B::Device) -> Conv2d<B> {
    Conv2dConfig::new([in_channels, out_channels], [KERNEL_SIZE, KERNEL_SIZE])
        .with_padding(PaddingConfig2d::Explicit(PADDING, PADDING))
        .init(device)
}

/// One feature-extraction stage: three padded 3×3 convolutions with ReLU,
/// a 5×5/stride-5 max-pool, and dropout.
#[derive(Module, Debug)]
pub struct FeatureStage<B: Backend> {
    conv1: Conv2d<B>,
    conv2: Conv2d<B>,
    conv3: Conv2d<B>,
    relu: Relu,
    pool: MaxPool2d,
    dropout: Dropout,
}

impl<B: Backend> FeatureStage<B> {
    /// Create a stage from its channel plan: `[in, mid1, mid2, out]`
    pub fn new(channels: [usize; 4], dropout_rate: f64, device: &B::Device) -> Self {
        Self {
            conv1: conv3x3(channels[0], channels[1], device),
            conv2: conv3x3(channels[1], channels[2], device),
            conv3: conv3x3(channels[2], channels[3], device),
            relu: Relu::new(),
            pool: MaxPool2dConfig::new([POOL_SIZE, POOL_SIZE])
                .with_strides([POOL_SIZE, POOL_SIZE])
                .init(),
            dropout: DropoutConfig::new(dropout_rate).init(),
        }
    }

    /// Forward pass through the stage: [B, C_in, H, W] -> [B, C_out, H/5, W/5]
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.relu.forward(self.conv1.forward(x));
        let x = self.relu.forward(self.conv2.forward(x));
        let x = self.relu.forward(self.conv3.forward(x));
        let x = self.pool.forward(x);
        self.dropout.forward(x)
    }
}

/// VGG-style image classifier
///
/// Architecture:
/// - Stage 1: convolutions 3→64→64→64, max-pool, dropout
/// - Stage 2: convolutions 64→64→128→128, max-pool, dropout
/// - Flatten to 8×8×128 = 8192 features
/// - Linear 8192→80, dropout, linear 80→num_classes
///
/// Dropout is stochastic only in training mode. In Burn, training mode is the
/// backend: dropout is live on `Autodiff<_>` backends and the identity on
/// plain inference backends, so a forward pass in evaluation mode is fully
/// deterministic given fixed weights.
#[derive(Module, Debug)]
pub struct VggSimple<B: Backend> {
    stage1: FeatureStage<B>,
    stage2: FeatureStage<B>,
    fc1: Linear<B>,
    dropout: Dropout,
    fc2: Linear<B>,
    num_classes: usize,
}

impl<B: Backend> VggSimple<B> {
    /// Create a new VggSimple model from configuration
    ///
    /// All layers are allocated with the framework's default initialization.
    /// No input-shape validation happens here: a spatially incompatible input
    /// only surfaces at the flatten step inside [`forward`](Self::forward).
    pub fn new(config: &VggSimpleConfig, device: &B::Device) -> Self {
        let stage1 = FeatureStage::new([3, 64, 64, 64], config.dropout_rate, device);
        let stage2 = FeatureStage::new([64, 64, 128, 128], config.dropout_rate, device);

        let fc1 = LinearConfig::new(FLATTENED_FEATURES, HIDDEN_UNITS).init(device);
        let dropout = DropoutConfig::new(config.dropout_rate).init();
        let fc2 = LinearConfig::new(HIDDEN_UNITS, config.num_classes).init(device);

        Self {
            stage1,
            stage2,
            fc1,
            dropout,
            fc2,
            num_classes: config.num_classes,
        }
    }

    /// Forward pass through the network
    ///
    /// # Arguments
    /// * `x` - Input tensor of shape [batch_size, 3, 200, 200]
    ///
    /// # Returns
    /// * Logits tensor of shape [batch_size, num_classes]
    ///
    /// # Panics
    /// If the spatial dimensions of the input do not pool down to an 8×8 map,
    /// the flatten below fails with a shape error.
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.stage1.forward(x);
        let x = self.stage2.forward(x);

        // Flatten: [B, 128, 8, 8] -> [B, 8192]
        let [batch_size, _, _, _] = x.dims();
        let x = x.reshape([batch_size, FLATTENED_FEATURES]);

        // Classifier head, no activation between the linear layers
        let x = self.fc1.forward(x);
        let x = self.dropout.forward(x);
        self.fc2.forward(x)
    }

    /// Forward pass with softmax over the class dimension, for inference
    pub fn forward_softmax(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let logits = self.forward(x);
        burn::tensor::activation::softmax(logits, 1)
    }

    /// Get the number of output classes
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DefaultBackend, TrainingBackend};

    type TestBackend = DefaultBackend;

    fn to_vec<B: Backend>(t: Tensor<B, 2>) -> Vec<f32> {
        t.into_data().to_vec::<f32>().unwrap()
    }

    #[test]
    fn test_output_shape() {
        let device = Default::default();
        let config = VggSimpleConfig::new();
        let model = VggSimple::<TestBackend>::new(&config, &device);

        let input = Tensor::<TestBackend, 4>::zeros([2, 3, 200, 200], &device);
        let output = model.forward(input);

        assert_eq!(output.dims(), [2, 10]);
    }

    #[test]
    fn test_num_classes_controls_output_dim() {
        let device = Default::default();

        for num_classes in [1, 1000] {
            let config = VggSimpleConfig::new().with_num_classes(num_classes);
            let model = VggSimple::<TestBackend>::new(&config, &device);
            assert_eq!(model.num_classes(), num_classes);

            let input = Tensor::<TestBackend, 4>::zeros([1, 3, 200, 200], &device);
            let output = model.forward(input);
            assert_eq!(output.dims(), [1, num_classes]);
        }
    }

    #[test]
    fn test_forward_is_deterministic_in_eval_mode() {
        let device = Default::default();
        let config = VggSimpleConfig::new();
        let model = VggSimple::<TestBackend>::new(&config, &device);

        let input = Tensor::<TestBackend, 4>::random(
            [1, 3, 200, 200],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        );

        let first = to_vec(model.forward(input.clone()));
        let second = to_vec(model.forward(input));

        assert_eq!(first, second);
    }

    #[test]
    fn test_dropout_is_stochastic_in_training_mode() {
        let device = Default::default();
        let config = VggSimpleConfig::new();
        let model = VggSimple::<TrainingBackend>::new(&config, &device);

        let input = Tensor::<TrainingBackend, 4>::random(
            [1, 3, 200, 200],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        );

        let first = to_vec(model.forward(input.clone()).inner());
        let second = to_vec(model.forward(input).inner());

        // Dropout masks thousands of activations independently, so two
        // passes over the same input virtually never agree.
        assert_ne!(first, second);
    }

    #[test]
    fn test_batch_samples_are_independent() {
        let device = Default::default();
        let config = VggSimpleConfig::new();
        let model = VggSimple::<TestBackend>::new(&config, &device);

        let batch = Tensor::<TestBackend, 4>::random(
            [2, 3, 200, 200],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        );
        let single = batch.clone().slice([0..1]);

        let batched = to_vec(model.forward(batch));
        let alone = to_vec(model.forward(single));

        for (a, b) in alone.iter().zip(batched.iter().take(alone.len())) {
            assert!((a - b).abs() < 1e-4, "batched row differs: {} vs {}", a, b);
        }
    }

    #[test]
    fn test_softmax_rows_sum_to_one() {
        let device = Default::default();
        let config = VggSimpleConfig::new();
        let model = VggSimple::<TestBackend>::new(&config, &device);

        let input = Tensor::<TestBackend, 4>::zeros([2, 3, 200, 200], &device);
        let probs = to_vec(model.forward_softmax(input));

        for row in probs.chunks(10) {
            let sum: f32 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    #[should_panic]
    fn test_incompatible_spatial_size_fails_at_flatten() {
        let device = Default::default();
        let config = VggSimpleConfig::new();
        let model = VggSimple::<TestBackend>::new(&config, &device);

        // 64×64 pools down to 2×2, which does not match the classifier head
        let input = Tensor::<TestBackend, 4>::zeros([1, 3, 64, 64], &device);
        let _ = model.forward(input);
    }
}
