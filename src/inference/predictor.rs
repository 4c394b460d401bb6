//! Inference Predictor Module
//!
//! Runs the classifier on images or pre-built tensors. The predictor owns
//! the preprocessing step the architecture itself does not encode: inputs
//! are resized to 200×200 and normalized before the forward pass.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use burn::tensor::{backend::Backend, Tensor, TensorData};
use image::{imageops::FilterType, DynamicImage};
use serde::{Deserialize, Serialize};

use crate::model::cnn::VggSimple;
use crate::utils::error::{Result, VggSimpleError};
use crate::{IMAGE_SIZE, IN_CHANNELS};

/// ImageNet normalization mean values (RGB)
const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
/// ImageNet normalization std values (RGB)
const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Resize an image to the input resolution the network expects
pub fn resize_image(image: &DynamicImage) -> DynamicImage {
    image.resize_exact(IMAGE_SIZE as u32, IMAGE_SIZE as u32, FilterType::Lanczos3)
}

/// Normalize an image to a flat vector with ImageNet normalization
/// Returns CHW layout: [C, H, W] flattened
pub fn normalize_image(image: &DynamicImage) -> Vec<f32> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let num_pixels = (width * height) as usize;

    // Pre-allocate for CHW layout
    let mut normalized = vec![0.0f32; 3 * num_pixels];

    for (i, pixel) in rgb.pixels().enumerate() {
        let r = (pixel[0] as f32 / 255.0 - IMAGENET_MEAN[0]) / IMAGENET_STD[0];
        let g = (pixel[1] as f32 / 255.0 - IMAGENET_MEAN[1]) / IMAGENET_STD[1];
        let b = (pixel[2] as f32 / 255.0 - IMAGENET_MEAN[2]) / IMAGENET_STD[2];

        // CHW layout: all R values, then all G values, then all B values
        normalized[i] = r;
        normalized[num_pixels + i] = g;
        normalized[2 * num_pixels + i] = b;
    }

    normalized
}

/// Convert a preprocessed image into a [1, 3, 200, 200] input tensor
pub fn image_to_tensor<B: Backend>(image: &DynamicImage, device: &B::Device) -> Tensor<B, 4> {
    let resized = resize_image(image);
    let data = normalize_image(&resized);

    Tensor::from_data(
        TensorData::new(data, [1, IN_CHANNELS, IMAGE_SIZE, IMAGE_SIZE]),
        device,
    )
}

/// Result of a single prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Path to the input image (if applicable)
    pub image_path: Option<PathBuf>,

    /// Predicted class index
    pub predicted_class: usize,

    /// Confidence score (probability) for the predicted class
    pub confidence: f32,

    /// Full probability distribution over all classes
    pub probabilities: Vec<f32>,

    /// Top-k class indices with their probabilities
    pub top_k: Vec<(usize, f32)>,

    /// Inference time in milliseconds
    pub inference_time_ms: f64,
}

impl PredictionResult {
    /// Create a new prediction result from a probability distribution
    pub fn new(
        probabilities: Vec<f32>,
        inference_time: Duration,
        image_path: Option<PathBuf>,
    ) -> Self {
        // Find predicted class (argmax)
        let (predicted_class, &confidence) = probabilities
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap_or((0, &0.0));

        // Top-5 predictions
        let mut indexed: Vec<(usize, f32)> =
            probabilities.iter().enumerate().map(|(i, &p)| (i, p)).collect();
        indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        let top_k: Vec<(usize, f32)> = indexed.into_iter().take(5).collect();

        Self {
            image_path,
            predicted_class,
            confidence,
            probabilities,
            top_k,
            inference_time_ms: inference_time.as_secs_f64() * 1000.0,
        }
    }
}

/// Runs inference with a constructed model
///
/// The predictor takes ownership of a model whose weights the caller has
/// already set up; how those weights were obtained is not its concern.
pub struct Predictor<B: Backend> {
    model: VggSimple<B>,
    device: B::Device,
}

impl<B: Backend> Predictor<B> {
    /// Create a predictor from a model and a device
    pub fn new(model: VggSimple<B>, device: B::Device) -> Self {
        Self { model, device }
    }

    /// Number of classes the underlying model distinguishes
    pub fn num_classes(&self) -> usize {
        self.model.num_classes()
    }

    /// Run prediction on a batch tensor of shape [N, 3, 200, 200]
    ///
    /// Returns one result per batch sample. The input contract is checked
    /// up front so callers get a typed error instead of a shape panic from
    /// inside the forward pass.
    pub fn predict(&self, input: Tensor<B, 4>) -> Result<Vec<PredictionResult>> {
        let [batch_size, channels, height, width] = input.dims();

        if channels != IN_CHANNELS || height != IMAGE_SIZE || width != IMAGE_SIZE {
            return Err(VggSimpleError::InvalidInput(format!(
                "expected input of shape [N, {}, {}, {}], got [{}, {}, {}, {}]",
                IN_CHANNELS, IMAGE_SIZE, IMAGE_SIZE, batch_size, channels, height, width
            )));
        }

        let start = Instant::now();
        let probs = self.model.forward_softmax(input);
        let elapsed = start.elapsed();

        let num_classes = self.model.num_classes();
        let flat: Vec<f32> = probs
            .into_data()
            .to_vec()
            .map_err(|e| VggSimpleError::Inference(format!("{:?}", e)))?;

        Ok(flat
            .chunks(num_classes)
            .map(|row| PredictionResult::new(row.to_vec(), elapsed, None))
            .collect())
    }

    /// Load an image from disk, preprocess it, and run prediction
    pub fn predict_image(&self, path: &Path) -> Result<PredictionResult> {
        let image = image::open(path)
            .map_err(|e| VggSimpleError::ImageLoadError(path.to_path_buf(), e.to_string()))?;

        let input = image_to_tensor::<B>(&image, &self.device);
        let mut results = self.predict(input)?;

        let mut result = results
            .pop()
            .ok_or_else(|| VggSimpleError::Inference("empty prediction batch".to_string()))?;
        result.image_path = Some(path.to_path_buf());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DefaultBackend;
    use crate::model::cnn::VggSimpleConfig;

    type TestBackend = DefaultBackend;

    fn test_image() -> DynamicImage {
        DynamicImage::ImageRgb8(image::RgbImage::from_pixel(64, 48, image::Rgb([255, 0, 0])))
    }

    #[test]
    fn test_normalize_image_layout() {
        let image = test_image();
        let data = normalize_image(&image);

        assert_eq!(data.len(), 3 * 64 * 48);

        // Solid red: every value within a channel plane is identical
        let num_pixels = 64 * 48;
        let r = (1.0 - IMAGENET_MEAN[0]) / IMAGENET_STD[0];
        let g = (0.0 - IMAGENET_MEAN[1]) / IMAGENET_STD[1];
        assert!((data[0] - r).abs() < 1e-5);
        assert!((data[num_pixels] - g).abs() < 1e-5);
    }

    #[test]
    fn test_image_to_tensor_shape() {
        let device = Default::default();
        let tensor = image_to_tensor::<TestBackend>(&test_image(), &device);
        assert_eq!(tensor.dims(), [1, 3, 200, 200]);
    }

    #[test]
    fn test_predict_returns_distribution() {
        let device: <TestBackend as Backend>::Device = Default::default();
        let model = VggSimple::<TestBackend>::new(&VggSimpleConfig::new(), &device);
        let predictor = Predictor::new(model, device.clone());

        let input = Tensor::<TestBackend, 4>::zeros([2, 3, 200, 200], &device);
        let results = predictor.predict(input).unwrap();

        assert_eq!(results.len(), 2);
        for result in results {
            assert!(result.predicted_class < 10);
            assert_eq!(result.probabilities.len(), 10);
            assert_eq!(result.top_k.len(), 5);

            let sum: f32 = result.probabilities.iter().sum();
            assert!((sum - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_predict_rejects_wrong_shape() {
        let device: <TestBackend as Backend>::Device = Default::default();
        let model = VggSimple::<TestBackend>::new(&VggSimpleConfig::new(), &device);
        let predictor = Predictor::new(model, device.clone());

        let input = Tensor::<TestBackend, 4>::zeros([1, 3, 64, 64], &device);
        let result = predictor.predict(input);

        assert!(matches!(result, Err(VggSimpleError::InvalidInput(_))));
    }
}
