//! Model serialization and persistence
//!
//! The estimator state is written as JSON with its fields in a fixed order:
//! kernel, dictionary, alpha, K_inv, K, tolerance, samples_seen, bias.
//! [`encode`]/[`decode`] deal with that state alone; [`ModelFile`] wraps it
//! with metadata for saving to disk from the CLI.

use crate::core::{OneClassError, Result};
use crate::kernel::Kernel;
use crate::oneclass::OneClass;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Encode the full estimator state
pub fn encode<K, S>(estimator: &OneClass<K, S>) -> Result<Vec<u8>>
where
    K: Serialize,
    S: Serialize,
{
    serde_json::to_vec(estimator).map_err(|e| OneClassError::SerializationError(e.to_string()))
}

/// Decode an estimator previously produced by [`encode`].
///
/// The decoded state is checked for internal consistency before it is
/// returned; working buffers start out empty.
pub fn decode<K, S>(bytes: &[u8]) -> Result<OneClass<K, S>>
where
    K: Kernel<S> + DeserializeOwned,
    S: Clone + DeserializeOwned,
{
    let estimator: OneClass<K, S> = serde_json::from_slice(bytes)
        .map_err(|e| OneClassError::SerializationError(e.to_string()))?;
    estimator.validate()?;
    Ok(estimator)
}

/// On-disk model: metadata followed by the estimator state
#[derive(Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize, S: Serialize",
    deserialize = "K: DeserializeOwned, S: DeserializeOwned"
))]
pub struct ModelFile<K, S> {
    pub metadata: ModelMetadata,
    pub model: OneClass<K, S>,
}

/// Model metadata for tracking and validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Library version used to create the model
    pub library_version: String,
    pub dictionary_size: usize,
    pub samples_seen: u64,
    pub tolerance: f64,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

impl<K, S> ModelFile<K, S>
where
    K: Kernel<S> + Serialize + DeserializeOwned,
    S: Clone + Serialize + DeserializeOwned,
{
    /// Wrap a trained estimator
    pub fn new(model: OneClass<K, S>) -> Self {
        let metadata = ModelMetadata {
            library_version: env!("CARGO_PKG_VERSION").to_string(),
            dictionary_size: model.dictionary_size(),
            samples_seen: model.samples_seen(),
            tolerance: model.tolerance(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        Self { metadata, model }
    }

    /// Save model to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(OneClassError::IoError)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| OneClassError::SerializationError(e.to_string()))?;
        Ok(())
    }

    /// Load model from file and check its consistency
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(OneClassError::IoError)?;
        let reader = BufReader::new(file);
        let loaded: Self = serde_json::from_reader(reader)
            .map_err(|e| OneClassError::SerializationError(e.to_string()))?;
        loaded.model.validate()?;
        Ok(loaded)
    }

    pub fn into_model(self) -> OneClass<K, S> {
        self.model
    }
}

impl<K: std::fmt::Display, S> ModelFile<K, S> {
    /// Print model summary
    pub fn print_summary(&self) {
        let model = &self.model;
        println!("=== One-Class Model Summary ===");
        println!("Kernel: {}", model.kernel());
        println!("Dictionary Size: {}", model.dictionary_size());
        println!("Samples Seen: {}", model.samples_seen());
        println!("Tolerance: {}", model.tolerance());
        println!("Bias (||centroid||²): {:.6}", model.bias());
        println!("Library Version: {}", self.metadata.library_version);
        println!("Created: {}", self.metadata.created_at);
    }
}
