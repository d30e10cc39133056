//! LibSVM format dataset implementation
//!
//! Supports loading datasets in the libsvm sparse format, with or without
//! a leading label:
//! [label] index:value index:value ...
//!
//! Example:
//! +1 1:0.5 3:1.2 7:0.8
//! 2:0.3 5:2.1
//!
//! Either every line carries a label or none does. Labels are kept as
//! written; one-class training never looks at them.

use crate::core::{Dataset, OneClassError, Result, SparseVector};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Dataset implementation for LibSVM format files
#[derive(Debug, Clone)]
pub struct LibSVMDataset {
    samples: Vec<SparseVector>,
    labels: Option<Vec<f64>>,
    dimensions: usize,
}

impl LibSVMDataset {
    /// Load a dataset from a LibSVM format file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(OneClassError::IoError)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Load a dataset from a reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut samples = Vec::new();
        let mut labels = Vec::new();
        let mut labelled: Option<bool> = None;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(OneClassError::IoError)?;
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (label, sample) = Self::parse_line(line).map_err(|e| {
                OneClassError::ParseError(format!("Error parsing line {}: {}", line_num + 1, e))
            })?;

            match (labelled, label) {
                (None, _) => labelled = Some(label.is_some()),
                (Some(true), None) | (Some(false), Some(_)) => {
                    return Err(OneClassError::ParseError(format!(
                        "Line {}: either every line has a label or none does",
                        line_num + 1
                    )));
                }
                _ => {}
            }

            if let Some(label) = label {
                labels.push(label);
            }
            samples.push(sample);
        }

        if samples.is_empty() {
            return Err(OneClassError::EmptyDataset);
        }

        let dimensions = samples.iter().map(SparseVector::dim).max().unwrap_or(0);

        Ok(LibSVMDataset {
            samples,
            labels: (labelled == Some(true)).then_some(labels),
            dimensions,
        })
    }

    /// Parse a single line into an optional label and a sample
    fn parse_line(line: &str) -> Result<(Option<f64>, SparseVector)> {
        let mut parts = line.split_whitespace().peekable();

        let label = match parts.peek() {
            Some(first) if !first.contains(':') => {
                let label = first
                    .parse::<f64>()
                    .map_err(|_| OneClassError::ParseError(format!("Invalid label: {first}")))?;
                parts.next();
                Some(label)
            }
            Some(_) => None,
            None => return Err(OneClassError::ParseError("Empty line".to_string())),
        };

        let mut indices = Vec::new();
        let mut values = Vec::new();

        for feature_str in parts {
            let (index, value) = feature_str.split_once(':').ok_or_else(|| {
                OneClassError::ParseError(format!("Invalid feature format: {feature_str}"))
            })?;

            let index = index.parse::<usize>().map_err(|_| {
                OneClassError::ParseError(format!("Invalid feature index: {index}"))
            })?;

            let value = value.parse::<f64>().map_err(|_| {
                OneClassError::ParseError(format!("Invalid feature value: {value}"))
            })?;

            // libsvm uses 1-based indexing, convert to 0-based
            if index == 0 {
                return Err(OneClassError::ParseError(
                    "Feature index must be positive: 0".to_string(),
                ));
            }

            indices.push(index - 1);
            values.push(value);
        }

        let sample = SparseVector::try_new(indices, values)
            .map_err(|e| OneClassError::ParseError(e.to_string()))?;
        Ok((label, sample))
    }
}

impl Dataset for LibSVMDataset {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn dim(&self) -> usize {
        self.dimensions
    }

    fn samples(&self) -> &[SparseVector] {
        &self.samples
    }

    fn labels(&self) -> Option<&[f64]> {
        self.labels.as_deref()
    }
}
