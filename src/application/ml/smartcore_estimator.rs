use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::info;

use super::estimator::PriceEstimator;
use crate::domain::features::FeatureRow;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Serialized model bundle as produced by the training pipeline.
///
/// The bundle carries its own column order and category tables, so the
/// schema the forest expects is configuration shipped with the
/// artifact, never inferred by the serving code.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub columns: Vec<String>,
    pub categories: HashMap<String, Vec<String>>,
    pub forest: Forest,
}

pub struct SmartCoreEstimator {
    artifact: ModelArtifact,
}

impl SmartCoreEstimator {
    /// Loads the serialized artifact from disk. Called once at startup;
    /// a failure here leaves the service in its not-ready state.
    pub fn load(model_path: &Path) -> Result<Self> {
        let file = File::open(model_path)
            .with_context(|| format!("Failed to open model artifact at {:?}", model_path))?;
        let artifact: ModelArtifact = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to deserialize model artifact at {:?}", model_path))?;

        info!(
            "Loaded model artifact from {:?} ({} columns)",
            model_path,
            artifact.columns.len()
        );
        Ok(Self::from_artifact(artifact))
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }
}

/// Encodes one row into the numeric vector the forest expects, walking
/// the artifact's columns in their training order. Categorical values
/// become their index in the artifact's category table; an unknown
/// category or column is a schema mismatch and fails here, at
/// prediction time.
fn encode_row(
    columns: &[String],
    categories: &HashMap<String, Vec<String>>,
    row: &FeatureRow,
) -> Result<Vec<f64>, String> {
    let mut encoded = Vec::with_capacity(columns.len());
    for column in columns {
        if let Some(value) = row.categorical_value(column) {
            let table = categories
                .get(column)
                .ok_or_else(|| format!("no category table for column '{}'", column))?;
            let index = table
                .iter()
                .position(|known| known == value)
                .ok_or_else(|| format!("unknown {} category: '{}'", column, value))?;
            encoded.push(index as f64);
        } else if let Some(value) = row.numeric_value(column) {
            encoded.push(value);
        } else {
            return Err(format!("model expects unknown column '{}'", column));
        }
    }
    Ok(encoded)
}

impl PriceEstimator for SmartCoreEstimator {
    fn predict(&self, row: &FeatureRow) -> Result<f64, String> {
        let input_vec = encode_row(&self.artifact.columns, &self.artifact.categories, row)?;
        let input_matrix = DenseMatrix::from_2d_vec(&vec![input_vec])
            .map_err(|e| format!("Matrix creation failed: {}", e))?;

        let predictions = self
            .artifact
            .forest
            .predict(&input_matrix)
            .map_err(|e| format!("Forest prediction failed: {}", e))?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| "No prediction returned".to_string())
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }

    fn version(&self) -> &str {
        "v1.0"
    }
}
