use crate::domain::features::FeatureRow;

/// Capability interface for the pre-trained price regression artifact.
///
/// The artifact is opaque to the rest of the service: one engineered
/// row goes in, one price comes out. Keeping this behind a trait lets
/// the request path be tested against a stub without any trained model
/// on disk.
pub trait PriceEstimator: Send + Sync {
    /// Predict the resale price (GBP) for one feature row.
    fn predict(&self, row: &FeatureRow) -> Result<f64, String>;

    /// Get model name/type
    fn name(&self) -> &str;

    /// Get model version/id
    fn version(&self) -> &str;
}
