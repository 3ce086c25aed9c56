use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::ml::PriceEstimator;
use crate::domain::car::CarDescription;
use crate::domain::errors::PredictionError;
use crate::domain::features::{FeatureRow, INPUT_FEATURE_NAMES, derive_features};

/// Static model description served by `GET /metadata`.
#[derive(Debug, Serialize)]
pub struct ModelMetadata {
    pub model_info: &'static str,
    pub model: &'static str,
    pub version: &'static str,
    pub features: &'static [&'static str],
}

/// Orchestrates one prediction: derive features from a validated car,
/// invoke the estimator, round the result.
///
/// The estimator reference follows a two-phase lifecycle: it is either
/// set once before the server accepts traffic or permanently absent
/// after a failed load. Nothing mutates it afterwards, so sharing it
/// across workers needs no locking.
pub struct PredictionService {
    estimator: Option<Arc<dyn PriceEstimator>>,
    current_year: i32,
}

impl PredictionService {
    pub fn new(estimator: Option<Arc<dyn PriceEstimator>>, current_year: i32) -> Self {
        Self {
            estimator,
            current_year,
        }
    }

    /// Whether the estimator artifact was loaded at startup.
    pub fn is_ready(&self) -> bool {
        self.estimator.is_some()
    }

    pub fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            model_info: "Car Price Prediction Model",
            model: "model.json",
            version: "1.0.0",
            features: INPUT_FEATURE_NAMES,
        }
    }

    /// Engineered row for one car, using the configured reference year.
    pub fn features_for(&self, car: &CarDescription) -> FeatureRow {
        derive_features(car, self.current_year)
    }

    /// Predicts the resale price in GBP, rounded to 2 decimal places.
    pub fn predict_price(&self, car: &CarDescription) -> Result<f64, PredictionError> {
        let Some(estimator) = self.estimator.as_ref() else {
            return Err(PredictionError::ModelUnavailable);
        };

        let row = self.features_for(car);
        let price = estimator
            .predict(&row)
            .map_err(|reason| PredictionError::Failed { reason })?;
        let rounded = (price * 100.0).round() / 100.0;

        info!(
            "Prediction successful for {} {}: £{:.2}",
            car.manufacturer, car.model, rounded
        );
        Ok(rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedEstimator {
        price: f64,
        calls: AtomicUsize,
    }

    impl FixedEstimator {
        fn new(price: f64) -> Self {
            Self {
                price,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PriceEstimator for FixedEstimator {
        fn predict(&self, _row: &FeatureRow) -> Result<f64, String> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(self.price)
        }

        fn name(&self) -> &str {
            "Fixed"
        }

        fn version(&self) -> &str {
            "test"
        }
    }

    struct FailingEstimator;

    impl PriceEstimator for FailingEstimator {
        fn predict(&self, _row: &FeatureRow) -> Result<f64, String> {
            Err("feature names mismatch".to_string())
        }

        fn name(&self) -> &str {
            "Failing"
        }

        fn version(&self) -> &str {
            "test"
        }
    }

    fn corolla() -> CarDescription {
        CarDescription {
            manufacturer: "Toyota".to_string(),
            model: "Corolla".to_string(),
            fuel_type: "Petrol".to_string(),
            engine_size: 1.8,
            year_of_manufacture: 2019,
            mileage: 45000.0,
        }
    }

    #[test]
    fn test_not_ready_never_invokes_estimator() {
        let service = PredictionService::new(None, 2025);
        assert!(!service.is_ready());
        let err = service.predict_price(&corolla()).unwrap_err();
        assert!(matches!(err, PredictionError::ModelUnavailable));
    }

    #[test]
    fn test_predict_rounds_to_two_decimals() {
        let estimator = Arc::new(FixedEstimator::new(12345.6789));
        let service = PredictionService::new(Some(estimator.clone()), 2025);
        assert!(service.is_ready());
        assert_eq!(service.predict_price(&corolla()).unwrap(), 12345.68);
        assert_eq!(estimator.calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_estimator_failure_is_contained() {
        let service = PredictionService::new(Some(Arc::new(FailingEstimator)), 2025);
        let err = service.predict_price(&corolla()).unwrap_err();
        match err {
            PredictionError::Failed { reason } => assert!(reason.contains("mismatch")),
            other => panic!("unexpected error: {:?}", other),
        }

        // The service stays usable after a backend failure.
        let err = service.predict_price(&corolla()).unwrap_err();
        assert!(matches!(err, PredictionError::Failed { .. }));
    }

    #[test]
    fn test_features_use_configured_year() {
        let service = PredictionService::new(None, 2030);
        let row = service.features_for(&corolla());
        assert_eq!(row.age, 11);
    }

    #[test]
    fn test_metadata_lists_input_features() {
        let service = PredictionService::new(None, 2025);
        let meta = service.metadata();
        assert_eq!(meta.features.len(), 6);
        assert_eq!(meta.model_info, "Car Price Prediction Model");
    }
}
