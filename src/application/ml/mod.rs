pub mod estimator;
pub mod smartcore_estimator;

pub use estimator::PriceEstimator;
pub use smartcore_estimator::SmartCoreEstimator;
