use super::car::CarDescription;

/// Earliest year of manufacture the API accepts.
pub const MIN_YEAR_OF_MANUFACTURE: i32 = 1980;

/// A car is flagged as vintage once it reaches this age.
pub const VINTAGE_AGE_YEARS: i32 = 20;

/// Default reference year for the age derivation, overridable via
/// `CURRENT_YEAR`. Kept as explicit configuration rather than reading
/// the system clock so predictions stay reproducible.
pub const DEFAULT_CURRENT_YEAR: i32 = 2025;

/// Ordered list of the columns the estimator was trained against.
/// This order MUST match exactly the order used by the training
/// pipeline. Any change here is a breaking change for deployed models.
pub const FEATURE_COLUMNS: &[&str] = &[
    "Manufacturer",
    "Model",
    "Fuel type",
    "Engine size",
    "Year of manufacture",
    "Mileage",
    "age",
    "mileage_per_year",
    "vintage",
];

/// The six raw input features, as reported by `GET /metadata`.
pub const INPUT_FEATURE_NAMES: &[&str] = &[
    "manufacturer",
    "model",
    "engine_size",
    "fuel_type",
    "year_of_manufacture",
    "mileage",
];

/// One fully engineered row, ready for estimator invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub manufacturer: String,
    pub model: String,
    pub fuel_type: String,
    pub engine_size: f64,
    pub year_of_manufacture: i32,
    pub mileage: f64,
    pub age: i32,
    pub mileage_per_year: f64,
    pub vintage: u8,
}

impl FeatureRow {
    /// Value of a categorical column, or None if the column is numeric
    /// or unknown.
    pub fn categorical_value(&self, column: &str) -> Option<&str> {
        match column {
            "Manufacturer" => Some(&self.manufacturer),
            "Model" => Some(&self.model),
            "Fuel type" => Some(&self.fuel_type),
            _ => None,
        }
    }

    /// Value of a numeric column, or None if the column is categorical
    /// or unknown.
    pub fn numeric_value(&self, column: &str) -> Option<f64> {
        match column {
            "Engine size" => Some(self.engine_size),
            "Year of manufacture" => Some(f64::from(self.year_of_manufacture)),
            "Mileage" => Some(self.mileage),
            "age" => Some(f64::from(self.age)),
            "mileage_per_year" => Some(self.mileage_per_year),
            "vintage" => Some(f64::from(self.vintage)),
            _ => None,
        }
    }
}

/// Derives the engineered features the training pipeline expected.
/// Pure and deterministic: same car + same reference year gives the
/// same row.
pub fn derive_features(car: &CarDescription, current_year: i32) -> FeatureRow {
    let age = (current_year - car.year_of_manufacture).max(0);
    let mileage_per_year = car.mileage / f64::from(age.max(1));
    let vintage = u8::from(age >= VINTAGE_AGE_YEARS);

    FeatureRow {
        manufacturer: car.manufacturer.clone(),
        model: car.model.clone(),
        fuel_type: car.fuel_type.clone(),
        engine_size: car.engine_size,
        year_of_manufacture: car.year_of_manufacture,
        mileage: car.mileage,
        age,
        mileage_per_year,
        vintage,
    }
}
