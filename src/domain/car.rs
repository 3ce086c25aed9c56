use serde::Deserialize;

use super::errors::ValidationError;
use super::features::MIN_YEAR_OF_MANUFACTURE;

/// One car as described by the client. The wire format uses the
/// human-readable column names from the training dataset ("Fuel type",
/// "Engine size", ...); the serde renames are the alias table bridging
/// those to the internal snake_case identifiers.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CarDescription {
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Fuel type")]
    pub fuel_type: String,
    #[serde(rename = "Engine size")]
    pub engine_size: f64,
    #[serde(rename = "Year of manufacture")]
    pub year_of_manufacture: i32,
    #[serde(rename = "Mileage")]
    pub mileage: f64,
}

impl CarDescription {
    /// Trims surrounding whitespace from the free-text fields.
    pub fn normalized(mut self) -> Self {
        self.manufacturer = self.manufacturer.trim().to_string();
        self.model = self.model.trim().to_string();
        self.fuel_type = self.fuel_type.trim().to_string();
        self
    }

    /// Range checks on an already-deserialized payload.
    ///
    /// There is deliberately no upper bound on the year: a
    /// year_of_manufacture in the future is legal and clamps to age 0
    /// during feature derivation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.manufacturer.is_empty() {
            return Err(ValidationError::EmptyField {
                field: "Manufacturer",
            });
        }
        if self.model.is_empty() {
            return Err(ValidationError::EmptyField { field: "Model" });
        }
        if self.fuel_type.is_empty() {
            return Err(ValidationError::EmptyField { field: "Fuel type" });
        }
        if !(self.engine_size > 0.0) {
            return Err(ValidationError::EngineSizeNotPositive {
                value: self.engine_size,
            });
        }
        if self.year_of_manufacture < MIN_YEAR_OF_MANUFACTURE {
            return Err(ValidationError::YearBeforeMinimum {
                value: self.year_of_manufacture,
            });
        }
        if self.mileage < 0.0 {
            return Err(ValidationError::MileageNegative {
                value: self.mileage,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_deserialize_wire_aliases() {
        let car: CarDescription = serde_json::from_str(
            r#"{
                "Manufacturer": "Toyota",
                "Model": "Corolla",
                "Fuel type": "Petrol",
                "Engine size": 1.8,
                "Year of manufacture": 2019,
                "Mileage": 45000
            }"#,
        )
        .unwrap();
        assert_eq!(car, corolla());
    }

    #[test]
    fn test_missing_field_error_names_it() {
        let err = serde_json::from_str::<CarDescription>(
            r#"{
                "Manufacturer": "Toyota",
                "Model": "Corolla",
                "Fuel type": "Petrol",
                "Engine size": 1.8,
                "Year of manufacture": 2019
            }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Mileage"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = serde_json::from_str::<CarDescription>(
            r#"{
                "Manufacturer": "Toyota",
                "Model": "Corolla",
                "Fuel type": "Petrol",
                "Engine size": 1.8,
                "Year of manufacture": 2019,
                "Mileage": 45000,
                "Colour": "red"
            }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Colour"));
    }

    #[test]
    fn test_normalized_trims_text_fields() {
        let car = CarDescription {
            manufacturer: "  Toyota ".to_string(),
            model: " Corolla".to_string(),
            fuel_type: "Petrol  ".to_string(),
            ..corolla()
        }
        .normalized();
        assert_eq!(car, corolla());
    }

    #[test]
    fn test_validate_accepts_valid_car() {
        assert!(corolla().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_engine_size() {
        let car = CarDescription {
            engine_size: 0.0,
            ..corolla()
        };
        assert_eq!(
            car.validate(),
            Err(ValidationError::EngineSizeNotPositive { value: 0.0 })
        );
    }

    #[test]
    fn test_validate_rejects_pre_1980_year() {
        let car = CarDescription {
            year_of_manufacture: 1979,
            ..corolla()
        };
        assert_eq!(
            car.validate(),
            Err(ValidationError::YearBeforeMinimum { value: 1979 })
        );
    }

    #[test]
    fn test_validate_accepts_future_year() {
        let car = CarDescription {
            year_of_manufacture: 2100,
            ..corolla()
        };
        assert!(car.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_mileage() {
        let car = CarDescription {
            mileage: -1.0,
            ..corolla()
        };
        assert_eq!(
            car.validate(),
            Err(ValidationError::MileageNegative { value: -1.0 })
        );
    }

    #[test]
    fn test_validate_rejects_blank_manufacturer() {
        let car = CarDescription {
            manufacturer: "   ".to_string(),
            ..corolla()
        }
        .normalized();
        assert_eq!(
            car.validate(),
            Err(ValidationError::EmptyField {
                field: "Manufacturer"
            })
        );
    }
}
