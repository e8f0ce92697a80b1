//! Vehicle inquiry intake

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A customer inquiry about fitment for a vehicle the lookup could not
/// fully resolve
///
/// Validated here, persisted through the engine's catalog source; any
/// notification fan-out belongs to outer layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub submodel: String,
    pub comment: String,
}

impl VehicleInquiry {
    /// An inquiry needs a name, a way to reach the customer, and a vehicle
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInquiry("name is required".to_string()));
        }
        if self.email.trim().is_empty() && self.phone.trim().is_empty() {
            return Err(Error::InvalidInquiry(
                "an email address or phone number is required".to_string(),
            ));
        }
        if self.year == 0 || self.make.trim().is_empty() || self.model.trim().is_empty() {
            return Err(Error::InvalidInquiry(
                "year, make, and model are required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_inquiry() -> VehicleInquiry {
        VehicleInquiry {
            name: "Sam Carter".into(),
            email: "sam@example.com".into(),
            year: 2015,
            make: "Ford".into(),
            model: "F-150".into(),
            comment: "Will this hitch clear the factory bumper?".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_inquiry_passes() {
        assert!(valid_inquiry().validate().is_ok());
    }

    #[test]
    fn test_inquiry_requires_contact() {
        let mut inquiry = valid_inquiry();
        inquiry.email.clear();
        assert!(inquiry.validate().is_err());

        inquiry.phone = "555-0100".into();
        assert!(inquiry.validate().is_ok());
    }

    #[test]
    fn test_inquiry_requires_vehicle() {
        let mut inquiry = valid_inquiry();
        inquiry.year = 0;
        assert!(inquiry.validate().is_err());
    }

    #[test]
    fn test_inquiry_decodes_with_missing_fields() {
        let inquiry: VehicleInquiry =
            serde_json::from_str(r#"{"name": "Sam", "phone": "555-0100"}"#).unwrap();
        assert_eq!(inquiry.name, "Sam");
        assert!(inquiry.validate().is_err());
    }
}
