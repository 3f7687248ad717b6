use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ValidationError;

pub const EXPIRY_FORMAT: &str = "%Y-%m-%d";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodType {
    Vegetarian,
    #[serde(rename = "Non-Vegetarian")]
    NonVegetarian,
    Both,
}

impl FoodType {
    pub const ALL: [FoodType; 3] = [FoodType::Vegetarian, FoodType::NonVegetarian, FoodType::Both];

    pub fn label(&self) -> &'static str {
        match self {
            FoodType::Vegetarian => "Vegetarian",
            FoodType::NonVegetarian => "Non-Vegetarian",
            FoodType::Both => "Both",
        }
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FoodType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingFields { fields: vec!["food_type".to_string()] });
        }
        FoodType::ALL
            .into_iter()
            .find(|t| t.label() == trimmed)
            .ok_or_else(|| ValidationError::UnknownFoodType(trimmed.to_string()))
    }
}

/// A donation accepted into a session ledger. Its only identity is its
/// position in that ledger.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DonationRecord {
    pub donor_name: String,
    pub food_type: FoodType,
    pub quantity: String,
    pub location: String,
    pub contact: String,
    pub expiry: NaiveDate,
}

/// Raw donation submission, kept as strings so a rejected form can be shown
/// back to the user unchanged.
#[derive(Serialize, Deserialize, Validate, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DonationForm {
    #[validate(length(min = 1, message = "donor name cannot be empty"))]
    pub donor_name: String,
    #[validate(length(min = 1, message = "food type cannot be empty"))]
    pub food_type: String,
    #[validate(length(min = 1, message = "quantity cannot be empty"))]
    pub quantity: String,
    #[validate(length(min = 1, message = "pickup location cannot be empty"))]
    pub location: String,
    #[validate(length(min = 1, message = "contact number cannot be empty"))]
    pub contact: String,
    #[validate(length(min = 1, message = "expiry date cannot be empty"))]
    pub expiry: String,
}

impl DonationForm {
    fn trimmed(&self) -> DonationForm {
        DonationForm {
            donor_name: self.donor_name.trim().to_string(),
            food_type: self.food_type.trim().to_string(),
            quantity: self.quantity.trim().to_string(),
            location: self.location.trim().to_string(),
            contact: self.contact.trim().to_string(),
            expiry: self.expiry.trim().to_string(),
        }
    }

    /// Emptiness is checked for every field before any parsing, so a
    /// half-filled form reports all of its gaps at once.
    pub fn to_record(&self) -> Result<DonationRecord, ValidationError> {
        let form = self.trimmed();
        form.validate().map_err(|e| ValidationError::from_validator(&e))?;

        let food_type = form.food_type.parse::<FoodType>()?;
        let expiry = NaiveDate::parse_from_str(&form.expiry, EXPIRY_FORMAT)
            .map_err(|_| ValidationError::InvalidExpiry(form.expiry.clone()))?;

        Ok(DonationRecord {
            donor_name: form.donor_name,
            food_type,
            quantity: form.quantity,
            location: form.location,
            contact: form.contact,
            expiry,
        })
    }
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone, Default)]
#[serde(default)]
pub struct RequestSubmission {
    #[validate(length(min = 1, message = "recipient name cannot be empty"))]
    pub recipient_name: String,
    #[validate(length(min = 1, message = "need description cannot be empty"))]
    pub need: String,
    #[validate(length(min = 1, message = "phone number cannot be empty"))]
    pub phone: String,
}

impl RequestSubmission {
    /// Requests are never stored; a valid one only yields its confirmation.
    pub fn confirm(&self) -> Result<String, ValidationError> {
        let trimmed = RequestSubmission {
            recipient_name: self.recipient_name.trim().to_string(),
            need: self.need.trim().to_string(),
            phone: self.phone.trim().to_string(),
        };
        trimmed.validate().map_err(|e| ValidationError::from_validator(&e))?;
        Ok(format!(
            "Request submitted successfully by {}! We'll connect you with nearby donors soon.",
            trimmed.recipient_name
        ))
    }
}
