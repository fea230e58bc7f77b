use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Lifecycle status of a donation.
///
/// A donation leaves `Available` only through the claim-approval workflow
/// owned by the record store, never inside the ranking engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicineStatus {
    Available,
    Claimed,
    Expired,
    Distributed,
}

impl MedicineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MedicineStatus::Available => "available",
            MedicineStatus::Claimed => "claimed",
            MedicineStatus::Expired => "expired",
            MedicineStatus::Distributed => "distributed",
        }
    }
}

impl fmt::Display for MedicineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MedicineStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(MedicineStatus::Available),
            "claimed" => Ok(MedicineStatus::Claimed),
            "expired" => Ok(MedicineStatus::Expired),
            "distributed" => Ok(MedicineStatus::Distributed),
            other => Err(AppError::InvalidQuery(format!(
                "unknown medicine status '{}'",
                other
            ))),
        }
    }
}

/// Where a donation is held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub pincode: String,
}

/// A listed, claimable quantity of medicine.
///
/// Owned by the record store. The engine only ever borrows these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: String,
    pub donor_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub quantity: u32,
    pub unit: String,
    pub expiry_date: DateTime<Utc>,
    #[serde(default)]
    pub batch_number: String,
    #[serde(default)]
    pub manufacturer: String,
    pub status: MedicineStatus,
    pub location: Location,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Donation {
    /// Expiry as a whole-millisecond timestamp, the key all expiry ordering uses.
    pub fn expiry_millis(&self) -> i64 {
        self.expiry_date.timestamp_millis()
    }

    pub fn is_available(&self) -> bool {
        self.status == MedicineStatus::Available
    }

    /// True when the donation is held in the recipient's city and state.
    pub fn is_near(&self, location: &RecipientLocation) -> bool {
        self.location.city == location.city && self.location.state == location.state
    }
}

/// Data used to list a new donation. The store assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDonation {
    pub donor_id: String,
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub unit: String,
    pub expiry_date: DateTime<Utc>,
    pub batch_number: String,
    pub manufacturer: String,
    pub location: Location,
}

impl NewDonation {
    /// Checks the fields a donor must fill in before the listing is stored.
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("donor_id", &self.donor_id),
            ("name", &self.name),
            ("unit", &self.unit),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::InvalidQuery(format!("{} must not be empty", field)));
            }
        }
        if self.quantity == 0 {
            return Err(AppError::InvalidQuantity(0));
        }
        if self.location.city.trim().is_empty() || self.location.state.trim().is_empty() {
            return Err(AppError::InvalidLocation(
                "city and state are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// The recipient side of an affinity comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientLocation {
    pub city: String,
    pub state: String,
}

impl RecipientLocation {
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
        }
    }
}

/// A donation summary paired with its urgency priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritizedMedicine {
    pub medicine_id: String,
    pub name: String,
    pub priority: u32,
}
