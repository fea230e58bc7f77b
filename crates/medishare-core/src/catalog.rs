//! Catalog listings: free-text search and the expiring-soon view.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Donation, MedicineStatus};

/// Search criteria. Every field is optional; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Matched case-insensitively against name, description and manufacturer.
    pub query: Option<String>,
    /// Case-insensitive substring of the donation's city.
    pub city: Option<String>,
    pub status: Option<MedicineStatus>,
}

impl SearchFilter {
    fn matches(&self, record: &Donation) -> bool {
        if let Some(query) = non_blank(&self.query) {
            let query = query.to_lowercase();
            let hit = record.name.to_lowercase().contains(&query)
                || record.description.to_lowercase().contains(&query)
                || record.manufacturer.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }

        if let Some(city) = non_blank(&self.city) {
            if !record
                .location
                .city
                .to_lowercase()
                .contains(&city.to_lowercase())
            {
                return false;
            }
        }

        match self.status {
            Some(status) => record.status == status,
            None => true,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Donations matching `filter`, in store order.
pub fn search<'a>(records: &'a [Donation], filter: &SearchFilter) -> Vec<&'a Donation> {
    records.iter().filter(|d| filter.matches(d)).collect()
}

/// End of an expiry window of `days` days starting at `now`.
///
/// Fails with [`AppError::InvalidQuery`] for a negative window or one that
/// runs past the last representable date.
pub fn expiry_horizon(now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>, AppError> {
    if days < 0 {
        return Err(AppError::InvalidQuery(format!(
            "window of {} days is negative",
            days
        )));
    }
    Duration::try_days(days)
        .and_then(|window| now.checked_add_signed(window))
        .ok_or_else(|| AppError::InvalidQuery(format!("window of {} days is too large", days)))
}

/// Available donations expiring after `now` and no later than `days` from now.
pub fn expiring_within(
    records: &[Donation],
    now: DateTime<Utc>,
    days: i64,
) -> Result<Vec<&Donation>, AppError> {
    let horizon = expiry_horizon(now, days)?;
    Ok(records
        .iter()
        .filter(|d| d.is_available() && d.expiry_date > now && d.expiry_date <= horizon)
        .collect())
}
