//! Candidate matching for a recipient's request.
//!
//! Matching runs in four stages:
//! 1. filter on name substring, sufficient quantity and availability,
//! 2. stable sort by expiry, soonest first,
//! 3. stable partition so donations in the recipient's city and state lead,
//! 4. truncate to the configured result size.
//!
//! Location affinity dominates expiry: a nearby donation expiring next month
//! ranks ahead of a distant one expiring tomorrow.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MatchConfig;
use crate::error::AppError;
use crate::models::{Donation, RecipientLocation};
use crate::sort::{merge_sort_by_key, partition_sort_by_key};

/// What a recipient is asking for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchQuery {
    /// Case-insensitive substring of the medicine name.
    pub medicine_name: String,
    /// Minimum quantity a single donation must hold. Signed so negative
    /// input can be rejected rather than wrapped.
    pub quantity: i64,
    /// Recipient location used for affinity; `None` disables the partition.
    pub location: Option<RecipientLocation>,
}

impl MatchQuery {
    pub fn new(medicine_name: impl Into<String>, quantity: i64) -> Self {
        Self {
            medicine_name: medicine_name.into(),
            quantity,
            location: None,
        }
    }

    pub fn near(mut self, location: RecipientLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Rejects queries that would produce a meaningless ranking.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.medicine_name.trim().is_empty() {
            return Err(AppError::InvalidQuery(
                "medicine name is required".to_string(),
            ));
        }
        if self.quantity < 0 {
            return Err(AppError::InvalidQuantity(self.quantity));
        }
        if let Some(location) = &self.location {
            if location.city.trim().is_empty() {
                return Err(AppError::InvalidLocation("city is blank".to_string()));
            }
            if location.state.trim().is_empty() {
                return Err(AppError::InvalidLocation("state is blank".to_string()));
            }
        }
        Ok(())
    }
}

/// Best matches using the default result size of 5.
pub fn find_best_matches<'a>(
    records: &'a [Donation],
    query: &MatchQuery,
) -> Result<Vec<&'a Donation>, AppError> {
    find_best_matches_with(records, query, &MatchConfig::default())
}

/// Best matches for `query`, most suitable first.
///
/// An empty vector means nothing qualified; errors are reserved for invalid
/// queries.
pub fn find_best_matches_with<'a>(
    records: &'a [Donation],
    query: &MatchQuery,
    config: &MatchConfig,
) -> Result<Vec<&'a Donation>, AppError> {
    query.validate()?;

    let needle = query.medicine_name.to_lowercase();
    // validated non-negative above
    let required = query.quantity as u64;

    let candidates: Vec<&Donation> = records
        .iter()
        .filter(|d| {
            d.name.to_lowercase().contains(&needle)
                && u64::from(d.quantity) >= required
                && d.is_available()
        })
        .collect();

    debug!(
        "Matcher: {} of {} donations pass the filter for '{}'",
        candidates.len(),
        records.len(),
        query.medicine_name
    );

    let by_expiry = merge_sort_by_key(&candidates, |d: &&Donation| d.expiry_millis());

    let mut ranked = match &query.location {
        Some(location) => {
            // false sorts before true, so nearby donations come first
            merge_sort_by_key(&by_expiry, |d: &&Donation| !d.is_near(location))
        }
        None => by_expiry,
    };

    ranked.truncate(config.max_results);
    Ok(ranked)
}

/// Matches plus alternative orderings of the same matches, as shown on the
/// recommendation screen.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation<'a> {
    pub matches: Vec<&'a Donation>,
    pub total_matches: usize,
    pub sorted_by_expiry: Vec<&'a Donation>,
    pub sorted_by_quantity: Vec<&'a Donation>,
}

impl<'a> Recommendation<'a> {
    pub fn build(
        records: &'a [Donation],
        query: &MatchQuery,
        config: &MatchConfig,
    ) -> Result<Self, AppError> {
        let matches = find_best_matches_with(records, query, config)?;
        let sorted_by_expiry = merge_sort_by_key(&matches, |d: &&Donation| d.expiry_millis());
        let sorted_by_quantity = partition_sort_by_key(&matches, |d: &&Donation| d.quantity);

        Ok(Self {
            total_matches: matches.len(),
            matches,
            sorted_by_expiry,
            sorted_by_quantity,
        })
    }
}
