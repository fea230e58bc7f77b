//! Urgency triage: days-until-expiry mapped onto priority bands.
//!
//! The classifier does not look at status. Callers drop unavailable or
//! already-expired donations first, see [`is_rankable`].

use chrono::{DateTime, Utc};

use crate::config::UrgencyConfig;
use crate::models::{Donation, PrioritizedMedicine};
use crate::priority::PriorityQueue;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days from `now` until `expiry`, rounded down.
///
/// A donation expiring in 7.9 days reports 7. Past expiries are negative.
pub fn days_until_expiry(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let delta = expiry.timestamp_millis() - now.timestamp_millis();
    delta.div_euclid(MILLIS_PER_DAY)
}

/// Maps days-until-expiry onto a priority band.
pub fn classify(days: i64, config: &UrgencyConfig) -> u32 {
    if days <= config.critical_days {
        config.critical_priority
    } else if days <= config.high_days {
        config.high_priority
    } else if days <= config.medium_days {
        config.medium_priority
    } else {
        config.low_priority
    }
}

/// True for donations that belong in an urgency ranking: available and not
/// yet past their expiry.
pub fn is_rankable(record: &Donation, now: DateTime<Utc>) -> bool {
    record.is_available() && record.expiry_millis() > now.timestamp_millis()
}

/// Ranks donations by urgency, most urgent first.
///
/// Equal priorities keep their input order.
pub fn rank_by_urgency(
    records: &[Donation],
    now: DateTime<Utc>,
    config: &UrgencyConfig,
) -> Vec<PrioritizedMedicine> {
    let mut queue: PriorityQueue<PrioritizedMedicine> = records
        .iter()
        .map(|record| {
            let priority = classify(days_until_expiry(record.expiry_date, now), config);
            let item = PrioritizedMedicine {
                medicine_id: record.id.clone(),
                name: record.name.clone(),
                priority,
            };
            (item, priority)
        })
        .collect();

    queue.drain_ordered()
}

/// The `limit` most urgent donations among those that are still rankable.
pub fn top_urgent(
    records: &[Donation],
    now: DateTime<Utc>,
    config: &UrgencyConfig,
    limit: usize,
) -> Vec<PrioritizedMedicine> {
    let candidates: Vec<Donation> = records
        .iter()
        .filter(|record| is_rankable(record, now))
        .cloned()
        .collect();

    let mut ranked = rank_by_urgency(&candidates, now, config);
    ranked.truncate(limit);
    ranked
}
