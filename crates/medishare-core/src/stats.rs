//! Inventory statistics over the donation catalog.

use serde::Serialize;

use crate::models::{Donation, MedicineStatus};

/// Donation counts per status plus the quantity that reached recipients.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryStats {
    pub total_donations: usize,
    pub available: usize,
    pub claimed: usize,
    pub expired: usize,
    pub distributed: usize,
    /// Units of medicine in distributed donations, i.e. waste avoided.
    pub waste_reduced: u64,
}

impl InventoryStats {
    /// Creates a new empty stats tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one donation.
    pub fn record(&mut self, donation: &Donation) {
        self.total_donations += 1;
        match donation.status {
            MedicineStatus::Available => self.available += 1,
            MedicineStatus::Claimed => self.claimed += 1,
            MedicineStatus::Expired => self.expired += 1,
            MedicineStatus::Distributed => {
                self.distributed += 1;
                self.waste_reduced += u64::from(donation.quantity);
            }
        }
    }

    pub fn from_records(records: &[Donation]) -> Self {
        let mut stats = Self::new();
        for donation in records {
            stats.record(donation);
        }
        stats
    }

    /// Share of donations that were distributed, 0.0 for an empty catalog.
    pub fn distribution_rate(&self) -> f64 {
        if self.total_donations == 0 {
            return 0.0;
        }
        self.distributed as f64 / self.total_donations as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use chrono::Utc;

    fn donation(status: MedicineStatus, quantity: u32) -> Donation {
        Donation {
            id: "id".to_string(),
            donor_id: "donor".to_string(),
            name: "Aspirin".to_string(),
            description: String::new(),
            quantity,
            unit: "tablets".to_string(),
            expiry_date: Utc::now(),
            batch_number: String::new(),
            manufacturer: String::new(),
            status,
            location: Location {
                city: "Mumbai".to_string(),
                state: "Maharashtra".to_string(),
                pincode: String::new(),
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_stats_default() {
        let stats = InventoryStats::new();
        assert_eq!(stats.total_donations, 0);
        assert_eq!(stats.waste_reduced, 0);
        assert_eq!(stats.distribution_rate(), 0.0);
    }

    #[test]
    fn test_stats_counts_each_status() {
        let records = vec![
            donation(MedicineStatus::Available, 10),
            donation(MedicineStatus::Available, 5),
            donation(MedicineStatus::Claimed, 7),
            donation(MedicineStatus::Expired, 3),
            donation(MedicineStatus::Distributed, 40),
            donation(MedicineStatus::Distributed, 60),
        ];

        let stats = InventoryStats::from_records(&records);
        assert_eq!(stats.total_donations, 6);
        assert_eq!(stats.available, 2);
        assert_eq!(stats.claimed, 1);
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.distributed, 2);
        assert_eq!(stats.waste_reduced, 100);
    }

    #[test]
    fn test_distribution_rate() {
        let records = vec![
            donation(MedicineStatus::Distributed, 1),
            donation(MedicineStatus::Available, 1),
            donation(MedicineStatus::Available, 1),
            donation(MedicineStatus::Available, 1),
        ];
        let stats = InventoryStats::from_records(&records);
        assert!((stats.distribution_rate() - 0.25).abs() < f64::EPSILON);
    }
}
