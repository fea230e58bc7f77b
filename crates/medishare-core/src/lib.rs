//! MediShare Core - Matching, ranking and prioritization for medicine donations.
//!
//! Everything here is synchronous and pure: callers fetch donations from the
//! record store and hand the engine a slice. Nothing is cached between calls.

pub mod catalog;
pub mod config;
pub mod error;
pub mod geo;
pub mod graph;
pub mod matcher;
pub mod models;
pub mod priority;
pub mod sort;
pub mod stats;
pub mod urgency;

pub use catalog::{expiring_within, expiry_horizon, search, SearchFilter};
pub use config::{
    default_config_path, load_engine_config, DashboardConfig, EngineConfig, MatchConfig,
    UrgencyConfig,
};
pub use error::AppError;
pub use graph::MedicineGraph;
pub use matcher::{find_best_matches, find_best_matches_with, MatchQuery, Recommendation};
pub use models::{
    Donation, Location, MedicineStatus, NewDonation, PrioritizedMedicine, RecipientLocation,
};
pub use priority::PriorityQueue;
pub use sort::{binary_search_by_expiry, sort_by_expiry_ascending, sort_by_quantity_descending};
pub use stats::InventoryStats;
pub use urgency::{classify, days_until_expiry, is_rankable, rank_by_urgency, top_urgent};
