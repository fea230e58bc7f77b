//! MediShare DB - Record store for donation listings.

pub mod repository;

pub use repository::{DonationRepository, InMemoryRepository};
