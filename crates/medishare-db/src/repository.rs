//! Donation record store.
//!
//! The ranking engine never touches the store directly. Handlers fetch a
//! snapshot through [`DonationRepository`] and pass the slice to
//! `medishare_core`.
//!
//! [`InMemoryRepository`] is a plain vector keyed by id. It can be seeded
//! from and written back to a JSON file, with no durability guarantees and
//! no write isolation beyond Rust's `&mut` borrow.

use chrono::Utc;
use medishare_core::error::AppError;
use medishare_core::models::{Donation, MedicineStatus, NewDonation};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// Read/update access to donation records.
pub trait DonationRepository {
    /// Every donation, in store order.
    fn list_all(&self) -> Vec<Donation>;

    /// Donations whose status is `available`, in store order.
    fn list_available(&self) -> Vec<Donation> {
        self.list_all()
            .into_iter()
            .filter(Donation::is_available)
            .collect()
    }

    /// Looks up one donation. `Ok(None)` when the id is unknown.
    fn get_by_id(&self, id: &str) -> Result<Option<Donation>, AppError>;

    /// Replaces the stored donation with the same id.
    ///
    /// Fails with [`AppError::MedicineNotFound`] if no such id exists.
    fn update(&mut self, donation: Donation) -> Result<Donation, AppError>;
}

/// Mutable in-process donation store.
///
/// # Examples
///
/// ```
/// use medishare_db::{DonationRepository, InMemoryRepository};
///
/// let repo = InMemoryRepository::new();
/// assert!(repo.list_all().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    donations: Vec<Donation>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_donations(donations: Vec<Donation>) -> Self {
        Self { donations }
    }

    /// Loads a store from a JSON array of donations.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)?;
        let donations: Vec<Donation> = serde_json::from_str(&content)?;
        info!(
            "Loaded {} donations from {}",
            donations.len(),
            path.display()
        );
        Ok(Self { donations })
    }

    /// Writes the current contents back as a pretty-printed JSON array.
    pub fn save_json_file(&self, path: &Path) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(&self.donations)?;
        fs::write(path, json)?;
        info!("Saved {} donations to {}", self.donations.len(), path.display());
        Ok(())
    }

    /// Lists a new donation, assigning a fresh id and `available` status.
    ///
    /// The input is validated first; nothing is stored when it is rejected.
    pub fn create(&mut self, new: NewDonation) -> Result<Donation, AppError> {
        new.validate()?;
        let now = Utc::now();
        let donation = Donation {
            id: Uuid::new_v4().to_string(),
            donor_id: new.donor_id,
            name: new.name,
            description: new.description,
            quantity: new.quantity,
            unit: new.unit,
            expiry_date: new.expiry_date,
            batch_number: new.batch_number,
            manufacturer: new.manufacturer,
            status: MedicineStatus::Available,
            location: new.location,
            created_at: now,
            updated_at: now,
        };
        debug!("Created donation {} ({})", donation.id, donation.name);
        self.donations.push(donation.clone());
        Ok(donation)
    }

    /// Sets the status of one donation and bumps its `updated_at`.
    pub fn set_status(&mut self, id: &str, status: MedicineStatus) -> Result<Donation, AppError> {
        let mut donation = self
            .get_by_id(id)?
            .ok_or_else(|| AppError::MedicineNotFound(id.to_string()))?;
        donation.status = status;
        self.update(donation)
    }

    pub fn len(&self) -> usize {
        self.donations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.donations.is_empty()
    }
}

impl DonationRepository for InMemoryRepository {
    fn list_all(&self) -> Vec<Donation> {
        self.donations.clone()
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Donation>, AppError> {
        Ok(self.donations.iter().find(|d| d.id == id).cloned())
    }

    fn update(&mut self, mut donation: Donation) -> Result<Donation, AppError> {
        let slot = self
            .donations
            .iter_mut()
            .find(|d| d.id == donation.id)
            .ok_or_else(|| AppError::MedicineNotFound(donation.id.clone()))?;

        donation.updated_at = Utc::now();
        *slot = donation.clone();
        debug!("Updated donation {} -> {}", donation.id, donation.status);
        Ok(donation)
    }
}
