use thiserror::Error;

/// Application-wide error types.
///
/// Ranking and matching are pure computations, so most variants describe
/// input that was rejected before any ordering was produced. An empty
/// result is never an error: "no matches" is `Ok(vec![])`.
///
/// # Error Conversion
///
/// Errors from the I/O edges convert automatically via `#[from]`:
/// - `serde_json::Error` → `AppError::SerializationError`
/// - `std::io::Error` → `AppError::IoError`
/// - `toml::de::Error` → `AppError::ConfigError`
///
/// # Examples
///
/// ```
/// use medishare_core::error::AppError;
///
/// fn example() -> Result<(), AppError> {
///     Err(AppError::InvalidQuantity(-1))
/// }
///
/// assert!(example().is_err());
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// A required quantity below zero.
    ///
    /// Ranking with a negative requirement would silently match everything,
    /// so the matcher refuses it instead.
    #[error("Invalid quantity: {0} (must be zero or greater)")]
    InvalidQuantity(i64),

    /// Recipient location with a blank city or state.
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// Malformed query or filter input.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Donation not found in the record store.
    #[error("Medicine not found: {0}")]
    MedicineNotFound(String),

    /// JSON serialization or deserialization failed.
    ///
    /// Typically raised while reading or writing the record store file.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Reading or writing a file failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration file could not be parsed or holds inconsistent values.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic application error for cases not covered by specific variants.
    #[error("Error: {0}")]
    Generic(String),
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl AppError {
    /// Returns a user-friendly error message suitable for CLI output.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidQuantity(qty) => {
                format!(
                    "Quantity {} is not valid.\n   Ask for at least 0 units, e.g. --quantity 10",
                    qty
                )
            }
            AppError::InvalidLocation(msg) => {
                format!(
                    "Invalid location: {}\n   Pass both --city and --state, e.g. --city Mumbai --state Maharashtra",
                    msg
                )
            }
            AppError::MedicineNotFound(id) => {
                format!(
                    "No medicine with id '{}'.\n   Try: medishare search to list known ids",
                    id
                )
            }
            AppError::IoError(e) => {
                if e.kind() == std::io::ErrorKind::NotFound {
                    "Record store file not found.\n   Set MEDISHARE_STORE or pass --store <PATH>"
                        .to_string()
                } else {
                    format!("IO error: {}", e)
                }
            }
            AppError::SerializationError(e) => {
                format!(
                    "The record store file is not valid JSON: {}\n   Check quantities are non-negative and dates are RFC 3339.",
                    e
                )
            }
            _ => self.to_string(),
        }
    }

    /// Returns true if the error was caused by caller input rather than the environment.
    ///
    /// # Examples
    ///
    /// ```
    /// use medishare_core::error::AppError;
    ///
    /// assert!(AppError::InvalidQuantity(-5).is_input_error());
    /// assert!(!AppError::Generic("boom".to_string()).is_input_error());
    /// ```
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidQuantity(_)
                | AppError::InvalidLocation(_)
                | AppError::InvalidQuery(_)
                | AppError::MedicineNotFound(_)
        )
    }
}
