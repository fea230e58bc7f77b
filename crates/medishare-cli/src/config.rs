use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use medishare_core::MedicineStatus;
use std::path::PathBuf;

/// CLI configuration parsed from command line arguments and environment variables
#[derive(Parser, Debug)]
#[command(name = "medishare")]
#[command(
    author,
    version,
    about = "Match, rank and prioritize donated medicines"
)]
#[command(after_help = "Examples:
  medishare --store donations.json recommend Aspirin --quantity 20 --city Mumbai --state Maharashtra
  medishare --store donations.json priority --limit 5
  medishare --store donations.json sorted --by quantity --format json
  medishare --store donations.json stats")]
pub struct Config {
    /// JSON file holding the donation records
    #[arg(long, env = "MEDISHARE_STORE", value_name = "PATH")]
    pub store: PathBuf,

    /// Engine configuration file (defaults to <config dir>/medishare/medishare.toml)
    #[arg(long, env = "MEDISHARE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Reference time as RFC 3339, e.g. 2025-06-01T00:00:00Z (defaults to now)
    #[arg(long, value_name = "TIMESTAMP")]
    pub now: Option<DateTime<Utc>>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all donations in a deterministic order
    Sorted {
        /// Ordering to apply
        #[arg(long, value_enum, default_value = "expiry")]
        by: SortKey,
    },
    /// Rank available donations by urgency, expiring soonest first
    Priority {
        /// Number of entries to show (defaults to dashboard.urgent_limit)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Show the full ranking instead of the top entries
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },
    /// Find the best donations for a recipient's request
    #[command(after_help = "Example: medishare recommend insulin --quantity 5 --city Pune --state Maharashtra")]
    Recommend {
        /// Medicine name, matched as a case-insensitive substring
        medicine: String,
        /// Minimum quantity a single donation must hold
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        quantity: i64,
        /// Recipient city, preferred when ranking
        #[arg(long, requires = "state")]
        city: Option<String>,
        /// Recipient state, preferred when ranking
        #[arg(long, requires = "city")]
        state: Option<String>,
    },
    /// List available donations expiring soon
    Expiring {
        /// Window in days (defaults to dashboard.expiring_window_days)
        #[arg(short, long)]
        days: Option<i64>,
    },
    /// Search donations by name, description, manufacturer, city or status
    Search {
        /// Free-text query
        query: Option<String>,
        /// City substring
        #[arg(long)]
        city: Option<String>,
        /// Exact status: available, claimed, expired or distributed
        #[arg(long)]
        status: Option<MedicineStatus>,
    },
    /// List a new donation and save the store
    #[command(after_help = "Example: medishare add Aspirin --donor user-1 --quantity 50 --unit tablets --expiry 2026-12-31T00:00:00Z --city Mumbai --state Maharashtra")]
    Add {
        /// Medicine name
        name: String,
        /// Id of the donating user
        #[arg(long, env = "MEDISHARE_DONOR")]
        donor: String,
        /// Number of units donated
        #[arg(short, long)]
        quantity: u32,
        /// Unit of measure, e.g. tablets or vials
        #[arg(short, long)]
        unit: String,
        /// Expiry as RFC 3339, e.g. 2026-12-31T00:00:00Z
        #[arg(long, value_name = "TIMESTAMP")]
        expiry: DateTime<Utc>,
        /// City where the donation is held
        #[arg(long)]
        city: String,
        /// State where the donation is held
        #[arg(long)]
        state: String,
        #[arg(long, default_value = "")]
        pincode: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        batch: String,
        #[arg(long, default_value = "")]
        manufacturer: String,
    },
    /// Change the status of a donation and save the store
    SetStatus {
        /// Donation id
        id: String,
        /// New status
        status: MedicineStatus,
    },
    /// Show inventory statistics
    Stats,
}

/// Orderings offered by `sorted`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Soonest expiry first (stable)
    Expiry,
    /// Largest quantity first
    Quantity,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    Text,
    /// Pretty-printed JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Config::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend() {
        let config = Config::try_parse_from([
            "medishare",
            "--store",
            "donations.json",
            "recommend",
            "Aspirin",
            "--quantity",
            "20",
            "--city",
            "Mumbai",
            "--state",
            "Maharashtra",
        ])
        .unwrap();

        match config.command {
            Command::Recommend {
                medicine,
                quantity,
                city,
                state,
            } => {
                assert_eq!(medicine, "Aspirin");
                assert_eq!(quantity, 20);
                assert_eq!(city.as_deref(), Some("Mumbai"));
                assert_eq!(state.as_deref(), Some("Maharashtra"));
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_negative_quantity_reaches_the_engine() {
        let config = Config::try_parse_from([
            "medishare",
            "--store",
            "s.json",
            "recommend",
            "Aspirin",
            "--quantity",
            "-3",
        ])
        .unwrap();
        assert!(matches!(
            config.command,
            Command::Recommend { quantity: -3, .. }
        ));
    }

    #[test]
    fn test_city_requires_state() {
        let result = Config::try_parse_from([
            "medishare",
            "--store",
            "s.json",
            "recommend",
            "Aspirin",
            "--city",
            "Mumbai",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_now_and_format() {
        let config = Config::try_parse_from([
            "medishare",
            "--store",
            "s.json",
            "--now",
            "2025-06-01T00:00:00Z",
            "sorted",
            "--by",
            "quantity",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.now.unwrap().to_rfc3339(), "2025-06-01T00:00:00+00:00");
        assert_eq!(config.format, OutputFormat::Json);
        assert!(matches!(
            config.command,
            Command::Sorted {
                by: SortKey::Quantity
            }
        ));
    }

    #[test]
    fn test_parse_add() {
        let config = Config::try_parse_from([
            "medishare",
            "--store",
            "s.json",
            "add",
            "Insulin",
            "--donor",
            "user-2",
            "--quantity",
            "5",
            "--unit",
            "vials",
            "--expiry",
            "2026-12-31T00:00:00Z",
            "--city",
            "Pune",
            "--state",
            "Maharashtra",
        ])
        .unwrap();

        match config.command {
            Command::Add {
                name,
                donor,
                quantity,
                expiry,
                pincode,
                ..
            } => {
                assert_eq!(name, "Insulin");
                assert_eq!(donor, "user-2");
                assert_eq!(quantity, 5);
                assert_eq!(expiry.to_rfc3339(), "2026-12-31T00:00:00+00:00");
                assert!(pincode.is_empty());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_add_requires_expiry() {
        let result = Config::try_parse_from([
            "medishare",
            "--store",
            "s.json",
            "add",
            "Insulin",
            "--donor",
            "user-2",
            "--quantity",
            "5",
            "--unit",
            "vials",
            "--city",
            "Pune",
            "--state",
            "Maharashtra",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_status_argument() {
        let config = Config::try_parse_from([
            "medishare",
            "--store",
            "s.json",
            "set-status",
            "med-1",
            "distributed",
        ])
        .unwrap();
        assert!(matches!(
            config.command,
            Command::SetStatus {
                status: MedicineStatus::Distributed,
                ..
            }
        ));

        let bad = Config::try_parse_from([
            "medishare",
            "--store",
            "s.json",
            "set-status",
            "med-1",
            "lost",
        ]);
        assert!(bad.is_err());
    }
}
