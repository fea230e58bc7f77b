use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use dotenvy::dotenv;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use medishare_cli::output::{
    render_donations, render_priorities, render_recommendation, render_stats, to_json,
};
use medishare_cli::{Command, Config, OutputFormat, SortKey};
use medishare_core::{
    expiring_within, is_rankable, load_engine_config, rank_by_urgency, search,
    sort_by_expiry_ascending, sort_by_quantity_descending, top_urgent, AppError, Donation,
    EngineConfig, InventoryStats, Location, MatchQuery, MedicineStatus, NewDonation,
    RecipientLocation, Recommendation, SearchFilter,
};
use medishare_db::{DonationRepository, InMemoryRepository};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Parse command line arguments
    let config = Config::parse();

    // Setup logging (stderr to keep stdout clean for JSON output)
    let level = if config.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    if let Err(err) = run(config) {
        match err.downcast_ref::<AppError>() {
            Some(app_err) => eprintln!("\n{}\n", app_err.user_message()),
            None => eprintln!("\nError: {:#}\n", err),
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run(config: Config) -> anyhow::Result<()> {
    let engine = load_engine_config(config.config.as_deref())?;
    let mut repo = InMemoryRepository::from_json_file(&config.store)?;
    let now = config.now.unwrap_or_else(Utc::now);
    let format = config.format;
    debug!("Reference time: {}", now.to_rfc3339());

    match config.command {
        Command::Sorted { by } => {
            sorted(&repo, by, format, now)?;
        }
        Command::Priority { limit, all } => {
            let limit = if all {
                None
            } else {
                Some(limit.unwrap_or(engine.dashboard.urgent_limit))
            };
            priority(&repo, &engine, limit, format, now)?;
        }
        Command::Recommend {
            medicine,
            quantity,
            city,
            state,
        } => {
            let mut query = MatchQuery::new(medicine, quantity);
            if let (Some(city), Some(state)) = (city, state) {
                query = query.near(RecipientLocation::new(city, state));
            }
            recommend(&repo, &engine, &query, format, now)?;
        }
        Command::Expiring { days } => {
            let days = days.unwrap_or(engine.dashboard.expiring_window_days);
            expiring(&repo, days, format, now)?;
        }
        Command::Search {
            query,
            city,
            status,
        } => {
            let filter = SearchFilter {
                query,
                city,
                status,
            };
            search_donations(&repo, &filter, format, now)?;
        }
        Command::Add {
            name,
            donor,
            quantity,
            unit,
            expiry,
            city,
            state,
            pincode,
            description,
            batch,
            manufacturer,
        } => {
            let new = NewDonation {
                donor_id: donor,
                name,
                description,
                quantity,
                unit,
                expiry_date: expiry,
                batch_number: batch,
                manufacturer,
                location: Location {
                    city,
                    state,
                    pincode,
                },
            };
            add_donation(&mut repo, &config.store, new, format, now)?;
        }
        Command::SetStatus { id, status } => {
            set_status(&mut repo, &config.store, &id, status, format, now)?;
        }
        Command::Stats => {
            show_stats(&repo, format)?;
        }
    }

    Ok(())
}

/// List every donation sorted by expiry or quantity
fn sorted(
    repo: &impl DonationRepository,
    by: SortKey,
    format: OutputFormat,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let records = repo.list_all();
    let sorted = match by {
        SortKey::Expiry => sort_by_expiry_ascending(&records),
        SortKey::Quantity => sort_by_quantity_descending(&records),
    };
    info!("Sorted {} donations by {:?}", sorted.len(), by);

    print_donations(&sorted.iter().collect::<Vec<_>>(), format, now)
}

/// Rank available, unexpired donations by urgency
fn priority(
    repo: &impl DonationRepository,
    engine: &EngineConfig,
    limit: Option<usize>,
    format: OutputFormat,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let records = repo.list_available();
    let ranked = match limit {
        Some(limit) => top_urgent(&records, now, &engine.urgency, limit),
        None => {
            let rankable: Vec<Donation> = records
                .into_iter()
                .filter(|d| is_rankable(d, now))
                .collect();
            rank_by_urgency(&rankable, now, &engine.urgency)
        }
    };
    info!("Ranked {} donations by urgency", ranked.len());

    match format {
        OutputFormat::Json => println!("{}", to_json(&ranked)?),
        OutputFormat::Text => print!("{}", render_priorities(&ranked)),
    }
    Ok(())
}

/// Find the best donations for a recipient request
fn recommend(
    repo: &impl DonationRepository,
    engine: &EngineConfig,
    query: &MatchQuery,
    format: OutputFormat,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    info!(
        "Matching '{}' (quantity >= {})",
        query.medicine_name, query.quantity
    );

    let available = repo.list_available();
    let recommendation = Recommendation::build(&available, query, &engine.matching)?;

    match format {
        OutputFormat::Json => println!("{}", to_json(&recommendation)?),
        OutputFormat::Text => print!("{}", render_recommendation(&recommendation, now)),
    }
    Ok(())
}

/// List available donations expiring within the window
fn expiring(
    repo: &impl DonationRepository,
    days: i64,
    format: OutputFormat,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let records = repo.list_all();
    let expiring = expiring_within(&records, now, days)?;
    info!("{} donations expire within {} days", expiring.len(), days);

    print_donations(&expiring, format, now)
}

/// Search donations by text, city and status
fn search_donations(
    repo: &impl DonationRepository,
    filter: &SearchFilter,
    format: OutputFormat,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let records = repo.list_all();
    let found = search(&records, filter);
    info!("Search matched {} of {} donations", found.len(), records.len());

    print_donations(&found, format, now)
}

/// List a new donation and write the store back
fn add_donation(
    repo: &mut InMemoryRepository,
    store: &std::path::Path,
    new: NewDonation,
    format: OutputFormat,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    if new.expiry_date <= now {
        return Err(AppError::InvalidQuery(format!(
            "{} has already expired ({})",
            new.name,
            new.expiry_date.to_rfc3339()
        ))
        .into());
    }

    let created = repo.create(new)?;
    repo.save_json_file(store)?;
    info!("Listed donation {} ({})", created.id, created.name);

    print_donations(&[&created], format, now)
}

/// Update one donation's status and write the store back
fn set_status(
    repo: &mut InMemoryRepository,
    store: &std::path::Path,
    id: &str,
    status: MedicineStatus,
    format: OutputFormat,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let updated = repo.set_status(id, status)?;
    repo.save_json_file(store)?;
    info!("Donation {} is now {}", updated.id, updated.status);

    print_donations(&[&updated], format, now)
}

/// Show inventory statistics
fn show_stats(repo: &impl DonationRepository, format: OutputFormat) -> anyhow::Result<()> {
    let stats = InventoryStats::from_records(&repo.list_all());

    match format {
        OutputFormat::Json => println!("{}", to_json(&stats)?),
        OutputFormat::Text => println!("{}", render_stats(&stats)),
    }
    Ok(())
}

fn print_donations(
    donations: &[&Donation],
    format: OutputFormat,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(donations)?),
        OutputFormat::Text => print!("{}", render_donations(donations, now)),
    }
    Ok(())
}
