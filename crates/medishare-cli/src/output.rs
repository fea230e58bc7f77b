//! Text and JSON rendering for command results.

use chrono::{DateTime, Utc};
use medishare_core::{
    days_until_expiry, Donation, InventoryStats, PrioritizedMedicine, Recommendation,
};
use serde::Serialize;
use std::fmt::Write;

/// Pretty-printed JSON for any serializable result.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Numbered listing of donations, one block per donation.
pub fn render_donations(donations: &[&Donation], now: DateTime<Utc>) -> String {
    if donations.is_empty() {
        return "No donations found.\n".to_string();
    }

    let mut out = String::new();
    for (i, donation) in donations.iter().enumerate() {
        let days = days_until_expiry(donation.expiry_date, now);
        let expiry_note = if days < 0 {
            "expired".to_string()
        } else {
            format!("in {} days", days)
        };

        let _ = writeln!(
            out,
            "{}. {} - {} {} [{}]",
            i + 1,
            donation.name,
            donation.quantity,
            donation.unit,
            donation.status
        );
        let _ = writeln!(
            out,
            "   expires {} ({})",
            donation.expiry_date.format("%Y-%m-%d"),
            expiry_note
        );
        let _ = writeln!(
            out,
            "   {}, {} | id {}",
            donation.location.city, donation.location.state, donation.id
        );
        if !donation.description.trim().is_empty() {
            let _ = writeln!(out, "   {}", truncate_text(&donation.description, 80));
        }
    }
    out
}

/// Urgency ranking, one line per medicine with its priority.
pub fn render_priorities(ranked: &[PrioritizedMedicine]) -> String {
    if ranked.is_empty() {
        return "No urgent medicines at the moment.\n".to_string();
    }

    let mut out = String::new();
    for (i, item) in ranked.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. [{:>3}] {} ({})",
            i + 1,
            item.priority,
            item.name,
            item.medicine_id
        );
    }
    out
}

pub fn render_recommendation(rec: &Recommendation<'_>, now: DateTime<Utc>) -> String {
    if rec.matches.is_empty() {
        return "No matching donations.\nTry a shorter name or a smaller quantity.\n".to_string();
    }

    let mut out = format!("Found {} matching donations:\n\n", rec.total_matches);
    out.push_str(&render_donations(&rec.matches, now));
    out
}

pub fn render_stats(stats: &InventoryStats) -> String {
    let mut out = String::from("\nInventory Statistics\n\n");
    let _ = writeln!(out, "  Total donations:       {}", stats.total_donations);
    let _ = writeln!(out, "  Available:             {}", stats.available);
    let _ = writeln!(out, "  Claimed:               {}", stats.claimed);
    let _ = writeln!(out, "  Expired:               {}", stats.expired);
    let _ = writeln!(out, "  Distributed:           {}", stats.distributed);
    let _ = writeln!(out, "  Units distributed:     {}", stats.waste_reduced);
    let _ = writeln!(
        out,
        "  Distribution rate:     {:.0}%",
        stats.distribution_rate() * 100.0
    );
    out
}

/// Collapse whitespace and cut to `max_chars` characters, adding an ellipsis if needed
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.chars().count() <= max_chars {
        cleaned
    } else {
        let cut: String = cleaned.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use medishare_core::{Location, MedicineStatus};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn donation() -> Donation {
        Donation {
            id: "med-1".to_string(),
            donor_id: "user-1".to_string(),
            name: "Aspirin".to_string(),
            description: "Pain reliever\nand   fever reducer".to_string(),
            quantity: 50,
            unit: "tablets".to_string(),
            expiry_date: now() + Duration::days(10),
            batch_number: String::new(),
            manufacturer: String::new(),
            status: MedicineStatus::Available,
            location: Location {
                city: "Mumbai".to_string(),
                state: "Maharashtra".to_string(),
                pincode: String::new(),
            },
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn test_render_donations() {
        let d = donation();
        let text = render_donations(&[&d], now());
        assert!(text.contains("1. Aspirin - 50 tablets [available]"));
        assert!(text.contains("expires 2025-06-11 (in 10 days)"));
        assert!(text.contains("Mumbai, Maharashtra | id med-1"));
        assert!(text.contains("Pain reliever and fever reducer"));
    }

    #[test]
    fn test_render_empty_lists() {
        assert_eq!(render_donations(&[], now()), "No donations found.\n");
        assert!(render_priorities(&[]).contains("No urgent medicines"));
    }

    #[test]
    fn test_render_priorities() {
        let ranked = vec![PrioritizedMedicine {
            medicine_id: "med-1".to_string(),
            name: "Aspirin".to_string(),
            priority: 50,
        }];
        assert_eq!(render_priorities(&ranked), "1. [ 50] Aspirin (med-1)\n");
    }

    #[test]
    fn test_render_stats() {
        let stats = InventoryStats {
            total_donations: 4,
            distributed: 1,
            waste_reduced: 30,
            ..Default::default()
        };
        let text = render_stats(&stats);
        assert!(text.contains("Units distributed:     30"));
        assert!(text.contains("Distribution rate:     25%"));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a  b\nc", 10), "a b c");
        assert_eq!(truncate_text("abcdefghij", 4), "abcd...");
        // multi-byte characters are never split
        assert_eq!(truncate_text("ééééé", 2), "éé...");
    }

    #[test]
    fn test_to_json() {
        let d = donation();
        let json = to_json(&[&d]).unwrap();
        assert!(json.contains("\"status\": \"available\""));
    }
}
