//! Demo data
//!
//! Used whenever the upstream API can not be reached

use chrono::NaiveDate;

use crate::aliases::AliasRecord;
use crate::aliases::AliasStatus;
use crate::aliases::AliasStatus::Active;
use crate::aliases::AliasStatus::Leaked;
use crate::aliases::AliasStatus::Paused;

/// ID, name, service, status, creation date, note, forwarded and leak protected
const DEMO_ROWS: [(i64, &str, &str, AliasStatus, &str, &str, bool, bool); 8] = [
    (1, "shopping", "Online Store", Active, "2023-06-12", "For shopping websites", true, true),
    (2, "news", "Newsletter", Active, "2023-05-28", "News subscriptions", true, false),
    (3, "social", "Social Media", Leaked, "2023-03-15", "Social networks", false, true),
    (4, "gaming", "Gaming Platform", Active, "2023-07-03", "Gaming accounts", true, true),
    (5, "finance", "Banking Service", Paused, "2023-04-22", "Financial institutions", true, true),
    (6, "work", "Professional Network", Active, "2023-05-10", "Work-related accounts", true, false),
    (7, "travel", "Travel Booking", Active, "2023-06-30", "Travel websites", true, true),
    (8, "health", "Fitness App", Paused, "2023-04-05", "Health and fitness", false, false),
];

/// The fixed demo aliases
pub fn demo_aliases() -> Vec<AliasRecord> {
    DEMO_ROWS
        .into_iter()
        .filter_map(|(id, name, service, status, created, note, forwarded, leak_protected)| {
            Some(AliasRecord {
                id,
                email: format!("john.{name}@canary.com"),
                service: service.to_string(),
                status,
                created: created.parse::<NaiveDate>().ok()?,
                note: Some(note.to_string()),
                forwarded,
                leak_protected,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_demo_aliases() {
        let aliases = demo_aliases();

        assert_eq!(8, aliases.len());

        let ids = aliases.iter().map(|alias| alias.id).collect::<HashSet<_>>();
        assert_eq!(8, ids.len());

        assert_eq!("john.shopping@canary.com", aliases[0].email);
        assert_eq!(AliasStatus::Leaked, aliases[2].status);
    }
}
