//! Turn upstream items into aliases
//!
//! The upstream knows nothing about aliases, so the status, dates and flags are made up here.

use chrono::Days;
use chrono::NaiveDate;
use rand::Rng;

use crate::aliases::AliasRecord;
use crate::aliases::AliasStatus;
use crate::aliases::alias_email;
use crate::upstream::Item;

/// Number of title words used as the service name
const SERVICE_WORDS: usize = 3;

/// Oldest creation date, in days before today
const MAX_AGE_DAYS: u64 = 90;

/// Alias for an upstream item
pub fn alias_from_item<R: Rng>(
    item: &Item,
    domain: &str,
    today: NaiveDate,
    rng: &mut R,
) -> AliasRecord {
    let service = item
        .title
        .split(' ')
        .take(SERVICE_WORDS)
        .collect::<Vec<_>>()
        .join(" ");

    let note = item
        .body
        .lines()
        .next()
        .filter(|line| !line.is_empty())
        .map(ToString::to_string);

    let age = Days::new(rng.gen_range(0..MAX_AGE_DAYS));

    AliasRecord {
        id: item.id,
        email: alias_email(item.id, domain),
        service,
        status: random_status(rng),
        created: today.checked_sub_days(age).unwrap_or(today),
        note,
        forwarded: rng.gen_bool(0.7),
        leak_protected: rng.gen_bool(0.5),
    }
}

/// Aliases for all upstream items
pub fn aliases_from_items<R: Rng>(
    items: &[Item],
    domain: &str,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<AliasRecord> {
    items
        .iter()
        .map(|item| alias_from_item(item, domain, today, rng))
        .collect()
}

/// Mostly active, some paused and a few leaked
fn random_status<R: Rng>(rng: &mut R) -> AliasStatus {
    let roll = rng.r#gen::<f64>();

    if roll < 0.7 {
        AliasStatus::Active
    } else if roll < 0.9 {
        AliasStatus::Paused
    } else {
        AliasStatus::Leaked
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn item() -> Item {
        Item {
            id: 4,
            title: "eum et est occaecati".to_string(),
            body: "ullam et saepe reiciendis\nvoluptatem adipisci".to_string(),
        }
    }

    #[test]
    fn test_alias_from_item() {
        let mut rng = StdRng::seed_from_u64(1);
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

        let alias = alias_from_item(&item(), "canary.com", today, &mut rng);

        assert_eq!(4, alias.id);
        assert_eq!("alias4@canary.com", alias.email);
        assert_eq!("eum et est", alias.service);
        assert_eq!(Some("ullam et saepe reiciendis".to_string()), alias.note);
        assert!(alias.created <= today);
        assert!(alias.created > today - Days::new(MAX_AGE_DAYS));
    }

    #[test]
    fn test_short_title_and_empty_body() {
        let mut rng = StdRng::seed_from_u64(2);
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let item = Item {
            id: 9,
            title: "qui".to_string(),
            body: String::new(),
        };

        let alias = alias_from_item(&item, "canary.com", today, &mut rng);

        assert_eq!("qui", alias.service);
        assert_eq!(None, alias.note);
    }

    #[test]
    fn test_status_distribution() {
        let mut rng = StdRng::seed_from_u64(3);
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let items = (1..=1000)
            .map(|id| Item { id, ..item() })
            .collect::<Vec<_>>();

        let aliases = aliases_from_items(&items, "canary.com", today, &mut rng);
        let active = aliases.iter().filter(|alias| alias.is_active()).count();
        let leaked = aliases
            .iter()
            .filter(|alias| alias.status == AliasStatus::Leaked)
            .count();

        assert_eq!(1000, aliases.len());
        assert!((600..800).contains(&active));
        assert!((50..150).contains(&leaked));
    }
}
