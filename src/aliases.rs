//! Aliases

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// Status of an alias
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasStatus {
    /// Mail is forwarded
    Active,

    /// Mail is held back by the user
    Paused,

    /// Address showed up in a data leak
    Leaked,
}

impl AliasStatus {
    /// Name as used in the API and for sorting
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Leaked => "leaked",
        }
    }

    /// Status after a toggle
    ///
    /// Only `active` and `paused` flip, a leaked alias stays leaked
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Paused,
            Self::Paused => Self::Active,
            Self::Leaked => Self::Leaked,
        }
    }
}

impl fmt::Display for AliasStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown alias status
#[derive(Debug, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r#"Unknown status "{}""#, self.0)
    }
}

impl FromStr for AliasStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "leaked" => Ok(Self::Leaked),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A disposable address forwarding to a real account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasRecord {
    /// Alias ID, unique within the dashboard
    pub id: i64,

    /// The generated address
    pub email: String,

    /// Service the alias is handed out to
    pub service: String,

    /// Current status
    pub status: AliasStatus,

    /// Creation date
    pub created: NaiveDate,

    /// Free text of the owner
    pub note: Option<String>,

    /// Is mail forwarded to the real inbox?
    pub forwarded: bool,

    /// Is leak protection enabled?
    pub leak_protected: bool,
}

impl AliasRecord {
    /// Is the alias currently forwarding?
    pub fn is_active(&self) -> bool {
        self.status == AliasStatus::Active
    }

    /// Does any of the searchable fields contain the already lowercased needle?
    pub fn matches(&self, needle: &str) -> bool {
        self.email.to_lowercase().contains(needle)
            || self.service.to_lowercase().contains(needle)
            || self
                .note
                .as_ref()
                .is_some_and(|note| note.to_lowercase().contains(needle))
    }
}

/// Build the address of an alias
pub fn alias_email(id: i64, domain: &str) -> String {
    format!("alias{id}@{domain}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AliasRecord {
        AliasRecord {
            id: 1,
            email: "John.Shopping@canary.com".to_string(),
            service: "Online Store".to_string(),
            status: AliasStatus::Active,
            created: NaiveDate::from_ymd_opt(2023, 6, 12).unwrap(),
            note: Some("For shopping websites".to_string()),
            forwarded: true,
            leak_protected: true,
        }
    }

    #[test]
    fn test_toggled() {
        assert_eq!(AliasStatus::Paused, AliasStatus::Active.toggled());
        assert_eq!(AliasStatus::Active, AliasStatus::Paused.toggled());
        assert_eq!(AliasStatus::Leaked, AliasStatus::Leaked.toggled());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(Ok(AliasStatus::Leaked), "leaked".parse());
        assert_eq!(
            Err(UnknownStatus("Active".to_string())),
            "Active".parse::<AliasStatus>()
        );
    }

    #[test]
    fn test_matches() {
        let record = record();

        assert!(record.matches("john.shopping"));
        assert!(record.matches("store"));
        assert!(record.matches("websites"));
        assert!(!record.matches("canary.org"));

        let record = AliasRecord {
            note: None,
            ..record
        };
        assert!(!record.matches("websites"));
    }

    #[test]
    fn test_alias_email() {
        assert_eq!("alias101@canary.com", alias_email(101, "canary.com"));
    }
}
