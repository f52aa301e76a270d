//! Leak check
//!
//! There is no breach database behind this, the verdict is a keyword check and a coin flip.

use serde::Serialize;

/// Words that always count as leaked
const LEAKED_KEYWORDS: [&str; 2] = ["leak", "test"];

/// Rolls above this count as leaked
const LEAK_THRESHOLD: f64 = 0.7;

/// Outcome of a leak check
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Found in a recent leak
    Leaked,

    /// Nothing found
    Clean,
}

impl Verdict {
    pub fn is_leaked(self) -> bool {
        self == Self::Leaked
    }

    /// Message shown with the verdict
    pub fn message(self, address: &str) -> String {
        match self {
            Self::Leaked => format!("Warning! {address} was found in recent data leaks."),
            Self::Clean => format!("Good news! No leaks found for {address}."),
        }
    }
}

/// Decide on the verdict for an address, given a roll in `0.0..1.0`
pub fn assess(address: &str, roll: f64) -> Verdict {
    let keyword = LEAKED_KEYWORDS
        .iter()
        .any(|keyword| address.contains(keyword));

    if keyword || roll > LEAK_THRESHOLD {
        Verdict::Leaked
    } else {
        Verdict::Clean
    }
}
