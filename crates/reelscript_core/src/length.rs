//! Reel durations.

use serde::{Deserialize, Serialize};

/// Target duration of a reel.
///
/// # Examples
///
/// ```
/// use reelscript_core::ReelLength;
/// use std::str::FromStr;
///
/// assert_eq!(ReelLength::default(), ReelLength::Thirty);
/// assert_eq!(ReelLength::from_str("60s").unwrap(), ReelLength::Sixty);
/// assert_eq!(ReelLength::Ninety.to_string(), "90s");
/// assert_eq!(ReelLength::Fifteen.seconds(), 15);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum ReelLength {
    /// Fifteen seconds
    #[serde(rename = "15s")]
    #[strum(serialize = "15s")]
    Fifteen,
    /// Thirty seconds
    #[default]
    #[serde(rename = "30s")]
    #[strum(serialize = "30s")]
    Thirty,
    /// Sixty seconds
    #[serde(rename = "60s")]
    #[strum(serialize = "60s")]
    Sixty,
    /// Ninety seconds
    #[serde(rename = "90s")]
    #[strum(serialize = "90s")]
    Ninety,
}

impl ReelLength {
    /// Duration in seconds.
    pub fn seconds(&self) -> u32 {
        match self {
            ReelLength::Fifteen => 15,
            ReelLength::Thirty => 30,
            ReelLength::Sixty => 60,
            ReelLength::Ninety => 90,
        }
    }

    /// Every length, shortest first.
    pub fn all() -> Vec<ReelLength> {
        <ReelLength as strum::IntoEnumIterator>::iter().collect()
    }
}
