use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A time of day at minute resolution, written `HH:MM`.
///
/// Ordering is chronological, so sorting by `SlotTime` gives the same
/// order as the slot catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime {
    hour: u8,
    minute: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time of day {0:?} (expected HH:MM)")]
pub struct ParseSlotTimeError(pub String);

impl SlotTime {
    pub const fn new(hour: u8, minute: u8) -> Self {
        assert!(hour < 24 && minute < 60);
        Self { hour, minute }
    }

    /// Minutes since midnight.
    pub fn minutes_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for SlotTime {
    type Err = ParseSlotTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSlotTimeError(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(err)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(err());
        }
        let hour: u8 = h.parse().map_err(|_| err())?;
        let minute: u8 = m.parse().map_err(|_| err())?;
        if hour >= 24 || minute >= 60 {
            return Err(err());
        }
        Ok(Self { hour, minute })
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zero_padded_times() {
        let t: SlotTime = "08:30".parse().unwrap();
        assert_eq!(t, SlotTime::new(8, 30));
        assert_eq!(t.to_string(), "08:30");
        assert_eq!(t.minutes_of_day(), 510);
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["8:30", "08:3", "24:00", "12:60", "noon", "", "08-30", "08:30:00"] {
            assert!(bad.parse::<SlotTime>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn orders_chronologically() {
        let mut times = vec![SlotTime::new(14, 0), SlotTime::new(8, 30), SlotTime::new(8, 0)];
        times.sort();
        assert_eq!(times, vec![SlotTime::new(8, 0), SlotTime::new(8, 30), SlotTime::new(14, 0)]);
    }

    #[test]
    fn serde_uses_hh_mm_string() {
        let json = serde_json::to_string(&SlotTime::new(9, 0)).unwrap();
        assert_eq!(json, "\"09:00\"");
        let back: SlotTime = serde_json::from_str("\"17:30\"").unwrap();
        assert_eq!(back, SlotTime::new(17, 30));
        assert!(serde_json::from_str::<SlotTime>("\"25:00\"").is_err());
    }
}
