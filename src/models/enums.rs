use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Specialty {
    Cleaning => "cleaning",
    Canal => "canal",
    Orthodontics => "orthodontics",
    Implant => "implant",
    Extraction => "extraction",
    Whitening => "whitening",
    Emergency => "emergency",
});

str_enum!(AppointmentStatus {
    Pending => "pending",
    Confirmed => "confirmed",
    Canceled => "canceled",
});

impl AppointmentStatus {
    /// Pending and confirmed appointments hold their slot; canceled ones free it.
    pub fn occupies_slot(&self) -> bool {
        !matches!(self, Self::Canceled)
    }
}

// Aggregate status of a calendar day, derived from its non-canceled appointments.
str_enum!(DayStatus {
    Available => "available",
    Pending => "pending",
    Booked => "booked",
    Mixed => "mixed",
});

str_enum!(SlotState {
    Available => "available",
    Booked => "booked",
    Unavailable => "unavailable",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn specialty_round_trip() {
        for variant in Specialty::ALL {
            assert_eq!(Specialty::from_str(variant.as_str()).unwrap(), *variant);
        }
        assert_eq!(Specialty::ALL.len(), 7);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&AppointmentStatus::Canceled).unwrap();
        assert_eq!(json, "\"canceled\"");
        let back: AppointmentStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(back, AppointmentStatus::Confirmed);
    }

    #[test]
    fn only_canceled_frees_the_slot() {
        assert!(AppointmentStatus::Pending.occupies_slot());
        assert!(AppointmentStatus::Confirmed.occupies_slot());
        assert!(!AppointmentStatus::Canceled.occupies_slot());
    }

    #[test]
    fn invalid_enum_returns_error() {
        let err = Specialty::from_str("limpeza").unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidEnum { .. }));
        assert!(AppointmentStatus::from_str("cancelled").is_err());
        assert!(DayStatus::from_str("").is_err());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(DayStatus::Mixed.to_string(), "mixed");
        assert_eq!(SlotState::Unavailable.to_string(), "unavailable");
    }
}
