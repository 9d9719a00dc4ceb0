use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
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

str_enum!(BarcodeStatus {
    Safe => "safe",
    Warning => "warning",
    Expired => "expired",
    Invalid => "invalid",
});

str_enum!(JobStatus {
    ToCheck => "to_check",
    Checked => "checked",
    DepositPaid => "deposit_paid",
    GasOpened => "gas_opened",
    ServiceDirected => "service_directed",
});

impl JobStatus {
    /// Pipeline order, used for board columns and stage advancement.
    pub const ALL: [JobStatus; 5] = [
        JobStatus::ToCheck,
        JobStatus::Checked,
        JobStatus::DepositPaid,
        JobStatus::GasOpened,
        JobStatus::ServiceDirected,
    ];

    /// The following pipeline stage, or `None` once service is directed.
    pub fn next(&self) -> Option<JobStatus> {
        match self {
            JobStatus::ToCheck => Some(JobStatus::Checked),
            JobStatus::Checked => Some(JobStatus::DepositPaid),
            JobStatus::DepositPaid => Some(JobStatus::GasOpened),
            JobStatus::GasOpened => Some(JobStatus::ServiceDirected),
            JobStatus::ServiceDirected => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn barcode_status_round_trip() {
        for (variant, s) in [
            (BarcodeStatus::Safe, "safe"),
            (BarcodeStatus::Warning, "warning"),
            (BarcodeStatus::Expired, "expired"),
            (BarcodeStatus::Invalid, "invalid"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(BarcodeStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn job_status_round_trip() {
        for (variant, s) in [
            (JobStatus::ToCheck, "to_check"),
            (JobStatus::Checked, "checked"),
            (JobStatus::DepositPaid, "deposit_paid"),
            (JobStatus::GasOpened, "gas_opened"),
            (JobStatus::ServiceDirected, "service_directed"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(JobStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn job_pipeline_order_is_linear() {
        let mut stage = JobStatus::ToCheck;
        let mut visited = vec![stage];
        while let Some(next) = stage.next() {
            visited.push(next);
            stage = next;
        }
        assert_eq!(visited, JobStatus::ALL);
        assert_eq!(JobStatus::ServiceDirected.next(), None);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(BarcodeStatus::from_str("fresh").is_err());
        assert!(JobStatus::from_str("unknown").is_err());
        assert!(JobStatus::from_str("").is_err());
    }
}
