#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status stored on asset checks, check groups and check items.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Inspected and found in order.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "pass"))]
    Pass,
    /// Inspected and found defective.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "fail"))]
    Fail,
    /// Not inspected yet.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "pending"))]
    Pending,
}

impl CheckStatus {
    /// All possible status values.
    pub const ALL: &'static [CheckStatus] = &[Self::Pass, Self::Fail, Self::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for CheckStatus {
    fn default() -> Self {
        Self::Pass
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCheckStatusError {
    invalid: String,
}

impl fmt::Display for ParseCheckStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid check status '{}'. Valid values: {}",
            self.invalid,
            CheckStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseCheckStatusError {}

impl FromStr for CheckStatus {
    type Err = ParseCheckStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass" => Ok(Self::Pass),
            "fail" => Ok(Self::Fail),
            "pending" => Ok(Self::Pending),
            _ => Err(ParseCheckStatusError {
                invalid: s.to_string(),
            }),
        }
    }
}
