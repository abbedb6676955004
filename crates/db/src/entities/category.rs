//! Item categories shared by lost and found reports.

use std::{fmt, str::FromStr};

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item category.
///
/// Values are stored and serialized verbatim; matching is case-sensitive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Category {
    /// Wallet.
    #[sea_orm(string_value = "Dompet")]
    Dompet,
    /// Bag.
    #[sea_orm(string_value = "Tas")]
    Tas,
    /// Phone.
    #[sea_orm(string_value = "Hp")]
    Hp,
    /// Keys.
    #[sea_orm(string_value = "Kunci")]
    Kunci,
    /// Campus attributes (ID card, lanyard, jacket).
    #[sea_orm(string_value = "Atribut")]
    Atribut,
    /// Book.
    #[sea_orm(string_value = "Buku")]
    Buku,
    /// Laptop.
    #[sea_orm(string_value = "Laptop")]
    Laptop,
    /// Anything else; questions are written by the finder.
    #[sea_orm(string_value = "Lainnya")]
    Lainnya,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 8] = [
        Self::Dompet,
        Self::Tas,
        Self::Hp,
        Self::Kunci,
        Self::Atribut,
        Self::Buku,
        Self::Laptop,
        Self::Lainnya,
    ];

    /// Stored name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dompet => "Dompet",
            Self::Tas => "Tas",
            Self::Hp => "Hp",
            Self::Kunci => "Kunci",
            Self::Atribut => "Atribut",
            Self::Buku => "Buku",
            Self::Laptop => "Laptop",
            Self::Lainnya => "Lainnya",
        }
    }

    /// Whether this is the open catch-all category.
    #[must_use]
    pub const fn is_other(self) -> bool {
        matches!(self, Self::Lainnya)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
