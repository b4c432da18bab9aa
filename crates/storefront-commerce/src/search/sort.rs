//! Sort options for product listings.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field a listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    /// Creation time (default).
    #[default]
    CreatedAt,
    Price,
    Name,
    Popularity,
}

impl SortBy {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::CreatedAt => "createdAt",
            SortBy::Price => "price",
            SortBy::Name => "name",
            SortBy::Popularity => "popularity",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortBy::CreatedAt => "Newest",
            SortBy::Price => "Price",
            SortBy::Name => "Name",
            SortBy::Popularity => "Popularity",
        }
    }
}

impl FromStr for SortBy {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(SortBy::CreatedAt),
            "price" => Ok(SortBy::Price),
            "name" => Ok(SortBy::Name),
            "popularity" => Ok(SortBy::Popularity),
            other => Err(CommerceError::InvalidSort(other.to_string())),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(CommerceError::InvalidSort(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field and direction together, as the admin table's single sort select
/// encodes them (`"price-asc"`, `"createdAt-desc"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SortSpec {
    pub by: SortBy,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(by: SortBy, order: SortOrder) -> Self {
        Self { by, order }
    }
}

impl FromStr for SortSpec {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (by, order) = s
            .split_once('-')
            .ok_or_else(|| CommerceError::InvalidSort(s.to_string()))?;
        Ok(Self {
            by: by.parse()?,
            order: order.parse()?,
        })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.by, self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_spec_parse() {
        let spec: SortSpec = "price-asc".parse().unwrap();
        assert_eq!(spec, SortSpec::new(SortBy::Price, SortOrder::Asc));
        assert_eq!(spec.to_string(), "price-asc");
    }

    #[test]
    fn test_sort_spec_rejects_garbage() {
        assert!("price".parse::<SortSpec>().is_err());
        assert!("rating-desc".parse::<SortSpec>().is_err());
        assert!("name-up".parse::<SortSpec>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SortBy::default().as_str(), "createdAt");
        assert_eq!(SortOrder::default().as_str(), "desc");
    }
}
