//! Warranty periods, end-date derivation and lookup by Unique ID.
use crate::model::WarrantySaleRecord;
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WarrantyError {
    #[error("Invalid warranty period: {0:?} (expected e.g. \"1 year\", \"6 months\", \"30 days\")")]
    InvalidPeriod(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarrantyUnit {
    Days,
    Months,
    Years,
}

/// Coverage length, written as text on the wire ("1 year", "6 months").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WarrantyPeriod {
    pub amount: u32,
    pub unit: WarrantyUnit,
}

impl WarrantyPeriod {
    pub const fn days(amount: u32) -> Self {
        Self {
            amount,
            unit: WarrantyUnit::Days,
        }
    }

    pub const fn months(amount: u32) -> Self {
        Self {
            amount,
            unit: WarrantyUnit::Months,
        }
    }

    pub const fn years(amount: u32) -> Self {
        Self {
            amount,
            unit: WarrantyUnit::Years,
        }
    }

    /// Last covered day for a sale on `date_of_sale`.
    ///
    /// Month and year periods move by calendar months; a day that does not exist in
    /// the target month is clamped to that month's last day (Jan 31 + 1 month is
    /// Feb 28/29). Saturates at `NaiveDate::MAX`.
    pub fn end_date(&self, date_of_sale: NaiveDate) -> NaiveDate {
        let end = match self.unit {
            WarrantyUnit::Days => date_of_sale.checked_add_days(Days::new(u64::from(self.amount))),
            WarrantyUnit::Months => date_of_sale.checked_add_months(Months::new(self.amount)),
            WarrantyUnit::Years => self
                .amount
                .checked_mul(12)
                .and_then(|months| date_of_sale.checked_add_months(Months::new(months))),
        };
        end.unwrap_or(NaiveDate::MAX)
    }
}

impl Default for WarrantyPeriod {
    fn default() -> Self {
        Self::years(1)
    }
}

impl Display for WarrantyPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unit = match self.unit {
            WarrantyUnit::Days => "day",
            WarrantyUnit::Months => "month",
            WarrantyUnit::Years => "year",
        };
        let plural = if self.amount == 1 { "" } else { "s" };
        write!(f, "{} {}{}", self.amount, unit, plural)
    }
}

impl FromStr for WarrantyPeriod {
    type Err = WarrantyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WarrantyError::InvalidPeriod(s.to_string());
        let text = s.trim().to_ascii_lowercase();
        let split = text
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (digits, unit) = text.split_at(split);
        let amount: u32 = digits.parse().map_err(|_| invalid())?;
        let unit = match unit.trim() {
            "d" | "day" | "days" => WarrantyUnit::Days,
            "m" | "mo" | "month" | "months" => WarrantyUnit::Months,
            "y" | "yr" | "year" | "years" => WarrantyUnit::Years,
            _ => return Err(invalid()),
        };
        Ok(Self { amount, unit })
    }
}

impl TryFrom<String> for WarrantyPeriod {
    type Error = WarrantyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WarrantyPeriod> for String {
    fn from(period: WarrantyPeriod) -> Self {
        period.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarrantyStatus {
    /// Covered; `days_remaining` is 0 on the last covered day.
    Active { days_remaining: i64 },
    Expired { days_since: i64 },
}

impl WarrantyStatus {
    pub fn on(end_date: NaiveDate, today: NaiveDate) -> Self {
        let remaining = (end_date - today).num_days();
        if remaining >= 0 {
            Self::Active {
                days_remaining: remaining,
            }
        } else {
            Self::Expired {
                days_since: -remaining,
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

/// Most recent warranty sale of the unit `unique_id` (case-insensitive) and its
/// status on `today`.
pub fn find_warranty<'a>(
    records: &'a [WarrantySaleRecord],
    unique_id: &str,
    today: NaiveDate,
) -> Option<(&'a WarrantySaleRecord, WarrantyStatus)> {
    let wanted = unique_id.trim();
    records
        .iter()
        .filter(|r| r.entry.sale.product.unique_id.eq_ignore_ascii_case(wanted))
        .max_by_key(|r| (r.entry.date_of_sale, r.id))
        .map(|r| (r, WarrantyStatus::on(r.entry.warranty_end_date, today)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_one_year_from_mid_january() {
        let period: WarrantyPeriod = "1 year".parse().unwrap();
        assert_eq!(period.end_date(date(2025, 1, 15)), date(2026, 1, 15));
    }

    #[test]
    fn test_month_end_is_clamped() {
        assert_eq!(
            WarrantyPeriod::months(1).end_date(date(2025, 1, 31)),
            date(2025, 2, 28)
        );
        assert_eq!(
            WarrantyPeriod::years(1).end_date(date(2024, 2, 29)),
            date(2025, 2, 28)
        );
    }

    #[test]
    fn test_days_cross_month_boundary() {
        assert_eq!(
            WarrantyPeriod::days(30).end_date(date(2025, 1, 15)),
            date(2025, 2, 14)
        );
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!("6 months".parse::<WarrantyPeriod>().unwrap(), WarrantyPeriod::months(6));
        assert_eq!(" 2 Years ".parse::<WarrantyPeriod>().unwrap(), WarrantyPeriod::years(2));
        assert_eq!("90d".parse::<WarrantyPeriod>().unwrap(), WarrantyPeriod::days(90));
        assert!("year".parse::<WarrantyPeriod>().is_err());
        assert!("3 weeks".parse::<WarrantyPeriod>().is_err());
        assert!("".parse::<WarrantyPeriod>().is_err());
    }

    #[test]
    fn test_serialized_as_text() {
        let json = serde_json::to_string(&WarrantyPeriod::months(1)).unwrap();
        assert_eq!(json, "\"1 month\"");
        let back: WarrantyPeriod = serde_json::from_str("\"3 years\"").unwrap();
        assert_eq!(back, WarrantyPeriod::years(3));
    }

    #[test]
    fn test_status_boundaries() {
        let end = date(2026, 1, 15);
        assert_eq!(
            WarrantyStatus::on(end, end),
            WarrantyStatus::Active { days_remaining: 0 }
        );
        assert_eq!(
            WarrantyStatus::on(end, date(2026, 1, 20)),
            WarrantyStatus::Expired { days_since: 5 }
        );
    }
}
