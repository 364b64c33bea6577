use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Store-assigned task identifier. Never reused within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(TaskId)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCostError {
    #[error("Cost is required")]
    Empty,

    #[error("Cost cannot be negative: {0}")]
    Negative(String),

    #[error("Cost has more than two decimal places: {0}")]
    TooPrecise(String),

    #[error("Invalid cost: {0}")]
    Invalid(String),
}

/// Non-negative monetary amount, held as whole cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cost(u64);

impl Cost {
    pub const ZERO: Cost = Cost(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn from_units(units: u64) -> Self {
        Self(units.saturating_mul(100))
    }

    pub fn cents(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Cost {
    type Err = ParseCostError;

    /// Accepts `12`, `12.5`, `12.50` and `.5`; a comma works as the decimal
    /// separator too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(ParseCostError::Empty);
        }
        if raw.starts_with('-') {
            return Err(ParseCostError::Negative(raw.to_string()));
        }

        let normalized = raw.trim_start_matches('+').replace(',', ".");
        let (units, fraction) = match normalized.split_once('.') {
            Some((units, fraction)) => (units, fraction),
            None => (normalized.as_str(), ""),
        };

        let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (units.is_empty() && fraction.is_empty()) || !is_digits(units) || !is_digits(fraction) {
            return Err(ParseCostError::Invalid(raw.to_string()));
        }
        if fraction.len() > 2 {
            return Err(ParseCostError::TooPrecise(raw.to_string()));
        }

        let units: u64 = if units.is_empty() {
            0
        } else {
            units
                .parse()
                .map_err(|_| ParseCostError::Invalid(raw.to_string()))?
        };
        let cents: u64 = format!("{:0<2}", fraction)
            .parse()
            .map_err(|_| ParseCostError::Invalid(raw.to_string()))?;

        units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .map(Cost)
            .ok_or_else(|| ParseCostError::Invalid(raw.to_string()))
    }
}

impl TryFrom<String> for Cost {
    type Error = ParseCostError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Cost> for String {
    fn from(cost: Cost) -> Self {
        cost.to_string()
    }
}

/// Candidate submitted by the creation form. The store assigns id and order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub name: String,
    pub cost: Cost,
    pub due_date: NaiveDate,
}

impl TaskDraft {
    pub fn new(name: impl Into<String>, cost: Cost, due_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            cost,
            due_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub cost: Cost,
    pub due_date: NaiveDate,
    /// 1-based display position
    pub order: usize,
}

impl Task {
    pub(crate) fn from_draft(id: TaskId, order: usize, draft: TaskDraft) -> Self {
        Self {
            id,
            name: draft.name,
            cost: draft.cost,
            due_date: draft.due_date,
            order,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_cost(mut self, cost: Cost) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn is_costlier_than_or_equal(&self, threshold: Cost) -> bool {
        self.cost >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", 0)]
    #[case("10", 1000)]
    #[case("10.5", 1050)]
    #[case("10.05", 1005)]
    #[case(" 1000.00 ", 100_000)]
    #[case(".5", 50)]
    #[case("7,25", 725)]
    #[case("+3", 300)]
    fn test_cost_parse(#[case] input: &str, #[case] cents: u64) {
        assert_eq!(input.parse::<Cost>().unwrap().cents(), cents);
    }

    #[rstest]
    #[case("", ParseCostError::Empty)]
    #[case("-1", ParseCostError::Negative("-1".to_string()))]
    #[case("1.234", ParseCostError::TooPrecise("1.234".to_string()))]
    #[case("abc", ParseCostError::Invalid("abc".to_string()))]
    #[case("1.2.3", ParseCostError::Invalid("1.2.3".to_string()))]
    #[case(".", ParseCostError::Invalid(".".to_string()))]
    fn test_cost_parse_rejects(#[case] input: &str, #[case] expected: ParseCostError) {
        assert_eq!(input.parse::<Cost>().unwrap_err(), expected);
    }

    #[test]
    fn test_cost_display() {
        assert_eq!(Cost::from_cents(5).to_string(), "0.05");
        assert_eq!(Cost::from_cents(123_450).to_string(), "1234.50");
        assert_eq!(Cost::from_units(1000).to_string(), "1000.00");
    }

    #[test]
    fn test_cost_serializes_as_decimal_string() {
        let json = serde_json::to_string(&Cost::from_cents(1999)).unwrap();
        assert_eq!(json, "\"19.99\"");

        let back: Cost = serde_json::from_str("\"0.10\"").unwrap();
        assert_eq!(back, Cost::from_cents(10));
        assert!(serde_json::from_str::<Cost>("\"-2\"").is_err());
    }

    #[test]
    fn test_task_id_parse() {
        assert_eq!("7".parse::<TaskId>().unwrap(), TaskId(7));
        assert_eq!("#12".parse::<TaskId>().unwrap(), TaskId(12));
        assert!("x".parse::<TaskId>().is_err());
    }

    #[test]
    fn test_high_cost_boundary() {
        let due = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let task = Task::from_draft(TaskId(1), 1, TaskDraft::new("A", Cost::from_units(1000), due));
        assert!(task.is_costlier_than_or_equal(Cost::from_units(1000)));

        let cheaper = task.with_cost(Cost::from_cents(99_999));
        assert!(!cheaper.is_costlier_than_or_equal(Cost::from_units(1000)));
    }
}
