//! Per-field commit validation for edited cells.
//!
//! Each table column has an editing rule: count is a bounded whole number,
//! radius and mass must stay strictly positive, speed must not go negative,
//! color is a palette name or hex. The piston form reuses the same parsers
//! with its own field labels. A rejected commit leaves the previous value
//! in place; nothing is clamped or coerced.

use std::fmt;

use crate::sim::{Rgba, Vec2};

use super::table::{Column, PopulationTable};

/// Largest accepted particle count per population.
pub const MAX_COUNT: u32 = 5000;

/// Smallest accepted value for fields that must stay strictly positive.
pub const MIN_POSITIVE: f64 = 1e-10;

/// A rejected edit. The previous committed value stays in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitError {
    pub field: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl std::error::Error for CommitError {}

pub fn parse_count(field: &'static str, text: &str) -> Result<u32, CommitError> {
    const REASON: &str = "expected a whole number from 0 to 5000";
    let value = text
        .trim()
        .parse::<u32>()
        .map_err(|_| CommitError { field, reason: REASON })?;
    if value > MAX_COUNT {
        return Err(CommitError { field, reason: REASON });
    }
    Ok(value)
}

pub fn parse_positive(field: &'static str, text: &str) -> Result<f64, CommitError> {
    const REASON: &str = "expected a number greater than zero";
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| CommitError { field, reason: REASON })?;
    if !value.is_finite() || value < MIN_POSITIVE {
        return Err(CommitError { field, reason: REASON });
    }
    Ok(value)
}

pub fn parse_non_negative(field: &'static str, text: &str) -> Result<f64, CommitError> {
    const REASON: &str = "expected a number of zero or more";
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| CommitError { field, reason: REASON })?;
    if !value.is_finite() || value < 0.0 {
        return Err(CommitError { field, reason: REASON });
    }
    Ok(value)
}

/// Any finite real, used by the piston's position and velocity fields.
pub fn parse_real(field: &'static str, text: &str) -> Result<f64, CommitError> {
    const REASON: &str = "expected a number";
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| CommitError { field, reason: REASON })?;
    if !value.is_finite() {
        return Err(CommitError { field, reason: REASON });
    }
    Ok(value)
}

pub fn parse_color(field: &'static str, text: &str) -> Result<Rgba, CommitError> {
    Rgba::parse(text).ok_or(CommitError {
        field,
        reason: "expected a color name or #rrggbb hex",
    })
}

/// An `x, y` pair of finite reals, used by polygon vertices and the
/// piston's position and velocity fields.
pub fn parse_point(field: &'static str, text: &str) -> Result<Vec2, CommitError> {
    const REASON: &str = "expected two numbers as x, y";
    let (x, y) = text
        .split_once(',')
        .ok_or(CommitError { field, reason: REASON })?;
    let parse = |part: &str| {
        let value = part
            .trim()
            .parse::<f64>()
            .map_err(|_| CommitError { field, reason: REASON })?;
        if !value.is_finite() {
            return Err(CommitError { field, reason: REASON });
        }
        Ok(value)
    };
    Ok(Vec2::new(parse(x)?, parse(y)?))
}

/// Validate `text` against `column`'s rule and write it into the table.
pub fn commit_cell(
    table: &mut PopulationTable,
    row: usize,
    column: Column,
    text: &str,
) -> Result<(), CommitError> {
    let field = column.label();
    match column {
        Column::Count => table.set_count(row, parse_count(field, text)?),
        Column::Radius => table.set_radius(row, parse_positive(field, text)?),
        Column::Mass => table.set_mass(row, parse_positive(field, text)?),
        Column::Speed => table.set_speed(row, parse_non_negative(field, text)?),
        Column::Color => table.set_color(row, parse_color(field, text)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Population;

    #[test]
    fn test_count_accepts_whole_numbers_up_to_the_cap() {
        assert_eq!(parse_count("count", "0").unwrap(), 0);
        assert_eq!(parse_count("count", " 42 ").unwrap(), 42);
        assert_eq!(parse_count("count", "5000").unwrap(), 5000);

        assert!(parse_count("count", "5001").is_err());
        assert!(parse_count("count", "-1").is_err());
        assert!(parse_count("count", "3.5").is_err());
        assert!(parse_count("count", "many").is_err());
    }

    #[test]
    fn test_positive_rejects_zero_and_below() {
        assert_eq!(parse_positive("radius", "1e-10").unwrap(), 1e-10);
        assert_eq!(parse_positive("radius", "2.5").unwrap(), 2.5);

        assert!(parse_positive("radius", "0").is_err());
        assert!(parse_positive("radius", "-2").is_err());
        assert!(parse_positive("radius", "inf").is_err());
        assert!(parse_positive("radius", "NaN").is_err());
    }

    #[test]
    fn test_non_negative_accepts_zero() {
        assert_eq!(parse_non_negative("speed", "0").unwrap(), 0.0);
        assert_eq!(parse_non_negative("speed", "1.5").unwrap(), 1.5);

        assert!(parse_non_negative("speed", "-0.1").is_err());
        assert!(parse_non_negative("speed", "NaN").is_err());
    }

    #[test]
    fn test_real_accepts_any_finite_value() {
        assert_eq!(parse_real("position x", "-3.25").unwrap(), -3.25);
        assert!(parse_real("position x", "inf").is_err());
        assert!(parse_real("position x", "up").is_err());
    }

    #[test]
    fn test_point_takes_a_comma_separated_pair() {
        assert_eq!(parse_point("vertex", "1.5, -2").unwrap(), Vec2::new(1.5, -2.0));
        assert_eq!(parse_point("vertex", " 0,0 ").unwrap(), Vec2::ZERO);

        assert!(parse_point("vertex", "1.5").is_err());
        assert!(parse_point("vertex", "1, two").is_err());
        assert!(parse_point("vertex", "1, inf").is_err());
    }

    #[test]
    fn test_rejected_commit_keeps_the_previous_value() {
        let mut table = PopulationTable::new();
        table.push_row(Population::stock());

        commit_cell(&mut table, 0, Column::Count, "25").unwrap();
        assert_eq!(table.count(0), Some(25));

        let err = commit_cell(&mut table, 0, Column::Count, "9999").unwrap_err();
        assert_eq!(err.field, "count");
        assert_eq!(table.count(0), Some(25));

        commit_cell(&mut table, 0, Column::Radius, "0").unwrap_err();
        assert_eq!(table.radius(0), Some(1.0));
    }

    #[test]
    fn test_commit_color_by_name_and_hex() {
        let mut table = PopulationTable::new();
        table.push_row(Population::stock());

        commit_cell(&mut table, 0, Column::Color, "red").unwrap();
        assert_eq!(table.color(0), Some(Rgba::RED));

        commit_cell(&mut table, 0, Column::Color, "#102030").unwrap();
        assert_eq!(table.color(0), Some(Rgba::opaque(16, 32, 48)));

        let err = commit_cell(&mut table, 0, Column::Color, "plaid").unwrap_err();
        assert_eq!(err.field, "color");
        assert_eq!(table.color(0), Some(Rgba::opaque(16, 32, 48)));
    }
}
