//! Vehicle size classes and the size compatibility table.
//!
//! [`SizePolicy`] is the single place that knows which spot sizes a vehicle
//! may occupy and what it pays per hour. It is passed into [`ParkingLot`]
//! as a value, so the allocation engine and fee computation can be tested
//! against any table.
//!
//! [`ParkingLot`]: crate::ParkingLot

use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ParkingError;

/// Size class shared by vehicles and parking spots.
///
/// Stored as a lowercase string column (`"motorcycle"`, `"car"`, `"bus"`).
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    #[sea_orm(string_value = "motorcycle")]
    Motorcycle,
    #[sea_orm(string_value = "car")]
    Car,
    #[sea_orm(string_value = "bus")]
    Bus,
}

impl SizeClass {
    pub fn as_str(self) -> &'static str {
        match self {
            SizeClass::Motorcycle => "motorcycle",
            SizeClass::Car => "car",
            SizeClass::Bus => "bus",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeClass {
    type Err = ParkingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "motorcycle" => Ok(SizeClass::Motorcycle),
            "car" => Ok(SizeClass::Car),
            "bus" => Ok(SizeClass::Bus),
            other => Err(ParkingError::InvalidSizeClass(other.to_string())),
        }
    }
}

/// What one vehicle size is allowed to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizeRule {
    /// Spot sizes the vehicle may occupy, most restrictive first.
    pub acceptable_spots: Vec<SizeClass>,
    /// Fee charged per started hour.
    pub hourly_rate: i64,
}

impl SizeRule {
    pub fn accepts(&self, spot: SizeClass) -> bool {
        self.acceptable_spots.contains(&spot)
    }
}

/// The size compatibility and fee table.
///
/// | Vehicle    | Acceptable spots     | Rate / hour |
/// |------------|----------------------|-------------|
/// | motorcycle | motorcycle, car, bus | 10          |
/// | car        | car, bus             | 20          |
/// | bus        | bus                  | 30          |
///
/// # Examples
///
/// ```
/// use seaorm_parking_lot::{SizeClass, SizePolicy};
///
/// let policy = SizePolicy::default().with_hourly_rate(SizeClass::Car, 25);
/// assert_eq!(policy.hourly_rate(SizeClass::Car), 25);
/// assert_eq!(
///     policy.acceptable_spots(SizeClass::Car),
///     &[SizeClass::Car, SizeClass::Bus]
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizePolicy {
    motorcycle: SizeRule,
    car: SizeRule,
    bus: SizeRule,
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self {
            motorcycle: SizeRule {
                acceptable_spots: vec![SizeClass::Motorcycle, SizeClass::Car, SizeClass::Bus],
                hourly_rate: 10,
            },
            car: SizeRule {
                acceptable_spots: vec![SizeClass::Car, SizeClass::Bus],
                hourly_rate: 20,
            },
            bus: SizeRule {
                acceptable_spots: vec![SizeClass::Bus],
                hourly_rate: 30,
            },
        }
    }
}

impl SizePolicy {
    /// Overrides the hourly rate for one vehicle size.
    pub fn with_hourly_rate(mut self, size: SizeClass, rate: i64) -> Self {
        self.rule_mut(size).hourly_rate = rate;
        self
    }

    pub fn rule(&self, size: SizeClass) -> &SizeRule {
        match size {
            SizeClass::Motorcycle => &self.motorcycle,
            SizeClass::Car => &self.car,
            SizeClass::Bus => &self.bus,
        }
    }

    fn rule_mut(&mut self, size: SizeClass) -> &mut SizeRule {
        match size {
            SizeClass::Motorcycle => &mut self.motorcycle,
            SizeClass::Car => &mut self.car,
            SizeClass::Bus => &mut self.bus,
        }
    }

    pub fn acceptable_spots(&self, size: SizeClass) -> &[SizeClass] {
        &self.rule(size).acceptable_spots
    }

    pub fn hourly_rate(&self, size: SizeClass) -> i64 {
        self.rule(size).hourly_rate
    }

    /// Resolves a raw size name into its rule.
    ///
    /// Fails with [`ParkingError::InvalidSizeClass`] for anything outside the
    /// enumeration.
    pub fn resolve(&self, size: &str) -> Result<(SizeClass, &SizeRule), ParkingError> {
        let size: SizeClass = size.parse()?;
        Ok((size, self.rule(size)))
    }
}
