//! Database entity models for seaorm-parking-lot.
//!
//! These SeaORM entities describe the three tables the parking lot works
//! against. They are public so callers can run their own read queries, but
//! every write that changes occupancy should go through [`ParkingLot`].
//!
//! [`ParkingLot`]: crate::ParkingLot

/// Physical parking spots and their availability flag.
pub mod parking_spot;

/// One vehicle's stay in one spot, from entry to exit.
pub mod parking_transaction;

/// Known vehicles keyed by license plate.
pub mod vehicle;
