#![allow(dead_code)]

use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait};
use seaorm_parking_lot::entity::{parking_transaction, vehicle};
use seaorm_parking_lot::migration::{Migrator, MigratorTrait};
use seaorm_parking_lot::{ManualClock, ParkingLot};
use tempfile::TempDir;
use time::OffsetDateTime;

/// Fresh in-memory SQLite database with the schema applied.
///
/// Every pooled connection to `sqlite::memory:` opens its own empty database,
/// so the pool is pinned to exactly one connection. Concurrent units of work
/// then queue on it the way they would queue on SQLite's writer lock.
pub async fn connect() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opt).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");
    db
}

/// A lot on a file-backed SQLite database behind several pooled
/// connections, so concurrent units of work really overlap and contend for
/// the writer lock. Dropping it deletes the database.
pub struct SharedLot {
    pub lot: ParkingLot,
    _dir: TempDir,
}

pub async fn shared_lot(connections: u32) -> SharedLot {
    let dir = tempfile::tempdir().expect("create temp dir");
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("parking.db").display()
    );

    let mut opt = ConnectOptions::new(url);
    opt.max_connections(connections)
        .min_connections(connections)
        .sqlx_logging(false);

    let db = Database::connect(opt).await.expect("connect to sqlite file");
    Migrator::up(&db, None).await.expect("apply migrations");

    let clock = Arc::new(ManualClock::new(start_time()));
    SharedLot {
        lot: ParkingLot::new(db).with_clock(clock),
        _dir: dir,
    }
}

pub fn start_time() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
}

/// A lot on a fresh database with a manual clock parked at [`start_time`].
pub async fn lot() -> (ParkingLot, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start_time()));
    let lot = ParkingLot::new(connect().await).with_clock(clock.clone());
    (lot, clock)
}

pub async fn vehicle_count(lot: &ParkingLot) -> u64 {
    vehicle::Entity::find()
        .count(lot.connection())
        .await
        .unwrap()
}

pub async fn transaction_count(lot: &ParkingLot) -> u64 {
    parking_transaction::Entity::find()
        .count(lot.connection())
        .await
        .unwrap()
}
