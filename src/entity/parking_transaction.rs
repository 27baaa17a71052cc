//! Parking transaction (session) entity model.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::size::SizeClass;

/// Lifecycle of a parking transaction.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// One vehicle's occupancy of one spot.
///
/// | Column       | Type                  | Description                          |
/// |--------------|-----------------------|--------------------------------------|
/// | id           | INTEGER (Primary Key) | Surrogate id                         |
/// | vehicle_id   | INTEGER               | References `vehicle.id`              |
/// | spot_id      | INTEGER               | References `parking_spot.id`         |
/// | vehicle_size | VARCHAR(16)           | Vehicle size at entry, used for fees |
/// | entry_time   | TIMESTAMPTZ           | Set at check-in                      |
/// | exit_time    | TIMESTAMPTZ NULL      | Set at check-out                     |
/// | total_fee    | BIGINT NULL           | Set at check-out                     |
/// | status       | VARCHAR(16)           | `active` or `completed`              |
///
/// Created together with the spot claim and mutated exactly once, when the
/// vehicle checks out.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parking_transaction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub vehicle_id: i32,

    pub spot_id: i32,

    pub vehicle_size: SizeClass,

    pub entry_time: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub exit_time: Option<DateTimeWithTimeZone>,

    #[sea_orm(nullable)]
    pub total_fee: Option<i64>,

    pub status: TransactionStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::Id"
    )]
    Vehicle,
    #[sea_orm(
        belongs_to = "super::parking_spot::Entity",
        from = "Column::SpotId",
        to = "super::parking_spot::Column::Id"
    )]
    ParkingSpot,
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl Related<super::parking_spot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingSpot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
