//! Parking spot entity model.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::size::SizeClass;

/// A physical parking spot.
///
/// | Column       | Type                  | Description                      |
/// |--------------|-----------------------|----------------------------------|
/// | id           | INTEGER (Primary Key) | Surrogate id                     |
/// | floor        | INTEGER               | Floor, unique with `spot_number` |
/// | spot_number  | INTEGER               | Number on the floor              |
/// | size         | VARCHAR(16)           | Size class of the bay            |
/// | is_available | BOOLEAN               | Single source of truth for occupancy |
///
/// `is_available` only ever flips through a conditional update (see
/// [`crate::allocation`] and [`crate::spots::release`]).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parking_spot")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub floor: i32,

    pub spot_number: i32,

    pub size: SizeClass,

    pub is_available: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::parking_transaction::Entity")]
    ParkingTransaction,
}

impl Related<super::parking_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingTransaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
