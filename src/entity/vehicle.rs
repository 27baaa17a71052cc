//! Vehicle entity model.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::size::SizeClass;

/// A vehicle remembered by license plate.
///
/// | Column        | Type                  | Description                    |
/// |---------------|-----------------------|--------------------------------|
/// | id            | INTEGER (Primary Key) | Surrogate id                   |
/// | license_plate | TEXT (Unique)         | Trimmed plate, case-sensitive  |
/// | size          | VARCHAR(16)           | Size class fixed at first seen |
///
/// Rows are never updated after insertion; a check-in with a different size
/// is rejected instead.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique, column_type = "Text")]
    pub license_plate: String,

    pub size: SizeClass,
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
