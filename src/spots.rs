//! Spot registry: administrative creation, listing and release.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};

use crate::entity::parking_spot::{
    self, ActiveModel as SpotActiveModel, Entity as SpotEntity,
};
use crate::error::{ParkingError, Result};
use crate::size::SizeClass;

/// Creates a spot. New spots are always available.
///
/// Fails with [`ParkingError::DuplicateSpot`] when `(floor, spot_number)` is
/// already taken.
pub async fn create<C>(
    db: &C,
    floor: i32,
    spot_number: i32,
    size: SizeClass,
) -> Result<parking_spot::Model>
where
    C: ConnectionTrait,
{
    let spot_model = SpotActiveModel {
        floor: Set(floor),
        spot_number: Set(spot_number),
        size: Set(size),
        is_available: Set(true),
        ..Default::default()
    };

    spot_model.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ParkingError::DuplicateSpot { floor, spot_number }
        }
        _ => ParkingError::Storage(e),
    })
}

/// All available spots, lowest floor then lowest number first.
pub async fn list_available<C>(db: &C) -> Result<Vec<parking_spot::Model>>
where
    C: ConnectionTrait,
{
    Ok(SpotEntity::find()
        .filter(parking_spot::Column::IsAvailable.eq(true))
        .order_by_asc(parking_spot::Column::Floor)
        .order_by_asc(parking_spot::Column::SpotNumber)
        .all(db)
        .await?)
}

pub async fn find_by_location<C>(
    db: &C,
    floor: i32,
    spot_number: i32,
) -> Result<Option<parking_spot::Model>>
where
    C: ConnectionTrait,
{
    Ok(SpotEntity::find()
        .filter(parking_spot::Column::Floor.eq(floor))
        .filter(parking_spot::Column::SpotNumber.eq(spot_number))
        .one(db)
        .await?)
}

/// Marks an occupied spot available again.
///
/// Conditional on the spot currently being unavailable; returns whether the
/// flag actually changed.
pub async fn release<C>(db: &C, spot_id: i32) -> Result<bool>
where
    C: ConnectionTrait,
{
    let res = SpotEntity::update_many()
        .col_expr(parking_spot::Column::IsAvailable, Expr::value(true))
        .filter(parking_spot::Column::Id.eq(spot_id))
        .filter(parking_spot::Column::IsAvailable.eq(false))
        .exec(db)
        .await?;

    Ok(res.rows_affected == 1)
}
