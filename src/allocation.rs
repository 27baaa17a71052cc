//! Allocation engine: claims exactly one compatible spot.
//!
//! A claim is a conditional update,
//!
//! ```sql
//! UPDATE parking_spot SET is_available = FALSE
//!  WHERE id = $1 AND is_available = TRUE
//! ```
//!
//! accepted only when it touched exactly one row. The candidate it targets is
//! the lowest `(floor, spot_number)` compatible spot, selected with
//! `FOR UPDATE SKIP LOCKED` so concurrent claimers on Postgres/MySQL fan out
//! to different rows instead of queueing on the same one. SQLite has no row
//! locks and the query builder drops the clause. There a claim racing another
//! writer fails with `SQLITE_BUSY` rather than touching zero rows, and
//! [`crate::ParkingLot`] re-runs the whole unit of work.
//!
//! Losing the conditional update means another unit of work committed a
//! claim on that spot first. The spot is then unavailable for good from this
//! caller's point of view, so re-selecting always makes progress and the loop
//! ends with either a claim or [`ParkingError::NoSpotAvailable`].

use sea_orm::sea_query::{Expr, LockBehavior, LockType};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::debug;

use crate::entity::parking_spot::{self, Entity as SpotEntity};
use crate::error::{ParkingError, Result};
use crate::size::{SizeClass, SizePolicy};

/// Claims the first available spot `vehicle_size` may use.
///
/// On success the returned model already reflects `is_available == false`.
/// On [`ParkingError::NoSpotAvailable`] no row has been touched.
pub async fn allocate<C>(
    db: &C,
    policy: &SizePolicy,
    vehicle_size: SizeClass,
) -> Result<parking_spot::Model>
where
    C: ConnectionTrait,
{
    let acceptable = policy.acceptable_spots(vehicle_size);

    loop {
        let Some(candidate) = next_candidate(db, acceptable).await? else {
            return Err(ParkingError::NoSpotAvailable(vehicle_size));
        };

        if claim(db, candidate.id).await? {
            return Ok(parking_spot::Model {
                is_available: false,
                ..candidate
            });
        }

        debug!(
            spot_id = candidate.id,
            floor = candidate.floor,
            spot_number = candidate.spot_number,
            "lost claim race, reselecting"
        );
    }
}

async fn next_candidate<C>(
    db: &C,
    acceptable: &[SizeClass],
) -> Result<Option<parking_spot::Model>>
where
    C: ConnectionTrait,
{
    Ok(SpotEntity::find()
        .filter(parking_spot::Column::IsAvailable.eq(true))
        .filter(parking_spot::Column::Size.is_in(acceptable.iter().copied()))
        .order_by_asc(parking_spot::Column::Floor)
        .order_by_asc(parking_spot::Column::SpotNumber)
        .lock_with_behavior(LockType::Update, LockBehavior::SkipLocked)
        .one(db)
        .await?)
}

/// Flips one spot from available to unavailable. `false` if it was not
/// available any more.
pub(crate) async fn claim<C>(db: &C, spot_id: i32) -> Result<bool>
where
    C: ConnectionTrait,
{
    let res = SpotEntity::update_many()
        .col_expr(parking_spot::Column::IsAvailable, Expr::value(false))
        .filter(parking_spot::Column::Id.eq(spot_id))
        .filter(parking_spot::Column::IsAvailable.eq(true))
        .exec(db)
        .await?;

    Ok(res.rows_affected == 1)
}
