//! Vehicle registry: plate to remembered size class.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};

use crate::entity::vehicle::{self, ActiveModel as VehicleActiveModel, Entity as VehicleEntity};
use crate::error::{ParkingError, Result};
use crate::size::SizeClass;

/// Trims a plate and rejects blanks.
pub fn normalize_plate(plate: &str) -> Result<&str> {
    let plate = plate.trim();
    if plate.is_empty() {
        return Err(ParkingError::MissingLicensePlate);
    }
    Ok(plate)
}

/// Looks up a vehicle by its (already normalized) plate.
pub async fn find_by_plate<C>(db: &C, plate: &str) -> Result<Option<vehicle::Model>>
where
    C: ConnectionTrait,
{
    Ok(VehicleEntity::find()
        .filter(vehicle::Column::LicensePlate.eq(plate))
        .one(db)
        .await?)
}

/// Returns the vehicle for `plate`, registering it with `size` if unseen.
///
/// `plate` may be raw user input; it goes through [`normalize_plate`] here,
/// which is idempotent, so callers that already trimmed it lose nothing.
///
/// The boolean is `true` when this call created the row. A known plate whose
/// stored size differs from `size` fails with [`ParkingError::SizeMismatch`];
/// the stored size is never overwritten.
///
/// Meant to run on a [`sea_orm::DatabaseTransaction`] so that a later failure
/// in the same unit of work also discards the new row. The insert uses
/// `ON CONFLICT DO NOTHING` so two first-time check-ins of one plate settle on
/// a single row instead of tripping the unique index.
pub async fn find_or_register<C>(
    db: &C,
    plate: &str,
    size: SizeClass,
) -> Result<(vehicle::Model, bool)>
where
    C: ConnectionTrait,
{
    let plate = normalize_plate(plate)?;

    let (existing, is_new) = match find_by_plate(db, plate).await? {
        Some(existing) => (existing, false),
        None => {
            let vehicle_model = VehicleActiveModel {
                license_plate: Set(plate.to_string()),
                size: Set(size),
                ..Default::default()
            };

            let inserted = VehicleEntity::insert(vehicle_model)
                .on_conflict(
                    OnConflict::column(vehicle::Column::LicensePlate)
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(db)
                .await?;

            let stored = find_by_plate(db, plate).await?.ok_or_else(|| {
                DbErr::RecordNotFound(format!("vehicle {plate} vanished after insert"))
            })?;
            (stored, inserted == 1)
        }
    };

    if existing.size != size {
        return Err(ParkingError::SizeMismatch {
            plate: plate.to_string(),
            registered: existing.size,
            requested: size,
        });
    }

    Ok((existing, is_new))
}
