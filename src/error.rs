use sea_orm::DbErr;

use crate::size::SizeClass;

pub type Result<T, E = ParkingError> = std::result::Result<T, E>;

/// Everything a parking operation can be rejected with.
///
/// Errors raised inside a unit of work roll the whole unit back before they
/// reach the caller. Only [`ParkingError::Storage`] is worth retrying; every
/// other variant is a deterministic outcome of the input and the current
/// state of the lot.
#[derive(Debug, thiserror::Error)]
pub enum ParkingError {
    #[error("invalid vehicle size class `{0}`")]
    InvalidSizeClass(String),

    #[error("license plate is required")]
    MissingLicensePlate,

    #[error("vehicle {plate} is registered as {registered}, not {requested}")]
    SizeMismatch {
        plate: String,
        registered: SizeClass,
        requested: SizeClass,
    },

    #[error("no parking spot available for a {0}")]
    NoSpotAvailable(SizeClass),

    #[error("vehicle {0} not found")]
    VehicleNotFound(String),

    #[error("vehicle {0} has no active parking session")]
    NoActiveSession(String),

    #[error("vehicle {0} is already parked")]
    AlreadyParked(String),

    #[error("spot {spot_number} on floor {floor} already exists")]
    DuplicateSpot { floor: i32, spot_number: i32 },

    #[error("storage failure: {0}")]
    Storage(#[from] DbErr),
}

/// Stable, data-free discriminant of [`ParkingError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidSizeClass,
    MissingLicensePlate,
    SizeMismatch,
    NoSpotAvailable,
    VehicleNotFound,
    NoActiveSession,
    AlreadyParked,
    DuplicateSpot,
    StorageFailure,
}

impl ErrorKind {
    /// Machine-readable code, safe to put on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidSizeClass => "invalid_size_class",
            ErrorKind::MissingLicensePlate => "missing_license_plate",
            ErrorKind::SizeMismatch => "size_mismatch",
            ErrorKind::NoSpotAvailable => "no_spot_available",
            ErrorKind::VehicleNotFound => "vehicle_not_found",
            ErrorKind::NoActiveSession => "no_active_session",
            ErrorKind::AlreadyParked => "already_parked",
            ErrorKind::DuplicateSpot => "duplicate_spot",
            ErrorKind::StorageFailure => "storage_failure",
        }
    }
}

impl ParkingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParkingError::InvalidSizeClass(_) => ErrorKind::InvalidSizeClass,
            ParkingError::MissingLicensePlate => ErrorKind::MissingLicensePlate,
            ParkingError::SizeMismatch { .. } => ErrorKind::SizeMismatch,
            ParkingError::NoSpotAvailable(_) => ErrorKind::NoSpotAvailable,
            ParkingError::VehicleNotFound(_) => ErrorKind::VehicleNotFound,
            ParkingError::NoActiveSession(_) => ErrorKind::NoActiveSession,
            ParkingError::AlreadyParked(_) => ErrorKind::AlreadyParked,
            ParkingError::DuplicateSpot { .. } => ErrorKind::DuplicateSpot,
            ParkingError::Storage(_) => ErrorKind::StorageFailure,
        }
    }

    /// `NoSpotAvailable` is capacity exhaustion, not a lost race, so it is
    /// not transient.
    pub fn is_transient(&self) -> bool {
        matches!(self, ParkingError::Storage(_))
    }

    /// SQLite refused a lock (`SQLITE_BUSY`, `SQLITE_LOCKED` or one of their
    /// extended codes). The unit of work that hit it changed nothing and can
    /// run again from the start.
    pub(crate) fn is_sqlite_lock_conflict(&self) -> bool {
        match self {
            ParkingError::Storage(err) => sqlite_lock_conflict(err),
            _ => false,
        }
    }
}

const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

#[cfg(any(feature = "postgres", feature = "sqlite"))]
fn sqlite_lock_conflict(err: &DbErr) -> bool {
    use sea_orm::RuntimeErr;

    let (DbErr::Conn(RuntimeErr::SqlxError(e))
    | DbErr::Exec(RuntimeErr::SqlxError(e))
    | DbErr::Query(RuntimeErr::SqlxError(e))) = err
    else {
        return false;
    };

    // Extended result codes keep the primary code in the low byte.
    e.as_database_error()
        .and_then(|db| db.code())
        .and_then(|code| code.parse::<i32>().ok())
        .is_some_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
}

#[cfg(not(any(feature = "postgres", feature = "sqlite")))]
fn sqlite_lock_conflict(_err: &DbErr) -> bool {
    false
}
