use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicle::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicle::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Vehicle::LicensePlate)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Vehicle::Size).string_len(16).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ParkingSpot::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParkingSpot::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ParkingSpot::Floor).integer().not_null())
                    .col(ColumnDef::new(ParkingSpot::SpotNumber).integer().not_null())
                    .col(ColumnDef::new(ParkingSpot::Size).string_len(16).not_null())
                    .col(
                        ColumnDef::new(ParkingSpot::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parking_spot_location")
                    .table(ParkingSpot::Table)
                    .col(ParkingSpot::Floor)
                    .col(ParkingSpot::SpotNumber)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Serves the allocation scan.
        manager
            .create_index(
                Index::create()
                    .name("idx_parking_spot_free")
                    .table(ParkingSpot::Table)
                    .col(ParkingSpot::IsAvailable)
                    .col(ParkingSpot::Size)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ParkingTransaction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParkingTransaction::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ParkingTransaction::VehicleId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ParkingTransaction::SpotId).integer().not_null())
                    .col(
                        ColumnDef::new(ParkingTransaction::VehicleSize)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParkingTransaction::EntryTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ParkingTransaction::ExitTime).timestamp_with_time_zone())
                    .col(ColumnDef::new(ParkingTransaction::TotalFee).big_integer())
                    .col(
                        ColumnDef::new(ParkingTransaction::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_transaction_vehicle")
                            .from(ParkingTransaction::Table, ParkingTransaction::VehicleId)
                            .to(Vehicle::Table, Vehicle::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_transaction_spot")
                            .from(ParkingTransaction::Table, ParkingTransaction::SpotId)
                            .to(ParkingSpot::Table, ParkingSpot::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parking_transaction_vehicle_status")
                    .table(ParkingTransaction::Table)
                    .col(ParkingTransaction::VehicleId)
                    .col(ParkingTransaction::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParkingTransaction::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ParkingSpot::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vehicle::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Vehicle {
    Table,
    Id,
    LicensePlate,
    Size,
}

#[derive(DeriveIden)]
enum ParkingSpot {
    Table,
    Id,
    Floor,
    SpotNumber,
    Size,
    IsAvailable,
}

#[derive(DeriveIden)]
enum ParkingTransaction {
    Table,
    Id,
    VehicleId,
    SpotId,
    VehicleSize,
    EntryTime,
    ExitTime,
    TotalFee,
    Status,
}
