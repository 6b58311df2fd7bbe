use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

pub(crate) const ROLE_NAMES: [&str; 6] =
    ["admin", "bottlecop", "console", "observer", "analyst", "sampler"];

const SENSOR_STATUSES: [&str; 4] = ["operational", "maintenance", "broken", "retired"];
const NISKIN_STATUSES: [&str; 4] = ["ready", "deployed", "maintenance", "broken"];
const BOTTLE_STATUSES: [&str; 4] = ["empty", "filled", "processed", "archived"];

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn active_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).boolean().not_null().default(true).to_owned()
}

fn latitude_col<T: IntoIden + Copy + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .double()
        .check(Expr::col(col).between(-90.0, 90.0))
        .to_owned()
}

fn longitude_col<T: IntoIden + Copy + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .double()
        .check(Expr::col(col).between(-180.0, 180.0))
        .to_owned()
}

fn non_negative_col<T: IntoIden + Copy + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col).double().check(Expr::col(col).gte(0)).to_owned()
}

fn positive_int_col<T: IntoIden + Copy + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col).integer().check(Expr::col(col).gt(0)).to_owned()
}

fn enum_col<T: IntoIden + Copy + 'static>(col: T, values: &[&'static str]) -> ColumnDef {
    ColumnDef::new(col)
        .string_len(16)
        .not_null()
        .check(Expr::col(col).is_in(values.iter().copied()))
        .to_owned()
}

fn timestamp_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).timestamp_with_time_zone().to_owned()
}

/// Unique `cast_log_id` referencing `ctd_cast_log` with cascade delete.
fn cast_ref_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).integer().not_null().unique_key().to_owned()
}

fn cast_fk<T: IntoIden + 'static>(name: &str, table: T, col: T) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(table, col)
        .to(CtdCastLog::Table, CtdCastLog::CtdCastLogId)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== IDENTITY ==========
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(id_col(Users::UserId))
                    .col(ColumnDef::new(Users::Username).string_len(64).not_null().unique_key())
                    .col(ColumnDef::new(Users::Password).string_len(128).not_null())
                    .col(ColumnDef::new(Users::FirstName).string_len(64).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(64).not_null())
                    .col(active_col(Users::Active))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(id_col(Roles::RoleId))
                    .col(
                        ColumnDef::new(Roles::RoleName)
                            .string_len(16)
                            .not_null()
                            .unique_key()
                            .check(Expr::col(Roles::RoleName).is_in(ROLE_NAMES)),
                    )
                    .col(ColumnDef::new(Roles::RoleDescription).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserRoles::Table)
                    .if_not_exists()
                    .col(id_col(UserRoles::UserRoleId))
                    .col(ColumnDef::new(UserRoles::UserId).integer().not_null())
                    .col(ColumnDef::new(UserRoles::RoleId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_user")
                            .from(UserRoles::Table, UserRoles::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_role")
                            .from(UserRoles::Table, UserRoles::RoleId)
                            .to(Roles::Table, Roles::RoleId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_roles_user_role")
                    .table(UserRoles::Table)
                    .col(UserRoles::UserId)
                    .col(UserRoles::RoleId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ========== REFERENCE DATA ==========
        manager
            .create_table(
                Table::create()
                    .table(Ships::Table)
                    .if_not_exists()
                    .col(id_col(Ships::ShipId))
                    .col(ColumnDef::new(Ships::ShipName).string_len(128).not_null().unique_key())
                    .col(ColumnDef::new(Ships::ShipNumber).integer().unique_key())
                    .col(ColumnDef::new(Ships::ShipAbbreviation).string_len(16))
                    .col(active_col(Ships::Active))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cruises::Table)
                    .if_not_exists()
                    .col(id_col(Cruises::CruiseId))
                    .col(ColumnDef::new(Cruises::CruiseNumber).integer().not_null())
                    .col(ColumnDef::new(Cruises::CruiseName).string_len(128).not_null())
                    .col(ColumnDef::new(Cruises::CruiseAbbreviation).string_len(16))
                    .col(active_col(Cruises::Active))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Stations::Table)
                    .if_not_exists()
                    .col(id_col(Stations::StationId))
                    .col(ColumnDef::new(Stations::CruiseId).integer().not_null())
                    .col(ColumnDef::new(Stations::StationNumber).string_len(32).not_null())
                    .col(ColumnDef::new(Stations::StationName).string_len(128).not_null())
                    .col(ColumnDef::new(Stations::StationAbbreviation).string_len(16))
                    .col(latitude_col(Stations::Latitude))
                    .col(longitude_col(Stations::Longitude))
                    .col(active_col(Stations::Active))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stations_cruise")
                            .from(Stations::Table, Stations::CruiseId)
                            .to(Cruises::Table, Cruises::CruiseId),
                    )
                    .to_owned(),
            )
            .await?;

        // A station's number is its sequence label within the cruise
        manager
            .create_index(
                Index::create()
                    .name("idx_stations_cruise_number")
                    .table(Stations::Table)
                    .col(Stations::CruiseId)
                    .col(Stations::StationNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StationTargetDepths::Table)
                    .if_not_exists()
                    .col(id_col(StationTargetDepths::TargetDepthId))
                    .col(ColumnDef::new(StationTargetDepths::StationId).integer().not_null())
                    .col(non_negative_col(StationTargetDepths::TargetPressure).not_null())
                    .col(positive_int_col(StationTargetDepths::SequenceOrder).not_null())
                    .col(positive_int_col(StationTargetDepths::NiskinPosition))
                    .col(ColumnDef::new(StationTargetDepths::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_station_target_depths_station")
                            .from(StationTargetDepths::Table, StationTargetDepths::StationId)
                            .to(Stations::Table, Stations::StationId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_station_target_depths_order")
                    .table(StationTargetDepths::Table)
                    .col(StationTargetDepths::StationId)
                    .col(StationTargetDepths::SequenceOrder)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SensorInventory::Table)
                    .if_not_exists()
                    .col(id_col(SensorInventory::SensorId))
                    .col(ColumnDef::new(SensorInventory::SensorType).string_len(64).not_null())
                    .col(ColumnDef::new(SensorInventory::VinNumber).string_len(64).unique_key())
                    .col(enum_col(SensorInventory::Status, &SENSOR_STATUSES))
                    .col(
                        ColumnDef::new(SensorInventory::InUse)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SensorInventory::BackupAvailable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(active_col(SensorInventory::Active))
                    .col(ColumnDef::new(SensorInventory::Notes).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NiskinBottles::Table)
                    .if_not_exists()
                    .col(id_col(NiskinBottles::NiskinId))
                    .col(
                        ColumnDef::new(NiskinBottles::NiskinNumber)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(active_col(NiskinBottles::Active))
                    .col(enum_col(NiskinBottles::Status, &NISKIN_STATUSES))
                    .col(ColumnDef::new(NiskinBottles::Notes).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SampleTypes::Table)
                    .if_not_exists()
                    .col(id_col(SampleTypes::SampleTypeId))
                    .col(ColumnDef::new(SampleTypes::TypeName).string_len(64).not_null().unique_key())
                    .col(ColumnDef::new(SampleTypes::Abbreviation).string_len(16))
                    .col(ColumnDef::new(SampleTypes::Description).text())
                    .col(active_col(SampleTypes::Active))
                    .to_owned(),
            )
            .await?;

        // ========== CTD CAST LOG ==========
        manager
            .create_table(
                Table::create()
                    .table(CtdCastLog::Table)
                    .if_not_exists()
                    .col(id_col(CtdCastLog::CtdCastLogId))
                    .col(ColumnDef::new(CtdCastLog::ShipId).integer().not_null())
                    .col(ColumnDef::new(CtdCastLog::StationId).integer().not_null())
                    .col(ColumnDef::new(CtdCastLog::CruiseId).integer().not_null())
                    .col(ColumnDef::new(CtdCastLog::ObserverUserId).integer().not_null())
                    .col(positive_int_col(CtdCastLog::CastNumber).not_null())
                    .col(ColumnDef::new(CtdCastLog::CastDate).date().not_null())
                    .col(ColumnDef::new(CtdCastLog::Notes).text())
                    .col(timestamp_col(CtdCastLog::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ctd_cast_log_ship")
                            .from(CtdCastLog::Table, CtdCastLog::ShipId)
                            .to(Ships::Table, Ships::ShipId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ctd_cast_log_station")
                            .from(CtdCastLog::Table, CtdCastLog::StationId)
                            .to(Stations::Table, Stations::StationId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ctd_cast_log_cruise")
                            .from(CtdCastLog::Table, CtdCastLog::CruiseId)
                            .to(Cruises::Table, Cruises::CruiseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ctd_cast_log_observer")
                            .from(CtdCastLog::Table, CtdCastLog::ObserverUserId)
                            .to(Users::Table, Users::UserId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ctd_cast_log_created_at")
                    .table(CtdCastLog::Table)
                    .col(CtdCastLog::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CastSensors::Table)
                    .if_not_exists()
                    .col(id_col(CastSensors::CastSensorId))
                    .col(ColumnDef::new(CastSensors::CastLogId).integer().not_null())
                    .col(ColumnDef::new(CastSensors::SensorId).integer().not_null())
                    .col(positive_int_col(CastSensors::PositionOrder).not_null())
                    .col(positive_int_col(CastSensors::SequenceNumber))
                    .col(ColumnDef::new(CastSensors::Notes).text())
                    .foreign_key(&mut cast_fk(
                        "fk_cast_sensors_cast",
                        CastSensors::Table,
                        CastSensors::CastLogId,
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cast_sensors_sensor")
                            .from(CastSensors::Table, CastSensors::SensorId)
                            .to(SensorInventory::Table, SensorInventory::SensorId),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== PHASE RECORDS (1:1 with a cast) ==========
        manager
            .create_table(
                Table::create()
                    .table(PreCast::Table)
                    .if_not_exists()
                    .col(id_col(PreCast::PreCastId))
                    .col(cast_ref_col(PreCast::CastLogId))
                    .col(non_negative_col(PreCast::PreCastPressureTest))
                    .col(timestamp_col(PreCast::PreCastDatetime))
                    .col(latitude_col(PreCast::PreCastLatitude))
                    .col(longitude_col(PreCast::PreCastLongitude))
                    .col(ColumnDef::new(PreCast::Notes).text())
                    .col(timestamp_col(PreCast::UpdatedAt).not_null())
                    .foreign_key(&mut cast_fk("fk_pre_cast_cast", PreCast::Table, PreCast::CastLogId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BeginningPosition::Table)
                    .if_not_exists()
                    .col(id_col(BeginningPosition::BeginId))
                    .col(cast_ref_col(BeginningPosition::CastLogId))
                    .col(timestamp_col(BeginningPosition::BeginDatetime))
                    .col(latitude_col(BeginningPosition::BeginLatitude))
                    .col(longitude_col(BeginningPosition::BeginLongitude))
                    .col(non_negative_col(BeginningPosition::BeginDepth))
                    .col(ColumnDef::new(BeginningPosition::Notes).text())
                    .col(timestamp_col(BeginningPosition::UpdatedAt).not_null())
                    .foreign_key(&mut cast_fk(
                        "fk_beginning_position_cast",
                        BeginningPosition::Table,
                        BeginningPosition::CastLogId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AtDepthPosition::Table)
                    .if_not_exists()
                    .col(id_col(AtDepthPosition::AtDepthId))
                    .col(cast_ref_col(AtDepthPosition::CastLogId))
                    .col(timestamp_col(AtDepthPosition::AtDepthDatetime))
                    .col(latitude_col(AtDepthPosition::AtDepthLatitude))
                    .col(longitude_col(AtDepthPosition::AtDepthLongitude))
                    .col(non_negative_col(AtDepthPosition::AtDepthDepth))
                    .col(ColumnDef::new(AtDepthPosition::Notes).text())
                    .col(timestamp_col(AtDepthPosition::UpdatedAt).not_null())
                    .foreign_key(&mut cast_fk(
                        "fk_at_depth_position_cast",
                        AtDepthPosition::Table,
                        AtDepthPosition::CastLogId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CaptureStart::Table)
                    .if_not_exists()
                    .col(id_col(CaptureStart::CaptureStartId))
                    .col(cast_ref_col(CaptureStart::CastLogId))
                    .col(
                        ColumnDef::new(CaptureStart::MarkscanStart)
                            .integer()
                            .check(Expr::col(CaptureStart::MarkscanStart).gte(0)),
                    )
                    .col(timestamp_col(CaptureStart::MarkscanStartDatetime))
                    .col(ColumnDef::new(CaptureStart::Notes).text())
                    .col(timestamp_col(CaptureStart::UpdatedAt).not_null())
                    .foreign_key(&mut cast_fk(
                        "fk_capture_start_cast",
                        CaptureStart::Table,
                        CaptureStart::CastLogId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BottomDepthPosition::Table)
                    .if_not_exists()
                    .col(id_col(BottomDepthPosition::BottomPositionId))
                    .col(cast_ref_col(BottomDepthPosition::CastLogId))
                    .col(timestamp_col(BottomDepthPosition::BottomDatetime))
                    .col(latitude_col(BottomDepthPosition::BottomLatitude))
                    .col(longitude_col(BottomDepthPosition::BottomLongitude))
                    .col(non_negative_col(BottomDepthPosition::HeightAboveBottom))
                    .col(non_negative_col(BottomDepthPosition::MaxPressure))
                    .col(non_negative_col(BottomDepthPosition::WinchPayout))
                    .col(ColumnDef::new(BottomDepthPosition::Notes).text())
                    .col(timestamp_col(BottomDepthPosition::UpdatedAt).not_null())
                    .foreign_key(&mut cast_fk(
                        "fk_bottom_depth_position_cast",
                        BottomDepthPosition::Table,
                        BottomDepthPosition::CastLogId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EndingPosition::Table)
                    .if_not_exists()
                    .col(id_col(EndingPosition::EndingId))
                    .col(cast_ref_col(EndingPosition::CastLogId))
                    .col(timestamp_col(EndingPosition::EndDatetime))
                    .col(latitude_col(EndingPosition::EndLatitude))
                    .col(longitude_col(EndingPosition::EndLongitude))
                    .col(non_negative_col(EndingPosition::EndDepth))
                    .col(ColumnDef::new(EndingPosition::Notes).text())
                    .col(timestamp_col(EndingPosition::UpdatedAt).not_null())
                    .foreign_key(&mut cast_fk(
                        "fk_ending_position_cast",
                        EndingPosition::Table,
                        EndingPosition::CastLogId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OnDeckPosition::Table)
                    .if_not_exists()
                    .col(id_col(OnDeckPosition::OnDeckId))
                    .col(cast_ref_col(OnDeckPosition::CastLogId))
                    .col(timestamp_col(OnDeckPosition::OnDeckDatetime))
                    .col(latitude_col(OnDeckPosition::OnDeckLatitude))
                    .col(longitude_col(OnDeckPosition::OnDeckLongitude))
                    .col(ColumnDef::new(OnDeckPosition::Notes).text())
                    .col(timestamp_col(OnDeckPosition::UpdatedAt).not_null())
                    .foreign_key(&mut cast_fk(
                        "fk_on_deck_position_cast",
                        OnDeckPosition::Table,
                        OnDeckPosition::CastLogId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostCast::Table)
                    .if_not_exists()
                    .col(id_col(PostCast::PostCastId))
                    .col(cast_ref_col(PostCast::CtdCastLogId))
                    .col(non_negative_col(PostCast::PostCastPressureCheck))
                    .col(
                        ColumnDef::new(PostCast::RealTimeDataStop)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp_col(PostCast::RealTimeDataStopDatetime))
                    .col(
                        ColumnDef::new(PostCast::DeckUnitOff)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp_col(PostCast::DeckUnitOffDatetime))
                    .col(ColumnDef::new(PostCast::Notes).text())
                    .col(timestamp_col(PostCast::UpdatedAt).not_null())
                    .foreign_key(&mut cast_fk(
                        "fk_post_cast_cast",
                        PostCast::Table,
                        PostCast::CtdCastLogId,
                    ))
                    .to_owned(),
            )
            .await?;

        // ========== SAMPLING ==========
        manager
            .create_table(
                Table::create()
                    .table(SamplePressure::Table)
                    .if_not_exists()
                    .col(id_col(SamplePressure::SamplePressureId))
                    .col(ColumnDef::new(SamplePressure::CastLogId).integer().not_null())
                    .col(ColumnDef::new(SamplePressure::NiskinId).integer().not_null())
                    .col(ColumnDef::new(SamplePressure::TargetDepthId).integer())
                    .col(non_negative_col(SamplePressure::SamplePressureValue).not_null())
                    .col(
                        ColumnDef::new(SamplePressure::SampleCaptured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp_col(SamplePressure::SampleCapturedDatetime))
                    .col(ColumnDef::new(SamplePressure::Notes).text())
                    .foreign_key(&mut cast_fk(
                        "fk_sample_pressure_cast",
                        SamplePressure::Table,
                        SamplePressure::CastLogId,
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sample_pressure_niskin")
                            .from(SamplePressure::Table, SamplePressure::NiskinId)
                            .to(NiskinBottles::Table, NiskinBottles::NiskinId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sample_pressure_target_depth")
                            .from(SamplePressure::Table, SamplePressure::TargetDepthId)
                            .to(StationTargetDepths::Table, StationTargetDepths::TargetDepthId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sample_pressure_cast")
                    .table(SamplePressure::Table)
                    .col(SamplePressure::CastLogId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Bottles::Table)
                    .if_not_exists()
                    .col(id_col(Bottles::BottleId))
                    .col(ColumnDef::new(Bottles::NiskinId).integer().not_null())
                    .col(ColumnDef::new(Bottles::SampleTypeId).integer().not_null())
                    .col(positive_int_col(Bottles::BottleNumber).not_null())
                    .col(
                        ColumnDef::new(Bottles::IsDuplicate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(positive_int_col(Bottles::DuplicateSequence))
                    .col(positive_int_col(Bottles::CapacityMl))
                    .col(enum_col(Bottles::Status, &BOTTLE_STATUSES))
                    .col(timestamp_col(Bottles::CollectedDatetime))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bottles_niskin")
                            .from(Bottles::Table, Bottles::NiskinId)
                            .to(NiskinBottles::Table, NiskinBottles::NiskinId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bottles_sample_type")
                            .from(Bottles::Table, Bottles::SampleTypeId)
                            .to(SampleTypes::Table, SampleTypes::SampleTypeId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BottleReplacements::Table)
                    .if_not_exists()
                    .col(id_col(BottleReplacements::ReplacementId))
                    .col(ColumnDef::new(BottleReplacements::OriginalBottleId).integer().not_null())
                    .col(
                        ColumnDef::new(BottleReplacements::ReplacementBottleId)
                            .integer()
                            .not_null(),
                    )
                    .col(timestamp_col(BottleReplacements::ReplacementDatetime).not_null())
                    .col(ColumnDef::new(BottleReplacements::Reason).text())
                    .col(ColumnDef::new(BottleReplacements::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bottle_replacements_original")
                            .from(BottleReplacements::Table, BottleReplacements::OriginalBottleId)
                            .to(Bottles::Table, Bottles::BottleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bottle_replacements_replacement")
                            .from(
                                BottleReplacements::Table,
                                BottleReplacements::ReplacementBottleId,
                            )
                            .to(Bottles::Table, Bottles::BottleId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SamplingSession::Table)
                    .if_not_exists()
                    .col(id_col(SamplingSession::SessionId))
                    .col(ColumnDef::new(SamplingSession::CtdCastLogId).integer().not_null())
                    .col(ColumnDef::new(SamplingSession::OnDeckPositionId).integer())
                    .col(timestamp_col(SamplingSession::SamplingStartDatetime).not_null())
                    .col(timestamp_col(SamplingSession::SamplingEndDatetime))
                    .col(ColumnDef::new(SamplingSession::Notes).text())
                    .foreign_key(&mut cast_fk(
                        "fk_sampling_session_cast",
                        SamplingSession::Table,
                        SamplingSession::CtdCastLogId,
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sampling_session_on_deck")
                            .from(SamplingSession::Table, SamplingSession::OnDeckPositionId)
                            .to(OnDeckPosition::Table, OnDeckPosition::OnDeckId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SampleTiming::Table)
                    .if_not_exists()
                    .col(id_col(SampleTiming::TimingId))
                    .col(ColumnDef::new(SampleTiming::SampleTypeId).integer().not_null())
                    .col(ColumnDef::new(SampleTiming::SessionId).integer().not_null())
                    .col(ColumnDef::new(SampleTiming::SetByUserId).integer().not_null())
                    .col(positive_int_col(SampleTiming::TimeLimitHours).not_null())
                    .col(timestamp_col(SampleTiming::DeadlineDatetime).not_null())
                    .col(timestamp_col(SampleTiming::SetDatetime).not_null())
                    .col(ColumnDef::new(SampleTiming::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sample_timing_sample_type")
                            .from(SampleTiming::Table, SampleTiming::SampleTypeId)
                            .to(SampleTypes::Table, SampleTypes::SampleTypeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sample_timing_session")
                            .from(SampleTiming::Table, SampleTiming::SessionId)
                            .to(SamplingSession::Table, SamplingSession::SessionId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sample_timing_set_by")
                            .from(SampleTiming::Table, SampleTiming::SetByUserId)
                            .to(Users::Table, Users::UserId),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children before parents
        manager
            .drop_table(Table::drop().table(SampleTiming::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SamplingSession::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BottleReplacements::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bottles::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SamplePressure::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PostCast::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OnDeckPosition::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EndingPosition::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BottomDepthPosition::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CaptureStart::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AtDepthPosition::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BeginningPosition::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PreCast::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CastSensors::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CtdCastLog::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SampleTypes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(NiskinBottles::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SensorInventory::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StationTargetDepths::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stations::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cruises::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ships::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserRoles::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

// ========== Table and column identifiers ==========

#[derive(DeriveIden, Clone, Copy)]
enum Users {
    Table,
    UserId,
    Username,
    Password,
    FirstName,
    LastName,
    Active,
}

#[derive(DeriveIden, Clone, Copy)]
pub(crate) enum Roles {
    Table,
    RoleId,
    RoleName,
    RoleDescription,
}

#[derive(DeriveIden, Clone, Copy)]
enum UserRoles {
    Table,
    UserRoleId,
    UserId,
    RoleId,
}

#[derive(DeriveIden, Clone, Copy)]
enum Ships {
    Table,
    ShipId,
    ShipName,
    ShipNumber,
    ShipAbbreviation,
    Active,
}

#[derive(DeriveIden, Clone, Copy)]
enum Cruises {
    Table,
    CruiseId,
    CruiseNumber,
    CruiseName,
    CruiseAbbreviation,
    Active,
}

#[derive(DeriveIden, Clone, Copy)]
enum Stations {
    Table,
    StationId,
    CruiseId,
    StationNumber,
    StationName,
    StationAbbreviation,
    Latitude,
    Longitude,
    Active,
}

#[derive(DeriveIden, Clone, Copy)]
enum StationTargetDepths {
    Table,
    TargetDepthId,
    StationId,
    TargetPressure,
    SequenceOrder,
    NiskinPosition,
    Notes,
}

#[derive(DeriveIden, Clone, Copy)]
enum SensorInventory {
    Table,
    SensorId,
    SensorType,
    VinNumber,
    Status,
    InUse,
    BackupAvailable,
    Active,
    Notes,
}

#[derive(DeriveIden, Clone, Copy)]
enum NiskinBottles {
    Table,
    NiskinId,
    NiskinNumber,
    Active,
    Status,
    Notes,
}

#[derive(DeriveIden, Clone, Copy)]
pub(crate) enum SampleTypes {
    Table,
    SampleTypeId,
    TypeName,
    Abbreviation,
    Description,
    Active,
}

#[derive(DeriveIden, Clone, Copy)]
enum CtdCastLog {
    Table,
    CtdCastLogId,
    ShipId,
    StationId,
    CruiseId,
    ObserverUserId,
    CastNumber,
    CastDate,
    Notes,
    CreatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum CastSensors {
    Table,
    CastSensorId,
    CastLogId,
    SensorId,
    PositionOrder,
    SequenceNumber,
    Notes,
}

#[derive(DeriveIden, Clone, Copy)]
enum PreCast {
    Table,
    PreCastId,
    CastLogId,
    PreCastPressureTest,
    PreCastDatetime,
    PreCastLatitude,
    PreCastLongitude,
    Notes,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum BeginningPosition {
    Table,
    BeginId,
    CastLogId,
    BeginDatetime,
    BeginLatitude,
    BeginLongitude,
    BeginDepth,
    Notes,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum AtDepthPosition {
    Table,
    AtDepthId,
    CastLogId,
    AtDepthDatetime,
    AtDepthLatitude,
    AtDepthLongitude,
    AtDepthDepth,
    Notes,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum CaptureStart {
    Table,
    CaptureStartId,
    CastLogId,
    MarkscanStart,
    MarkscanStartDatetime,
    Notes,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum BottomDepthPosition {
    Table,
    BottomPositionId,
    CastLogId,
    BottomDatetime,
    BottomLatitude,
    BottomLongitude,
    HeightAboveBottom,
    MaxPressure,
    WinchPayout,
    Notes,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum EndingPosition {
    Table,
    EndingId,
    CastLogId,
    EndDatetime,
    EndLatitude,
    EndLongitude,
    EndDepth,
    Notes,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum OnDeckPosition {
    Table,
    OnDeckId,
    CastLogId,
    OnDeckDatetime,
    OnDeckLatitude,
    OnDeckLongitude,
    Notes,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum PostCast {
    Table,
    PostCastId,
    CtdCastLogId,
    PostCastPressureCheck,
    RealTimeDataStop,
    RealTimeDataStopDatetime,
    DeckUnitOff,
    DeckUnitOffDatetime,
    Notes,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum SamplePressure {
    Table,
    SamplePressureId,
    CastLogId,
    NiskinId,
    TargetDepthId,
    SamplePressureValue,
    SampleCaptured,
    SampleCapturedDatetime,
    Notes,
}

#[derive(DeriveIden, Clone, Copy)]
enum Bottles {
    Table,
    BottleId,
    NiskinId,
    SampleTypeId,
    BottleNumber,
    IsDuplicate,
    DuplicateSequence,
    CapacityMl,
    Status,
    CollectedDatetime,
}

#[derive(DeriveIden, Clone, Copy)]
enum BottleReplacements {
    Table,
    ReplacementId,
    OriginalBottleId,
    ReplacementBottleId,
    ReplacementDatetime,
    Reason,
    Notes,
}

#[derive(DeriveIden, Clone, Copy)]
enum SamplingSession {
    Table,
    SessionId,
    CtdCastLogId,
    OnDeckPositionId,
    SamplingStartDatetime,
    SamplingEndDatetime,
    Notes,
}

#[derive(DeriveIden, Clone, Copy)]
enum SampleTiming {
    Table,
    TimingId,
    SampleTypeId,
    SessionId,
    SetByUserId,
    TimeLimitHours,
    DeadlineDatetime,
    SetDatetime,
    Notes,
}
