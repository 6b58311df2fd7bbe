use sea_orm_migration::prelude::*;

use crate::m20261018_000001_init::{Roles, SampleTypes};

#[derive(DeriveMigrationName)]
pub struct Migration;

const ROLES: [(&str, &str); 6] = [
    ("admin", "System administrator with full access"),
    ("bottlecop", "Bottle operations coordinator"),
    ("console", "Console operator"),
    ("observer", "CTD cast observer"),
    ("analyst", "Sample analyzer"),
    ("sampler", "Sample collector"),
];

const SAMPLE_TYPES: [(&str, &str, &str); 14] = [
    ("Oxygen", "O2", "Dissolved oxygen samples"),
    ("Oxygen Duplicate", "O2-DUP", "Duplicate dissolved oxygen samples"),
    ("Total Alkalinity", "TA", "Total alkalinity measurement"),
    ("Total Alkalinity Duplicate", "TA-DUP", "Duplicate total alkalinity samples"),
    ("Dissolved Inorganic Carbon", "DIC", "Dissolved inorganic carbon measurement"),
    (
        "Dissolved Inorganic Carbon Duplicate",
        "DIC-DUP",
        "Duplicate dissolved inorganic carbon samples",
    ),
    ("pH", "PH", "Potential of hydrogen measurement"),
    ("pH Duplicate", "PH-DUP", "Duplicate pH samples"),
    ("Nutrients", "NUTS", "Nutrient analysis samples"),
    ("Nutrients Duplicate", "NUTS-DUP", "Duplicate nutrient samples"),
    ("Salinity", "SAL", "Salinity measurement samples"),
    ("Salinity Duplicate", "SAL-DUP", "Duplicate salinity samples"),
    ("MAC Samples", "MAC", "MAC analysis samples"),
    ("Reference Water", "REF", "Reference water samples"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut roles = Query::insert();
        roles
            .into_table(Roles::Table)
            .columns([Roles::RoleName, Roles::RoleDescription])
            .on_conflict(OnConflict::column(Roles::RoleName).do_nothing().to_owned());
        for (name, description) in ROLES {
            roles.values_panic([name.into(), description.into()]);
        }
        manager.exec_stmt(roles).await?;

        let mut sample_types = Query::insert();
        sample_types
            .into_table(SampleTypes::Table)
            .columns([
                SampleTypes::TypeName,
                SampleTypes::Abbreviation,
                SampleTypes::Description,
            ])
            .on_conflict(OnConflict::column(SampleTypes::TypeName).do_nothing().to_owned());
        for (name, abbreviation, description) in SAMPLE_TYPES {
            sample_types.values_panic([name.into(), abbreviation.into(), description.into()]);
        }
        manager.exec_stmt(sample_types).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(SampleTypes::Table)
                    .and_where(
                        Expr::col(SampleTypes::TypeName)
                            .is_in(SAMPLE_TYPES.iter().map(|(name, _, _)| *name)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Roles::Table)
                    .and_where(Expr::col(Roles::RoleName).is_in(ROLES.iter().map(|(name, _)| *name)))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
