pub use sea_orm_migration::prelude::*;

mod m20261018_000001_init;
mod m20261018_000002_seed_reference;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_000001_init::Migration),
            Box::new(m20261018_000002_seed_reference::Migration),
        ]
    }
}
