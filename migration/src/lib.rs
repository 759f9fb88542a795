pub use sea_orm_migration::prelude::*;

mod m20251201_000001_create_academic_structure;
mod m20251201_000002_create_users_and_schedule;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251201_000001_create_academic_structure::Migration),
            Box::new(m20251201_000002_create_users_and_schedule::Migration),
        ]
    }
}
