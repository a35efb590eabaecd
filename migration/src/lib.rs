pub use sea_orm_migration::prelude::*;

mod m20190601_000001_create_translations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20190601_000001_create_translations::Migration)]
    }
}
