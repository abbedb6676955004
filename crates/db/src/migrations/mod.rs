//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20241201_000001_create_user_table;
mod m20241201_000002_create_lost_item_table;
mod m20241201_000003_create_found_item_table;
mod m20241201_000004_create_claim_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241201_000001_create_user_table::Migration),
            Box::new(m20241201_000002_create_lost_item_table::Migration),
            Box::new(m20241201_000003_create_found_item_table::Migration),
            Box::new(m20241201_000004_create_claim_table::Migration),
        ]
    }
}
