use serde::{Deserialize, Serialize};

use crate::models::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Car {
    pub id: i32,
    pub make: String,
    pub model: String,
    pub production_year: i32,
    // Intended unique across the fleet, not enforced by the schema.
    pub license_plate: String,
}

#[derive(Clone)]
pub struct CarTable;

impl Table for CarTable {
    fn name(&self) -> &'static str {
        "cars"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS cars (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                make TEXT NOT NULL,
                model TEXT NOT NULL,
                production_year INTEGER NOT NULL,
                license_plate TEXT NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS cars;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
