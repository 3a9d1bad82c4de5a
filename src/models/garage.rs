use serde::{Deserialize, Serialize};

use crate::models::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Garage {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub city: String,
    // Maximum simultaneous maintenance slots per calendar day.
    pub capacity: i32,
}

#[derive(Clone)]
pub struct GarageTable;

impl Table for GarageTable {
    fn name(&self) -> &'static str {
        "garages"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS garages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                location TEXT NOT NULL,
                city TEXT NOT NULL,
                capacity INTEGER NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS garages;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
