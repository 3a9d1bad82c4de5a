use serde::{Deserialize, Serialize};

use crate::models::Table;

/// A car may be serviced at this garage. At most one row per pair.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CarGarage {
    pub car_id: i32,
    pub garage_id: i32,
}

#[derive(Clone)]
pub struct CarGarageTable;

impl Table for CarGarageTable {
    fn name(&self) -> &'static str {
        "cars_garages_link"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS cars_garages_link (
                car_id INTEGER NOT NULL,
                garage_id INTEGER NOT NULL,
                PRIMARY KEY (car_id, garage_id),
                FOREIGN KEY (car_id) REFERENCES cars (id),
                FOREIGN KEY (garage_id) REFERENCES garages (id)
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS cars_garages_link;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["cars", "garages"]
    }
}
