use serde::{Deserialize, Serialize};
use time::Date;

use crate::models::Table;

/// A scheduled service booking binding one car to one garage on one date.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MaintenanceRequest {
    pub id: i32,
    pub car_id: i32,
    pub garage_id: i32,
    pub service_type: String,
    pub scheduled_date: Date,
}

#[derive(Clone)]
pub struct MaintenanceRequestTable;

impl Table for MaintenanceRequestTable {
    fn name(&self) -> &'static str {
        "maintenance_requests"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS maintenance_requests (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                car_id INTEGER NOT NULL,
                garage_id INTEGER NOT NULL,
                service_type TEXT NOT NULL,
                scheduled_date DATE NOT NULL,
                FOREIGN KEY (car_id) REFERENCES cars (id),
                FOREIGN KEY (garage_id) REFERENCES garages (id)
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS maintenance_requests;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["cars", "garages"]
    }
}
