use std::sync::Arc;

use sqlx::{Error, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Car;

/// Conjunctive filters for the car list query. `None` fields do not constrain.
#[derive(Debug, Default, Clone)]
pub struct CarFilter {
    pub make: Option<String>,
    pub garage_id: Option<i32>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
}

pub struct CarRepository {
    storage: Arc<Storage>,
}

impl CarRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &sqlx::SqlitePool {
        self.storage.get_pool()
    }
}

impl CarRepository {
    pub async fn create(
        &self,
        item: &Car,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO cars (make, model, production_year, license_plate)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&item.make)
        .bind(&item.model)
        .bind(item.production_year)
        .bind(&item.license_plate)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Car>, Error> {
        let car: Option<Car> = sqlx::query_as("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(car)
    }

    pub async fn find_with_filters(&self, filter: &CarFilter) -> Result<Vec<Car>, Error> {
        let cars: Vec<Car> = sqlx::query_as(
            r#"
            SELECT DISTINCT c.* FROM cars c
            LEFT JOIN cars_garages_link l ON c.id = l.car_id
            WHERE ($1 IS NULL OR c.make = $1)
                AND ($2 IS NULL OR l.garage_id = $2)
                AND ($3 IS NULL OR c.production_year >= $3)
                AND ($4 IS NULL OR c.production_year <= $4)
            ORDER BY c.id
            "#,
        )
        .bind(filter.make.as_deref())
        .bind(filter.garage_id)
        .bind(filter.year_from)
        .bind(filter.year_to)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(cars)
    }

    pub async fn update(
        &self,
        id: i32,
        item: &Car,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE cars
            SET make = $1, model = $2, production_year = $3, license_plate = $4
            WHERE id = $5
            "#,
        )
        .bind(&item.make)
        .bind(&item.model)
        .bind(item.production_year)
        .bind(&item.license_plate)
        .bind(id)
        .execute(&mut **transaction)
        .await?;

        Ok(())
    }

    pub async fn delete(
        &self,
        id: i32,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&mut **transaction)
            .await?;

        Ok(())
    }
}
