use std::sync::Arc;

use sqlx::{Error, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Garage;

pub struct CarGarageRepository {
    storage: Arc<Storage>,
}

impl CarGarageRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl CarGarageRepository {
    pub async fn create(
        &self,
        car_id: i32,
        garage_id: i32,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO cars_garages_link (car_id, garage_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(car_id)
        .bind(garage_id)
        .execute(&mut **transaction)
        .await?;

        Ok(())
    }

    pub async fn find_garages_by_car(&self, car_id: i32) -> Result<Vec<Garage>, Error> {
        let garages: Vec<Garage> = sqlx::query_as(
            r#"
            SELECT g.* FROM garages g
            INNER JOIN cars_garages_link l ON g.id = l.garage_id
            WHERE l.car_id = $1
            ORDER BY g.id
            "#,
        )
        .bind(car_id)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(garages)
    }

    pub async fn delete_by_car(
        &self,
        car_id: i32,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query("DELETE FROM cars_garages_link WHERE car_id = $1")
            .bind(car_id)
            .execute(&mut **transaction)
            .await?;

        Ok(())
    }

    pub async fn delete_by_garage(
        &self,
        garage_id: i32,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query("DELETE FROM cars_garages_link WHERE garage_id = $1")
            .bind(garage_id)
            .execute(&mut **transaction)
            .await?;

        Ok(())
    }
}
