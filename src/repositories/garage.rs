use std::sync::Arc;

use sqlx::{Error, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Garage;

pub struct GarageRepository {
    storage: Arc<Storage>,
}

impl GarageRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &sqlx::SqlitePool {
        self.storage.get_pool()
    }
}

impl GarageRepository {
    pub async fn create(
        &self,
        item: &Garage,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO garages (name, location, city, capacity)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&item.name)
        .bind(&item.location)
        .bind(&item.city)
        .bind(item.capacity)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Garage>, Error> {
        let garage: Option<Garage> = sqlx::query_as("SELECT * FROM garages WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(garage)
    }

    pub async fn find_all(&self, city: Option<&str>) -> Result<Vec<Garage>, Error> {
        let garages: Vec<Garage> = sqlx::query_as(
            r#"
            SELECT * FROM garages
            WHERE ($1 IS NULL OR city = $1)
            ORDER BY id
            "#,
        )
        .bind(city)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(garages)
    }

    pub async fn update(
        &self,
        id: i32,
        item: &Garage,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE garages
            SET name = $1, location = $2, city = $3, capacity = $4
            WHERE id = $5
            "#,
        )
        .bind(&item.name)
        .bind(&item.location)
        .bind(&item.city)
        .bind(item.capacity)
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
        sqlx::query("DELETE FROM garages WHERE id = $1")
            .bind(id)
            .execute(&mut **transaction)
            .await?;

        Ok(())
    }
}
