use std::sync::Arc;

use sqlx::{Error, Sqlite, Transaction};
use time::Date;

use crate::configs::Storage;
use crate::models::MaintenanceRequest;

/// Conjunctive filters for the maintenance list query. Date bounds are
/// inclusive on `scheduled_date`.
#[derive(Debug, Default, Clone)]
pub struct MaintenanceFilter {
    pub car_id: Option<i32>,
    pub garage_id: Option<i32>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

pub struct MaintenanceRequestRepository {
    storage: Arc<Storage>,
}

impl MaintenanceRequestRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &sqlx::SqlitePool {
        self.storage.get_pool()
    }
}

impl MaintenanceRequestRepository {
    pub async fn create(
        &self,
        item: &MaintenanceRequest,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO maintenance_requests (car_id, garage_id, service_type, scheduled_date)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(item.car_id)
        .bind(item.garage_id)
        .bind(&item.service_type)
        .bind(item.scheduled_date)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<MaintenanceRequest>, Error> {
        let request: Option<MaintenanceRequest> =
            sqlx::query_as("SELECT * FROM maintenance_requests WHERE id = $1")
                .bind(id)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(request)
    }

    pub async fn find_with_filters(
        &self,
        filter: &MaintenanceFilter,
    ) -> Result<Vec<MaintenanceRequest>, Error> {
        let requests: Vec<MaintenanceRequest> = sqlx::query_as(
            r#"
            SELECT * FROM maintenance_requests
            WHERE ($1 IS NULL OR car_id = $1)
                AND ($2 IS NULL OR garage_id = $2)
                AND ($3 IS NULL OR scheduled_date >= $3)
                AND ($4 IS NULL OR scheduled_date <= $4)
            ORDER BY id
            "#,
        )
        .bind(filter.car_id)
        .bind(filter.garage_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(requests)
    }

    pub async fn update(
        &self,
        id: i32,
        item: &MaintenanceRequest,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE maintenance_requests
            SET car_id = $1, garage_id = $2, service_type = $3, scheduled_date = $4
            WHERE id = $5
            "#,
        )
        .bind(item.car_id)
        .bind(item.garage_id)
        .bind(&item.service_type)
        .bind(item.scheduled_date)
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
        sqlx::query("DELETE FROM maintenance_requests WHERE id = $1")
            .bind(id)
            .execute(&mut **transaction)
            .await?;

        Ok(())
    }

    pub async fn delete_by_car(
        &self,
        car_id: i32,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query("DELETE FROM maintenance_requests WHERE car_id = $1")
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
        sqlx::query("DELETE FROM maintenance_requests WHERE garage_id = $1")
            .bind(garage_id)
            .execute(&mut **transaction)
            .await?;

        Ok(())
    }

    /// Bookings for a garage on one day. Feeds the write-time capacity check
    /// and the daily availability report.
    pub async fn count_for_garage_on_date(
        &self,
        garage_id: i32,
        date: Date,
    ) -> Result<i64, Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM maintenance_requests
            WHERE garage_id = $1 AND scheduled_date = $2
            "#,
        )
        .bind(garage_id)
        .bind(date)
        .fetch_one(self.storage.get_pool())
        .await?;

        Ok(count)
    }

    /// Same as `count_for_garage_on_date` but leaves out one record, so an
    /// update does not count the row it is about to replace.
    pub async fn count_for_garage_on_date_excluding(
        &self,
        garage_id: i32,
        date: Date,
        request_id: i32,
    ) -> Result<i64, Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM maintenance_requests
            WHERE garage_id = $1 AND scheduled_date = $2 AND id != $3
            "#,
        )
        .bind(garage_id)
        .bind(date)
        .bind(request_id)
        .fetch_one(self.storage.get_pool())
        .await?;

        Ok(count)
    }

    pub async fn count_for_garage_between(
        &self,
        garage_id: i32,
        start: Date,
        end: Date,
    ) -> Result<i64, Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM maintenance_requests
            WHERE garage_id = $1 AND scheduled_date >= $2 AND scheduled_date <= $3
            "#,
        )
        .bind(garage_id)
        .bind(start)
        .bind(end)
        .fetch_one(self.storage.get_pool())
        .await?;

        Ok(count)
    }
}
