use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, Month};
use utoipa::ToSchema;

use crate::errors::{ApiError, GarageError};
use crate::repositories::{GarageRepository, MaintenanceRequestRepository};

/// Remaining slots for one garage on one day.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyAvailability {
    pub date: Date,
    pub available_capacity: i64,
}

/// Booking count for one garage over one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRequests {
    pub year_month: String,
    pub requests: i64,
}

pub fn parse_date(raw: &str) -> Option<Date> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &format).ok()
}

pub fn parse_year_month(raw: &str) -> Option<(i32, Month)> {
    let (year, month) = raw.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u8 = month.parse().ok()?;

    Month::try_from(month).ok().map(|m| (year, m))
}

pub struct ReportService {
    garage_repository: Arc<GarageRepository>,
    maintenance_repository: Arc<MaintenanceRequestRepository>,
}

impl ReportService {
    pub fn new(
        garage_repository: Arc<GarageRepository>,
        maintenance_repository: Arc<MaintenanceRequestRepository>,
    ) -> Self {
        Self {
            garage_repository,
            maintenance_repository,
        }
    }

    /// One entry per calendar day in `[start, end]` inclusive, each with the
    /// garage capacity minus the bookings on that day. An inverted range
    /// yields an empty report. One aggregate query per day, sequentially;
    /// range length is not capped.
    pub async fn daily_availability(
        &self,
        garage_id: i32,
        start: Date,
        end: Date,
    ) -> Result<Vec<DailyAvailability>, ApiError> {
        let garage = self
            .garage_repository
            .find_by_id(garage_id)
            .await?
            .ok_or(GarageError::GarageNotFound)?;

        let mut report = Vec::new();
        let mut current = start;
        while current <= end {
            let booked = self
                .maintenance_repository
                .count_for_garage_on_date(garage_id, current)
                .await?;

            report.push(DailyAvailability {
                date: current,
                available_capacity: garage.capacity as i64 - booked,
            });

            match current.next_day() {
                Some(next) => current = next,
                None => break,
            }
        }

        Ok(report)
    }

    /// One entry per month from `start` to `end` inclusive, each counting the
    /// garage's requests scheduled inside that calendar month.
    pub async fn monthly_requests(
        &self,
        garage_id: i32,
        start: (i32, Month),
        end: (i32, Month),
    ) -> Result<Vec<MonthlyRequests>, ApiError> {
        self.garage_repository
            .find_by_id(garage_id)
            .await?
            .ok_or(GarageError::GarageNotFound)?;

        let (mut year, mut month) = start;
        let (end_year, end_month) = end;

        let mut report = Vec::new();
        while (year, month as u8) <= (end_year, end_month as u8) {
            let first = Date::from_calendar_date(year, month, 1).map_err(anyhow::Error::from)?;
            let last = Date::from_calendar_date(year, month, time::util::days_in_year_month(year, month))
                .map_err(anyhow::Error::from)?;

            let requests = self
                .maintenance_repository
                .count_for_garage_between(garage_id, first, last)
                .await?;

            report.push(MonthlyRequests {
                year_month: format!("{year:04}-{:02}", month as u8),
                requests,
            });

            month = month.next();
            if month == Month::January {
                year += 1;
            }
        }

        Ok(report)
    }
}
