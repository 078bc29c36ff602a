// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Remote activity API client.
//!
//! Handles:
//! - Monthly activity list fetching with bearer auth
//! - Decoding the several response shapes the API has used
//! - Mapping 401/403 to authentication failures and everything else to API errors

use async_trait::async_trait;
use chrono::TimeZone;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{
    Activity, ActivityId, Calories, DateTime, Distance, Duration, SportType, ValidationError,
};

/// Source of activities for a calendar month.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Fetch every activity that started in the 0-based `month`.
    ///
    /// Fails with [`AppError::Authentication`] when not logged in and
    /// [`AppError::Api`] on transport or non-2xx errors.
    async fn fetch_activities(&self, year: i32, month: u32) -> Result<Vec<Activity>, AppError>;
}

/// HTTP implementation of [`ActivitySource`].
#[derive(Clone)]
pub struct HttpActivitySource {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

/// Upper bound on one list request, connect included.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

impl HttpActivitySource {
    pub fn new(
        base_url: impl Into<String>,
        access_token: Option<String>,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token,
        })
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 401 || status.as_u16() == 403 {
                tracing::warn!(status = status.as_u16(), "Activity API rejected credentials");
                return Err(AppError::Authentication);
            }

            return Err(AppError::Api(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Api(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl ActivitySource for HttpActivitySource {
    async fn fetch_activities(&self, year: i32, month: u32) -> Result<Vec<Activity>, AppError> {
        let token = self.access_token.as_deref().ok_or(AppError::Authentication)?;
        let url = format!("{}/activities", self.base_url);

        tracing::debug!(year, month, "Fetching activities from API");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[("year", year.to_string()), ("month", (month + 1).to_string())])
            .send()
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;

        let body: ActivityListResponse = self.check_response_json(response).await?;
        Ok(decode_activities(body.into_records()))
    }
}

// ─── Wire format ─────────────────────────────────────────────────────────────

/// The list endpoint has returned several envelope shapes over time.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ActivityListResponse {
    Bare(Vec<ActivityRecord>),
    Activities { activities: Vec<ActivityRecord> },
    DataList { data: DataListBody },
    Result { result: ResultBody },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataListBody {
    #[serde(default)]
    pub data_list: Vec<ActivityRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ResultBody {
    #[serde(default)]
    pub data: Vec<ActivityRecord>,
}

impl ActivityListResponse {
    pub fn into_records(self) -> Vec<ActivityRecord> {
        match self {
            ActivityListResponse::Bare(records) => records,
            ActivityListResponse::Activities { activities } => activities,
            ActivityListResponse::DataList { data } => data.data_list,
            ActivityListResponse::Result { result } => result.data,
        }
    }
}

/// Identifier sent either as a string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

/// Start time sent either as a date string or an epoch timestamp.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTime {
    Text(String),
    Epoch(i64),
}

/// Epoch values above this are milliseconds, below are seconds.
const EPOCH_MILLIS_THRESHOLD: u64 = 100_000_000_000;

impl RawTime {
    fn to_datetime(&self) -> Result<DateTime, ValidationError> {
        match self {
            RawTime::Text(raw) => DateTime::parse(raw),
            RawTime::Epoch(value) => {
                let millis = if value.unsigned_abs() >= EPOCH_MILLIS_THRESHOLD {
                    *value
                } else {
                    value
                        .checked_mul(1000)
                        .ok_or_else(|| ValidationError::InvalidDate(value.to_string()))?
                };
                chrono::Local
                    .timestamp_millis_opt(millis)
                    .single()
                    .map(|dt| DateTime::from_naive(dt.naive_local()))
                    .ok_or_else(|| ValidationError::InvalidDate(value.to_string()))
            }
        }
    }
}

/// One activity as the API sends it. Every field is optional here; the
/// conversion into [`Activity`] decides what is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    #[serde(alias = "activityId", alias = "labelId")]
    pub id: Option<RawId>,
    pub name: Option<String>,
    #[serde(alias = "sport_type", alias = "sportCode", alias = "mode")]
    pub sport_type: Option<i32>,
    #[serde(alias = "start_time", alias = "startDate", alias = "date")]
    pub start_time: Option<RawTime>,
    /// Seconds
    #[serde(alias = "totalTime", alias = "workoutTime")]
    pub duration: Option<f64>,
    /// Meters
    pub distance: Option<f64>,
    #[serde(alias = "calorie")]
    pub calories: Option<f64>,
    #[serde(alias = "deviceName")]
    pub device: Option<String>,
    #[serde(alias = "avgHr")]
    pub avg_heart_rate: Option<u32>,
    pub avg_speed: Option<f64>,
}

impl TryFrom<ActivityRecord> for Activity {
    type Error = ValidationError;

    fn try_from(record: ActivityRecord) -> Result<Self, Self::Error> {
        let id = match record.id {
            Some(RawId::Text(id)) => ActivityId::new(id)?,
            Some(RawId::Number(id)) => ActivityId::new(id.to_string())?,
            None => return Err(ValidationError::EmptyId),
        };
        let start_time = record
            .start_time
            .ok_or_else(|| ValidationError::InvalidDate("missing start time".to_string()))?
            .to_datetime()?;
        let sport_type = SportType::from_code(record.sport_type.unwrap_or(0));
        let name = record
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| sport_type.name.clone());

        Ok(Activity {
            id,
            name,
            sport_type,
            start_time,
            duration: Duration::from_seconds(record.duration.unwrap_or(0.0))?,
            distance: Distance::from_meters(record.distance.unwrap_or(0.0))?,
            calories: Calories::new(record.calories.unwrap_or(0.0))?,
            device: record.device,
            avg_heart_rate: record.avg_heart_rate,
            avg_speed: record.avg_speed,
        })
    }
}

/// Validate raw records, skipping the ones that do not form a valid activity.
pub fn decode_activities(records: Vec<ActivityRecord>) -> Vec<Activity> {
    let total = records.len();
    let activities: Vec<Activity> = records
        .into_iter()
        .filter_map(|record| match Activity::try_from(record) {
            Ok(activity) => Some(activity),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping invalid activity record");
                None
            }
        })
        .collect();

    if activities.len() < total {
        tracing::info!(
            kept = activities.len(),
            skipped = total - activities.len(),
            "Decoded activity records"
        );
    }
    activities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Vec<Activity> {
        let response: ActivityListResponse = serde_json::from_str(json).unwrap();
        decode_activities(response.into_records())
    }

    #[test]
    fn test_decode_bare_array() {
        let activities = decode(
            r#"[{"id":"a1","name":"Morning Run","sportType":100,
                 "startTime":"2024-03-01T07:00:00","duration":1800,
                 "distance":5000,"calories":300}]"#,
        );
        assert_eq!(activities.len(), 1);
        let a = &activities[0];
        assert_eq!(a.id.as_str(), "a1");
        assert_eq!(a.sport_type.name, "Run");
        assert_eq!(a.distance.kilometers(), 5.0);
        assert_eq!(a.duration.minutes(), 30.0);
    }

    #[test]
    fn test_decode_envelopes() {
        let wrapped = decode(
            r#"{"activities":[{"id":1,"sportType":200,"startTime":"2024-03-02"}]}"#,
        );
        assert_eq!(wrapped[0].id.as_str(), "1");
        assert_eq!(wrapped[0].name, "Road Bike");

        let nested = decode(
            r#"{"data":{"dataList":[{"labelId":"x","mode":300,"date":"2024-03-03T10:00:00",
                 "totalTime":600,"calorie":50,"deviceName":"Watch"}]}}"#,
        );
        assert_eq!(nested[0].id.as_str(), "x");
        assert_eq!(nested[0].device.as_deref(), Some("Watch"));
        assert_eq!(nested[0].calories.value(), 50.0);

        let result = decode(r#"{"result":{"data":[{"id":"r","startTime":"2024-03-04"}]}}"#);
        assert_eq!(result[0].sport_type.code, 0);
        assert_eq!(result[0].sport_type.name, "Other");
    }

    #[test]
    fn test_invalid_records_are_skipped() {
        let activities = decode(
            r#"[{"id":"ok","startTime":"2024-03-01"},
                {"id":"neg","startTime":"2024-03-01","distance":-5},
                {"id":"","startTime":"2024-03-01"},
                {"id":"nodate"},
                {"id":"baddate","startTime":"2024-02-30"},
                {"id":"minepoch","startTime":-9223372036854775808},
                {"id":"maxepoch","startTime":9223372036854775807}]"#,
        );
        let ids: Vec<&str> = activities.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["ok"]);
    }

    #[test]
    fn test_epoch_start_times() {
        let seconds = RawTime::Epoch(1_709_280_000).to_datetime().unwrap();
        let millis = RawTime::Epoch(1_709_280_000_000).to_datetime().unwrap();
        assert_eq!(seconds, millis);
        assert!(RawTime::Epoch(i64::MIN).to_datetime().is_err());
        assert!(RawTime::Epoch(i64::MAX).to_datetime().is_err());
    }

    #[tokio::test]
    async fn test_missing_token_is_authentication_error() {
        let source = HttpActivitySource::new("http://127.0.0.1:9/", None).unwrap();
        assert_eq!(source.base_url, "http://127.0.0.1:9");
        let result = source.fetch_activities(2024, 2).await;
        assert!(matches!(result, Err(AppError::Authentication)));
    }
}
