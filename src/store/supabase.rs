use std::time::Instant;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value;

use super::ReportSource;
use crate::config::Config;
use crate::error::AppError;
use crate::telemetry::metrics::REPORT_FETCH_DURATION;

const REPORTS_TABLE: &str = "relatoriosIA";
const PAYLOAD_COLUMN: &str = "jsonIA";

/// PostgREST client for the hosted Supabase table holding generated reports.
pub struct SupabaseReports {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ReportRow {
    #[serde(rename = "jsonIA")]
    json_ia: Option<Value>,
}

#[derive(Deserialize)]
struct PostgrestError {
    message: Option<String>,
}

impl SupabaseReports {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.supabase_anon_key)
            .map_err(|e| anyhow::anyhow!("invalid Supabase anon key header: {e}"))?;
        headers.insert("apikey", key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.supabase_anon_key))
                .map_err(|e| anyhow::anyhow!("invalid Supabase auth header: {e}"))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build Supabase client: {e}"))?;

        Ok(Self {
            client,
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
        })
    }

    fn reports_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, REPORTS_TABLE)
    }
}

#[async_trait::async_trait]
impl ReportSource for SupabaseReports {
    #[tracing::instrument(
        name = "db.reports.fetch_latest",
        skip(self),
        fields(db.table = REPORTS_TABLE, report.row_found)
    )]
    async fn fetch_latest_report(&self, user_id: &str) -> Result<Option<Value>, AppError> {
        let start = Instant::now();

        let user_filter = format!("eq.{user_id}");
        let response = self
            .client
            .get(self.reports_url())
            .query(&[
                ("select", PAYLOAD_COLUMN),
                ("idusuario", user_filter.as_str()),
                ("order", "created_at.desc"),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<PostgrestError>(&error_body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or(error_body);
            tracing::error!(%status, error = %message, "Supabase lookup failed");
            return Err(AppError::Fetch(format!(
                "store returned {status}: {message}"
            )));
        }

        let rows: Vec<ReportRow> = response
            .json()
            .await
            .map_err(|e| AppError::Fetch(format!("unreadable store response: {e}")))?;

        REPORT_FETCH_DURATION.record(start.elapsed().as_secs_f64(), &[]);

        let raw = rows
            .into_iter()
            .next()
            .and_then(|row| row.json_ia)
            .filter(|value| !value.is_null());

        tracing::Span::current().record("report.row_found", raw.is_some());

        Ok(raw)
    }
}
