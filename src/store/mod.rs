pub mod supabase;

use serde_json::Value;

use crate::error::AppError;

pub use supabase::SupabaseReports;

/// Source of stored report rows. The lookup contract is fixed: most recent
/// row for the user, single payload column, `None` when nothing usable
/// exists.
#[async_trait::async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch_latest_report(&self, user_id: &str) -> Result<Option<Value>, AppError>;
}
