use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The billing/organizational entity a payslip batch is issued on behalf
/// of. At most one client carries `is_default` at any time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[schema(example = "7f0c1a2e-9a4b-4f31-8a55-2f4d1e9c0b77")]
    pub id: String,

    #[schema(example = "Newchecks Solutions Pvt. Ltd")]
    pub name: String,

    pub address: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,

    pub is_default: bool,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: NaiveDateTime,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: NaiveDateTime,
}
