use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A person record keyed by the stable business identifier, independent of
/// any pay period. Re-uploading a sheet with a known `employee_id`
/// overwrites the mutable profile fields instead of creating a duplicate.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "employeeId": "NCS7582",
        "employeeName": "Ashin Kuruvilla",
        "mobileNumber": "9876543210",
        "designation": "PICKER - PACKER",
        "department": "UE Store-OPS",
        "bankName": "HDFC BANK"
    })
)]
pub struct Employee {
    #[schema(example = "NCS7582")]
    pub employee_id: String,

    #[schema(example = "Ashin Kuruvilla")]
    pub employee_name: String,

    #[schema(example = "9876543210")]
    pub mobile_number: String,

    pub dob: String,
    pub doj: String,
    pub designation: String,
    pub department: String,
    pub bank_name: String,
    pub bank_account_no: String,

    #[schema(example = "HDFC0005021")]
    pub ifsc_code: String,

    pub pan_no: String,
    pub pf_number: String,
    pub uan_no: String,
    pub esic_no: String,

    #[schema(nullable = true)]
    pub client_id: Option<String>,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: NaiveDateTime,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: NaiveDateTime,
}
