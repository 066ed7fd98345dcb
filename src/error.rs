use actix_web::{HttpResponse, http::StatusCode};
use derive_more::{Display, From};
use serde_json::json;

/// Storage-layer failure. Wrapped as a plain message so handler code does
/// not depend on the backing driver's error types.
#[derive(Debug, Display)]
#[display(fmt = "storage error: {}", _0)]
pub struct StoreError(pub String);

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError(e.to_string())
    }
}

#[derive(Debug, Display, From)]
pub enum PortalError {
    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "Employee not found")]
    EmployeeNotFound,

    #[display(fmt = "Payslip not found for the selected month")]
    PayslipNotFound,

    #[display(fmt = "Invalid mobile number")]
    InvalidMobileNumber,

    #[display(fmt = "Client not found")]
    ClientNotFound,

    #[display(fmt = "{}", _0)]
    Persistence(StoreError),
}

impl actix_web::ResponseError for PortalError {
    fn status_code(&self) -> StatusCode {
        match self {
            PortalError::Validation(_) => StatusCode::BAD_REQUEST,
            PortalError::EmployeeNotFound
            | PortalError::PayslipNotFound
            | PortalError::ClientNotFound => StatusCode::NOT_FOUND,
            PortalError::InvalidMobileNumber => StatusCode::UNAUTHORIZED,
            PortalError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let PortalError::Persistence(e) = self {
            tracing::error!(error = %e, "Storage operation failed");
        }
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": self.to_string(),
        }))
    }
}
