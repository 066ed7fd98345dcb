use crate::api::auth::AuthRequest;
use crate::api::clients::ClientQuery;
use crate::api::employees::{EmployeeQuery, Pagination, UpsertEmployee};
use crate::api::payslips::{
    BulkRow, BulkUploadRequest, DeletePayslipsRequest, PayslipQuery, UploadQuery,
};
use crate::model::{Client, Employee, Payslip};
use crate::payroll::assemble::PayslipView;
use crate::payroll::clients::{ClientPatch, NewClient};
use crate::payroll::reconcile::{BatchResult, RecordOutcome};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payslip Portal API",
        version = "1.0.0",
        description = r#"
## Payslip Portal

Backend for an employee payslip portal.

### Key Features
- **Employee Login**
  - Authenticate with employee ID and registered mobile number
- **Payslip Retrieval**
  - Assembled payslip view for any uploaded month
- **Bulk Upload**
  - Spreadsheet-driven payroll ingestion with per-row outcomes
- **Record Management**
  - Employee, payslip and client administration

### Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::auth::authenticate,

        crate::api::payslips::fetch_payslip,
        crate::api::payslips::list_payslips,
        crate::api::payslips::upsert_payslip,
        crate::api::payslips::bulk_upsert,
        crate::api::payslips::upload_workbook,
        crate::api::payslips::delete_payslips,
        crate::api::payslips::download_template,

        crate::api::employees::list_employees,
        crate::api::employees::upsert_employee,
        crate::api::employees::delete_employee,

        crate::api::clients::list_clients,
        crate::api::clients::create_client,
        crate::api::clients::update_client,
        crate::api::clients::delete_client
    ),
    components(
        schemas(
            AuthRequest,
            Employee,
            Payslip,
            Client,
            PayslipView,
            BulkRow,
            BulkUploadRequest,
            UploadQuery,
            PayslipQuery,
            DeletePayslipsRequest,
            UpsertEmployee,
            EmployeeQuery,
            ClientQuery,
            NewClient,
            ClientPatch,
            Pagination,
            BatchResult,
            RecordOutcome
        )
    ),
    tags(
        (name = "Auth", description = "Portal login"),
        (name = "Payslips", description = "Payslip upload, retrieval and management"),
        (name = "Employees", description = "Employee record management"),
        (name = "Clients", description = "Client record management"),
    )
)]
pub struct ApiDoc;
