use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::error::PortalError;
use crate::model::Employee;
use crate::payroll::reconcile;
use crate::store::Store;
use crate::store::mysql::MySqlStore;
use crate::utils::employee_cache;

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmployeeQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    pub total_pages: i64,
    pub current_page: u32,
    pub limit: u32,
}

impl Pagination {
    pub fn new(total: i64, page: u32, limit: u32) -> Self {
        Pagination {
            total,
            total_pages: (total + limit as i64 - 1) / limit as i64,
            current_page: page,
            limit,
        }
    }
}

/// Manual add/edit from the admin screen. Same key semantics as the
/// upload pipeline: a known employeeId is overwritten, not duplicated.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpsertEmployee {
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
    pub ifsc_code: String,
    pub pan_no: String,
    pub pf_number: String,
    pub uan_no: String,
    pub esic_no: String,
    pub client_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/employees",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("limit" = Option<u32>, Query, description = "Items per page"),
        ("search" = Option<String>, Query, description = "Search by id, name, mobile or department")
    ),
    responses(
        (status = 200, description = "Paginated employee list")
    ),
    tag = "Employees"
)]
pub async fn list_employees(
    store: web::Data<MySqlStore>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let search = query.search.as_deref().unwrap_or("");

    let (employees, total) = store
        .list_employees(search, page, limit)
        .await
        .map_err(PortalError::from)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": employees,
        "pagination": Pagination::new(total, page, limit),
    })))
}

#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = UpsertEmployee,
    responses(
        (status = 200, description = "Employee created or updated"),
        (status = 400, description = "Missing employee id")
    ),
    tag = "Employees"
)]
pub async fn upsert_employee(
    store: web::Data<MySqlStore>,
    payload: web::Json<UpsertEmployee>,
) -> actix_web::Result<impl Responder> {
    let input = payload.into_inner();
    if input.employee_id.trim().is_empty() {
        return Err(PortalError::Validation("Missing employee id".into()).into());
    }

    let existed = store
        .find_employee(input.employee_id.trim())
        .await
        .map_err(PortalError::from)?
        .is_some();

    let now = Utc::now().naive_utc();
    let employee = Employee {
        employee_id: input.employee_id.trim().to_string(),
        employee_name: input.employee_name,
        mobile_number: input.mobile_number,
        dob: input.dob,
        doj: input.doj,
        designation: input.designation,
        department: input.department,
        bank_name: input.bank_name,
        bank_account_no: input.bank_account_no,
        ifsc_code: input.ifsc_code,
        pan_no: input.pan_no,
        pf_number: input.pf_number,
        uan_no: input.uan_no,
        esic_no: input.esic_no,
        client_id: input.client_id.filter(|id| !id.is_empty()),
        created_at: now,
        updated_at: now,
    };

    store
        .upsert_employee(&employee)
        .await
        .map_err(PortalError::from)?;
    employee_cache::forget(&employee.employee_id).await;

    let message = if existed {
        "Employee updated successfully"
    } else {
        "Employee created successfully"
    };
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": employee,
        "message": message,
    })))
}

#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id" = String, Path, description = "Employee business id")
    ),
    responses(
        (status = 200, description = "Employee and associated payslips deleted"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employees"
)]
pub async fn delete_employee(
    store: web::Data<MySqlStore>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    reconcile::delete_employee_cascade(store.get_ref(), &employee_id).await?;
    employee_cache::forget(&employee_id).await;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Employee and associated payslips deleted successfully",
    })))
}
