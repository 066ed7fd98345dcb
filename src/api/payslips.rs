use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::api::employees::Pagination;
use crate::error::PortalError;
use crate::ingest;
use crate::payroll::normalize::normalize_json;
use crate::payroll::reconcile::{self, BatchResult};
use crate::payroll::row::{PayrollRecord, RowContext, map_row, normalize_period, split_month_year};
use crate::payroll::totals::PayComponents;
use crate::payroll::assemble;
use crate::store::{PayslipFilter, Store};
use crate::store::mysql::MySqlStore;
use crate::utils::{employee_cache, xlsx_template};

/// One uploaded row as the admin screen posts it: text fields plus
/// amounts that may arrive as numbers or numeric strings. Unknown keys
/// (including sheet-side totals) are ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BulkRow {
    #[schema(example = "NCS7582")]
    pub employee_id: String,
    pub employee_name: String,
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
    pub working_days: String,
    pub extra_days: String,
    pub ot_hrs: String,
    pub arrears_days: String,
    pub lop: String,
    pub client_id: String,

    #[schema(value_type = Object)]
    pub basic: Value,
    #[schema(value_type = Object)]
    pub hra: Value,
    #[schema(value_type = Object)]
    pub special_allowance: Value,
    #[schema(value_type = Object)]
    pub statutory_bonus: Value,
    #[schema(value_type = Object)]
    pub arrears_amount: Value,
    #[schema(value_type = Object)]
    pub gross_earnings_total: Value,
    #[schema(value_type = Object)]
    pub ot_amount: Value,
    #[schema(value_type = Object)]
    pub extra_holiday_pay: Value,
    #[schema(value_type = Object)]
    pub attendance_incentive: Value,
    #[schema(value_type = Object)]
    pub performance_incentive: Value,
    #[schema(value_type = Object)]
    pub special_incentive: Value,
    #[schema(value_type = Object)]
    pub profession_tax: Value,
    #[schema(value_type = Object)]
    pub pf_amount: Value,
    #[schema(value_type = Object)]
    pub esic: Value,
    #[schema(value_type = Object)]
    pub arrear_deduction: Value,
    #[schema(value_type = Object)]
    pub karma_life: Value,
}

impl BulkRow {
    fn into_record(self, ctx: &RowContext) -> PayrollRecord {
        let client_id = if self.client_id.is_empty() {
            ctx.client_id.clone()
        } else {
            self.client_id
        };
        PayrollRecord {
            employee_id: self.employee_id.trim().to_string(),
            employee_name: self.employee_name,
            mobile_number: self.mobile_number,
            dob: self.dob,
            doj: self.doj,
            designation: self.designation,
            department: self.department,
            bank_name: self.bank_name,
            bank_account_no: self.bank_account_no,
            ifsc_code: self.ifsc_code,
            pan_no: self.pan_no,
            pf_number: self.pf_number,
            uan_no: self.uan_no,
            esic_no: self.esic_no,
            working_days: self.working_days,
            extra_days: self.extra_days,
            ot_hrs: self.ot_hrs,
            arrears_days: self.arrears_days,
            lop: self.lop,
            amounts: PayComponents {
                basic: normalize_json(&self.basic),
                hra: normalize_json(&self.hra),
                special_allowance: normalize_json(&self.special_allowance),
                statutory_bonus: normalize_json(&self.statutory_bonus),
                arrears_amount: normalize_json(&self.arrears_amount),
                ot_amount: normalize_json(&self.ot_amount),
                extra_holiday_pay: normalize_json(&self.extra_holiday_pay),
                attendance_incentive: normalize_json(&self.attendance_incentive),
                performance_incentive: normalize_json(&self.performance_incentive),
                special_incentive: normalize_json(&self.special_incentive),
                profession_tax: normalize_json(&self.profession_tax),
                pf_amount: normalize_json(&self.pf_amount),
                esic: normalize_json(&self.esic),
                arrear_deduction: normalize_json(&self.arrear_deduction),
                karma_life: normalize_json(&self.karma_life),
            },
            gross_earnings_total: normalize_json(&self.gross_earnings_total),
            month: ctx.month.clone(),
            year: ctx.year.clone(),
            client_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkUploadRequest {
    pub payslips: Vec<BulkRow>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub client_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    #[schema(example = "3")]
    pub month: String,
    #[schema(example = "2026")]
    pub year: String,
    pub client_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayslipQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub employee_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletePayslipsRequest {
    pub employee_ids: Option<Vec<String>>,
    pub months: Option<Vec<String>>,
    pub years: Option<Vec<String>>,
}

/// Drop cache entries for every employee an upload touched; the next
/// login re-reads the fresh profile.
async fn invalidate_touched(result: &BatchResult) {
    for outcome in result.results.iter().filter(|o| o.success) {
        employee_cache::forget(&outcome.employee_id).await;
    }
}

#[utoipa::path(
    get,
    path = "/api/payslip/{id}/{month}",
    params(
        ("id" = String, Path, description = "Employee business id"),
        ("month" = String, Path, description = "Period as YYYY-MM")
    ),
    responses(
        (status = 200, description = "Assembled payslip view", body = crate::payroll::assemble::PayslipView),
        (status = 404, description = "Employee or payslip not found")
    ),
    tag = "Payslips"
)]
pub async fn fetch_payslip(
    store: web::Data<MySqlStore>,
    path: web::Path<(String, String)>,
) -> actix_web::Result<impl Responder> {
    let (employee_id, month_year) = path.into_inner();
    let (month, year) = split_month_year(&month_year)?;

    let view = assemble::assemble(store.get_ref(), &employee_id, &month, &year).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": view,
    })))
}

#[utoipa::path(
    get,
    path = "/api/payslips",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("limit" = Option<u32>, Query, description = "Items per page"),
        ("month" = Option<String>, Query, description = "Filter month (with year)"),
        ("year" = Option<String>, Query, description = "Filter year (with month)"),
        ("employeeId" = Option<String>, Query, description = "Filter by employee")
    ),
    responses(
        (status = 200, description = "Paginated payslip list")
    ),
    tag = "Payslips"
)]
pub async fn list_payslips(
    store: web::Data<MySqlStore>,
    query: web::Query<PayslipQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    let filter = match (&query.month, &query.year, &query.employee_id) {
        (Some(month), Some(year), _) => {
            let (month, year) = normalize_period(month, year)?;
            PayslipFilter::for_period(&month, &year)
        }
        (_, _, Some(employee_id)) if !employee_id.is_empty() => {
            PayslipFilter::for_employee(employee_id)
        }
        _ => PayslipFilter::default(),
    };

    let (payslips, total) = store
        .list_payslips(&filter, page, limit)
        .await
        .map_err(PortalError::from)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": payslips,
        "pagination": Pagination::new(total, page, limit),
    })))
}

/// Single payslip save from the edit form. Same per-record path as the
/// bulk pipeline, so the stored totals and words stay a pure function of
/// the components here too.
#[utoipa::path(
    post,
    path = "/api/payslips",
    responses(
        (status = 200, description = "Payslip created or updated"),
        (status = 400, description = "Missing monthYear or employee id")
    ),
    tag = "Payslips"
)]
pub async fn upsert_payslip(
    store: web::Data<MySqlStore>,
    body: web::Json<Value>,
) -> actix_web::Result<impl Responder> {
    let month_year = body
        .get("monthYear")
        .and_then(Value::as_str)
        .ok_or_else(|| PortalError::Validation("monthYear is required".into()))?;
    let (month, year) = split_month_year(month_year)?;

    let row: BulkRow = serde_json::from_value(body.into_inner())
        .map_err(|e| PortalError::Validation(format!("Invalid payslip payload: {e}")))?;

    let ctx = RowContext {
        month,
        year,
        client_id: String::new(),
    };
    let records = vec![row.into_record(&ctx)];
    let result = reconcile::reconcile(store.get_ref(), &records).await?;

    let outcome = &result.results[0];
    if !outcome.success {
        return Err(PortalError::Validation(outcome.message.clone()).into());
    }
    invalidate_touched(&result).await;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Payslip saved successfully",
    })))
}

#[utoipa::path(
    post,
    path = "/api/payslips/bulk",
    request_body = BulkUploadRequest,
    responses(
        (status = 200, description = "Batch processed; response reports per-record outcomes"),
        (status = 400, description = "Missing payslips or month/year context")
    ),
    tag = "Payslips"
)]
pub async fn bulk_upsert(
    store: web::Data<MySqlStore>,
    payload: web::Json<BulkUploadRequest>,
) -> actix_web::Result<impl Responder> {
    let request = payload.into_inner();

    if request.payslips.is_empty() {
        return Err(
            PortalError::Validation("No payslips provided or invalid format".into()).into(),
        );
    }
    let (month, year) = match (&request.month, &request.year) {
        (Some(month), Some(year)) => normalize_period(month, year)?,
        _ => return Err(PortalError::Validation("Month and year are required".into()).into()),
    };

    let ctx = RowContext {
        month,
        year,
        client_id: request.client_id.unwrap_or_default(),
    };
    let records: Vec<PayrollRecord> = request
        .payslips
        .into_iter()
        .map(|row| row.into_record(&ctx))
        .collect();

    let result = reconcile::reconcile(store.get_ref(), &records).await?;
    invalidate_touched(&result).await;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": result.summary(),
        "processed": result.processed,
        "results": result.results,
    })))
}

/// Server-side workbook upload: raw xlsx bytes in the body, the period
/// and client in the query string.
#[utoipa::path(
    post,
    path = "/api/payslips/upload",
    params(
        ("month" = String, Query, description = "Target month"),
        ("year" = String, Query, description = "Target year"),
        ("clientId" = Option<String>, Query, description = "Owning client id")
    ),
    responses(
        (status = 200, description = "Workbook processed; response reports per-record outcomes"),
        (status = 400, description = "Unreadable workbook or invalid period")
    ),
    tag = "Payslips"
)]
pub async fn upload_workbook(
    store: web::Data<MySqlStore>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> actix_web::Result<impl Responder> {
    let (month, year) = normalize_period(&query.month, &query.year)?;
    let ctx = RowContext {
        month,
        year,
        client_id: query.client_id.clone().unwrap_or_default(),
    };

    let rows = ingest::read_rows(&body)?;
    if rows.is_empty() {
        return Err(PortalError::Validation("Workbook contains no data rows".into()).into());
    }
    let records: Vec<PayrollRecord> = rows.iter().map(|row| map_row(row, &ctx)).collect();

    let result = reconcile::reconcile(store.get_ref(), &records).await?;
    invalidate_touched(&result).await;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": result.summary(),
        "processed": result.processed,
        "results": result.results,
    })))
}

#[utoipa::path(
    post,
    path = "/api/payslips/delete",
    request_body = DeletePayslipsRequest,
    responses(
        (status = 200, description = "Matching payslips deleted"),
        (status = 400, description = "No filter criteria provided")
    ),
    tag = "Payslips"
)]
pub async fn delete_payslips(
    store: web::Data<MySqlStore>,
    payload: web::Json<DeletePayslipsRequest>,
) -> actix_web::Result<impl Responder> {
    let request = payload.into_inner();
    let filter = PayslipFilter {
        employee_ids: request.employee_ids.unwrap_or_default(),
        months: request.months.unwrap_or_default(),
        years: request.years.unwrap_or_default(),
    };
    if filter.is_empty() {
        return Err(
            PortalError::Validation("At least one filter criteria is required".into()).into(),
        );
    }

    let deleted = store
        .delete_payslips(&filter)
        .await
        .map_err(PortalError::from)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": format!("{} payslips deleted successfully", deleted),
        "deletedCount": deleted,
    })))
}

#[utoipa::path(
    get,
    path = "/api/payslips/template",
    responses(
        (status = 200, description = "Upload template workbook")
    ),
    tag = "Payslips"
)]
pub async fn download_template() -> actix_web::Result<impl Responder> {
    let bytes = xlsx_template::build_template().map_err(|e| {
        tracing::error!(error = %e, "Failed to build upload template");
        actix_web::error::ErrorInternalServerError("Failed to build template")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"payslip-template.xlsx\"",
        ))
        .body(bytes))
}
