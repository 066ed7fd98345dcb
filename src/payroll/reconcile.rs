//! Idempotent reconciliation of uploaded payroll rows against the
//! employee and payslip collections.

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::PortalError;
use crate::model::{Employee, Payslip};
use crate::payroll::row::PayrollRecord;
use crate::payroll::{totals, words};
use crate::store::{PayslipFilter, Store};

/// Records per storage round. Batches run sequentially so one upload
/// cannot monopolize the pool; records inside a batch are issued
/// concurrently.
pub const BATCH_SIZE: usize = 50;

/// Hard cap on rows accepted by one call. The host enforces an
/// execution-time ceiling; larger sheets must be split by the caller.
pub const MAX_ROWS_PER_CALL: usize = 1000;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordOutcome {
    #[schema(example = "NCS7582")]
    pub employee_id: String,
    pub success: bool,
    #[schema(example = "Processed successfully")]
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<RecordOutcome>,
}

impl BatchResult {
    pub fn summary(&self) -> String {
        format!(
            "Processed {} payslips successfully. {} failed.",
            self.succeeded, self.failed
        )
    }
}

/// Apply a whole upload. Each record upserts its employee and its
/// payslip; a bad record is reported in the outcome list and never aborts
/// the rest of the batch.
///
/// Re-submitting the identical upload is a no-op state-wise: both upserts
/// key on stable identities and the derived values are a pure function of
/// the input.
pub async fn reconcile<S: Store>(
    store: &S,
    records: &[PayrollRecord],
) -> Result<BatchResult, PortalError> {
    if records.is_empty() {
        return Err(PortalError::Validation(
            "No payslips provided or invalid format".into(),
        ));
    }
    if records.len() > MAX_ROWS_PER_CALL {
        return Err(PortalError::Validation(format!(
            "Too many rows in one upload: {} (limit {})",
            records.len(),
            MAX_ROWS_PER_CALL
        )));
    }

    let mut results = Vec::with_capacity(records.len());
    for batch in records.chunks(BATCH_SIZE) {
        let outcomes = join_all(batch.iter().map(|record| process_record(store, record))).await;
        results.extend(outcomes);
    }

    let succeeded = results.iter().filter(|o| o.success).count();
    Ok(BatchResult {
        processed: results.len(),
        succeeded,
        failed: results.len() - succeeded,
        results,
    })
}

async fn process_record<S: Store>(store: &S, record: &PayrollRecord) -> RecordOutcome {
    match apply_record(store, record).await {
        Ok(()) => RecordOutcome {
            employee_id: record.employee_id.clone(),
            success: true,
            message: "Processed successfully".into(),
        },
        Err(e) => {
            tracing::error!(
                employee_id = %record.employee_id,
                error = %e,
                "Failed to process payslip record"
            );
            RecordOutcome {
                employee_id: record.employee_id.clone(),
                success: false,
                message: e.to_string(),
            }
        }
    }
}

/// Employee first, then payslip. The two upserts are independently
/// idempotent; there is no transaction across them, so a crash in
/// between leaves the employee updated and the payslip stale for one
/// re-upload.
async fn apply_record<S: Store>(store: &S, record: &PayrollRecord) -> Result<(), PortalError> {
    if record.employee_id.trim().is_empty() {
        return Err(PortalError::Validation("Missing employee id".into()));
    }

    let now = Utc::now().naive_utc();
    let client_id = if record.client_id.is_empty() {
        None
    } else {
        Some(record.client_id.clone())
    };

    let employee = Employee {
        employee_id: record.employee_id.clone(),
        employee_name: record.employee_name.clone(),
        mobile_number: record.mobile_number.clone(),
        dob: record.dob.clone(),
        doj: record.doj.clone(),
        designation: record.designation.clone(),
        department: record.department.clone(),
        bank_name: record.bank_name.clone(),
        bank_account_no: record.bank_account_no.clone(),
        ifsc_code: record.ifsc_code.clone(),
        pan_no: record.pan_no.clone(),
        pf_number: record.pf_number.clone(),
        uan_no: record.uan_no.clone(),
        esic_no: record.esic_no.clone(),
        client_id: client_id.clone(),
        created_at: now,
        updated_at: now,
    };
    store.upsert_employee(&employee).await?;

    let t = totals::compute_totals(&record.amounts);
    let payslip = Payslip {
        employee_id: record.employee_id.clone(),
        month: record.month.clone(),
        year: record.year.clone(),
        working_days: record.working_days.clone(),
        extra_days: record.extra_days.clone(),
        ot_hrs: record.ot_hrs.clone(),
        arrears_days: record.arrears_days.clone(),
        lop: record.lop.clone(),
        basic: record.amounts.basic,
        hra: record.amounts.hra,
        special_allowance: record.amounts.special_allowance,
        statutory_bonus: record.amounts.statutory_bonus,
        arrears_amount: record.amounts.arrears_amount,
        ot_amount: record.amounts.ot_amount,
        extra_holiday_pay: record.amounts.extra_holiday_pay,
        attendance_incentive: record.amounts.attendance_incentive,
        performance_incentive: record.amounts.performance_incentive,
        special_incentive: record.amounts.special_incentive,
        gross_earnings_total: record.gross_earnings_total,
        profession_tax: record.amounts.profession_tax,
        pf_amount: record.amounts.pf_amount,
        esic: record.amounts.esic,
        arrear_deduction: record.amounts.arrear_deduction,
        karma_life: record.amounts.karma_life,
        gross_earnings: t.gross_earnings,
        gross_deductions: t.gross_deductions,
        net_pay: t.net_pay,
        net_pay_words: words::to_words(t.net_pay.round() as i64),
        client_id,
        created_at: now,
        updated_at: now,
    };
    store.upsert_payslip(&payslip).await?;

    Ok(())
}

/// Deleting an employee also removes every payslip carrying its id; no
/// orphaned periods survive.
pub async fn delete_employee_cascade<S: Store>(
    store: &S,
    employee_id: &str,
) -> Result<(), PortalError> {
    let removed = store.delete_employee(employee_id).await?;
    if removed == 0 {
        return Err(PortalError::EmployeeNotFound);
    }
    store
        .delete_payslips(&PayslipFilter::for_employee(employee_id))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payroll::totals::PayComponents;
    use crate::store::mem::MemStore;

    fn record(employee_id: &str, basic: f64, hra: f64) -> PayrollRecord {
        PayrollRecord {
            employee_id: employee_id.to_string(),
            employee_name: format!("{} name", employee_id),
            mobile_number: "9876543210".into(),
            amounts: PayComponents {
                basic,
                hra,
                ..PayComponents::default()
            },
            month: "03".into(),
            year: "2026".into(),
            ..PayrollRecord::default()
        }
    }

    #[actix_web::test]
    async fn partial_failure_is_reported_not_thrown() {
        let store = MemStore::default();
        let rows = vec![record("E1", 10000.0, 2000.0), record("", 5000.0, 0.0)];

        let result = reconcile(&store, &rows).await.unwrap();

        assert_eq!(result.processed, 2);
        assert_eq!(result.succeeded, 1);
        assert_eq!(result.failed, 1);
        assert!(result.results[0].success);
        assert!(!result.results[1].success);
        assert!(!result.results[1].message.is_empty());

        let payslip = store.find_payslip("E1", "03", "2026").await.unwrap().unwrap();
        assert_eq!(payslip.net_pay, 12000.0);
        assert_eq!(payslip.net_pay_words, "twelve thousand only");
    }

    #[actix_web::test]
    async fn reupload_is_idempotent() {
        let store = MemStore::default();
        let rows = vec![record("E1", 10000.0, 2000.0)];

        reconcile(&store, &rows).await.unwrap();
        reconcile(&store, &rows).await.unwrap();

        let (employees, total) = store.list_employees("", 1, 100).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(employees[0].employee_name, "E1 name");

        let (payslips, total) = store
            .list_payslips(&PayslipFilter::for_employee("E1"), 1, 100)
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(payslips[0].net_pay, 12000.0);
    }

    #[actix_web::test]
    async fn reupload_with_changed_amounts_updates_in_place() {
        let store = MemStore::default();
        reconcile(&store, &[record("E1", 10000.0, 2000.0)])
            .await
            .unwrap();
        reconcile(&store, &[record("E1", 11000.0, 2000.0)])
            .await
            .unwrap();

        let (_, employee_total) = store.list_employees("", 1, 100).await.unwrap();
        assert_eq!(employee_total, 1);

        let payslip = store.find_payslip("E1", "03", "2026").await.unwrap().unwrap();
        assert_eq!(payslip.net_pay, 13000.0);
        assert_eq!(payslip.net_pay_words, "thirteen thousand only");
    }

    #[actix_web::test]
    async fn one_payslip_per_composite_key() {
        let store = MemStore::default();
        let mut march = record("E1", 10000.0, 0.0);
        let mut april = record("E1", 10000.0, 0.0);
        march.month = "03".into();
        april.month = "04".into();

        reconcile(&store, &[march.clone(), april]).await.unwrap();
        reconcile(&store, &[march]).await.unwrap();

        let (_, total) = store
            .list_payslips(&PayslipFilter::for_employee("E1"), 1, 100)
            .await
            .unwrap();
        assert_eq!(total, 2);
        let (_, march_total) = store
            .list_payslips(&PayslipFilter::for_period("03", "2026"), 1, 100)
            .await
            .unwrap();
        assert_eq!(march_total, 1);
    }

    #[actix_web::test]
    async fn totals_match_components_on_every_run() {
        let store = MemStore::default();
        let mut row = record("E1", 13456.0, 471.0);
        row.amounts.ot_amount = 9208.0;
        row.amounts.profession_tax = 320.0;
        reconcile(&store, &[row]).await.unwrap();

        let payslip = store.find_payslip("E1", "03", "2026").await.unwrap().unwrap();
        let t = totals::compute_totals(&payslip.components());
        assert_eq!(payslip.gross_earnings, t.gross_earnings);
        assert_eq!(payslip.gross_deductions, t.gross_deductions);
        assert_eq!(payslip.net_pay, t.net_pay);
    }

    #[actix_web::test]
    async fn empty_upload_is_rejected_before_any_write() {
        let store = MemStore::default();
        assert!(reconcile(&store, &[]).await.is_err());
        let (_, total) = store.list_employees("", 1, 100).await.unwrap();
        assert_eq!(total, 0);
    }

    #[actix_web::test]
    async fn oversized_upload_is_rejected() {
        let store = MemStore::default();
        let rows: Vec<PayrollRecord> = (0..MAX_ROWS_PER_CALL + 1)
            .map(|i| record(&format!("E{i}"), 100.0, 0.0))
            .collect();
        assert!(reconcile(&store, &rows).await.is_err());
    }

    #[actix_web::test]
    async fn cascade_delete_leaves_no_orphans() {
        let store = MemStore::default();
        let mut march = record("E1", 10000.0, 0.0);
        let mut april = record("E1", 10000.0, 0.0);
        march.month = "03".into();
        april.month = "04".into();
        reconcile(&store, &[march, april, record("E2", 5000.0, 0.0)])
            .await
            .unwrap();

        delete_employee_cascade(&store, "E1").await.unwrap();

        assert!(store.find_employee("E1").await.unwrap().is_none());
        let (_, e1_slips) = store
            .list_payslips(&PayslipFilter::for_employee("E1"), 1, 100)
            .await
            .unwrap();
        assert_eq!(e1_slips, 0);
        // The other employee is untouched.
        assert!(store.find_employee("E2").await.unwrap().is_some());
        assert!(store.find_payslip("E2", "03", "2026").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn deleting_a_missing_employee_is_not_found() {
        let store = MemStore::default();
        assert!(matches!(
            delete_employee_cascade(&store, "ghost").await,
            Err(PortalError::EmployeeNotFound)
        ));
    }
}
