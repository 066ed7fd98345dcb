//! Read-side join of Employee + Payslip + Client into the flat view the
//! renderer consumes.

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::PortalError;
use crate::payroll::{clients, totals, words};
use crate::store::Store;

/// The flat record consumed by the payslip renderer. Either complete or
/// absent; optional gaps are defaulted upstream, never surfaced as holes.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayslipView {
    // Employee details
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

    // Period details
    pub working_days: String,
    pub extra_days: String,
    pub ot_hrs: String,
    pub arrears_days: String,
    pub lop: String,

    // Earnings
    pub basic: f64,
    pub hra: f64,
    pub special_allowance: f64,
    pub statutory_bonus: f64,
    pub arrears_amount: f64,
    pub ot_amount: f64,
    pub extra_holiday_pay: f64,
    pub attendance_incentive: f64,
    pub performance_incentive: f64,
    pub special_incentive: f64,
    pub gross_earnings_total: f64,

    // Deductions
    pub profession_tax: f64,
    pub pf_amount: f64,
    pub esic: f64,
    pub arrear_deduction: f64,
    pub karma_life: f64,

    // Totals
    pub gross_earnings: f64,
    pub gross_deductions: f64,
    pub net_pay: f64,
    pub net_pay_words: String,

    pub month: String,
    pub year: String,

    pub client_name: String,
    pub client_address: String,
}

/// Assemble the view for one (employee, month, year). Totals are derived
/// from the stored components at read time — a partially-written or
/// legacy row self-heals on the way out. The words string is only
/// re-rendered when the stored one is empty.
pub async fn assemble<S: Store>(
    store: &S,
    employee_id: &str,
    month: &str,
    year: &str,
) -> Result<PayslipView, PortalError> {
    let employee = store
        .find_employee(employee_id)
        .await?
        .ok_or(PortalError::EmployeeNotFound)?;

    let payslip = store
        .find_payslip(employee_id, month, year)
        .await?
        .ok_or(PortalError::PayslipNotFound)?;

    let client_ref = payslip
        .client_id
        .as_deref()
        .or(employee.client_id.as_deref());
    let client = clients::resolve_for_payslip(store, client_ref).await?;

    let t = totals::compute_totals(&payslip.components());
    let net_pay_words = if payslip.net_pay_words.trim().is_empty() {
        words::to_words(t.net_pay.round() as i64)
    } else {
        payslip.net_pay_words.clone()
    };

    Ok(PayslipView {
        employee_id: employee.employee_id,
        employee_name: employee.employee_name,
        mobile_number: employee.mobile_number,
        dob: employee.dob,
        doj: employee.doj,
        designation: employee.designation,
        department: employee.department,
        bank_name: employee.bank_name,
        bank_account_no: employee.bank_account_no,
        ifsc_code: employee.ifsc_code,
        pan_no: employee.pan_no,
        pf_number: employee.pf_number,
        uan_no: employee.uan_no,
        esic_no: employee.esic_no,

        working_days: payslip.working_days,
        extra_days: payslip.extra_days,
        ot_hrs: payslip.ot_hrs,
        arrears_days: payslip.arrears_days,
        lop: payslip.lop,

        basic: payslip.basic,
        hra: payslip.hra,
        special_allowance: payslip.special_allowance,
        statutory_bonus: payslip.statutory_bonus,
        arrears_amount: payslip.arrears_amount,
        ot_amount: payslip.ot_amount,
        extra_holiday_pay: payslip.extra_holiday_pay,
        attendance_incentive: payslip.attendance_incentive,
        performance_incentive: payslip.performance_incentive,
        special_incentive: payslip.special_incentive,
        gross_earnings_total: payslip.gross_earnings_total,

        profession_tax: payslip.profession_tax,
        pf_amount: payslip.pf_amount,
        esic: payslip.esic,
        arrear_deduction: payslip.arrear_deduction,
        karma_life: payslip.karma_life,

        gross_earnings: t.gross_earnings,
        gross_deductions: t.gross_deductions,
        net_pay: t.net_pay,
        net_pay_words,

        month: payslip.month,
        year: payslip.year,

        client_name: client.name,
        client_address: client.address,
    })
}
