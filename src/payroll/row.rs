//! Column mapping from one spreadsheet row into the canonical payroll
//! record consumed by reconciliation.

use std::collections::HashMap;

use crate::error::PortalError;
use crate::payroll::normalize::normalize_str;
use crate::payroll::totals::PayComponents;

/// Column headers of the upload workbook, in template order. Lookup is by
/// exact header string, case-sensitive.
pub const COLUMN_HEADERS: [&str; 39] = [
    // Employee details
    "Emp ID",
    "Employee Name",
    "Mobile Number",
    "DOB",
    "DOJ",
    "Designation",
    "Department",
    "Bank Name",
    "Bank Account No",
    "IFSC code",
    "PAN NO",
    "PF Number",
    "UAN No",
    "ESI No",
    // Payslip details
    "Number of days working",
    "Extra Days",
    "OT hrs",
    "Arrears Days",
    "LOP",
    // Earnings
    "BASIC",
    "HRA",
    "Special Allowance",
    "Statutory Bonus",
    "Arrears amount",
    "Gross Earnings Total",
    "OT Amount",
    "Extra & Holiday pay",
    "Attendance Incentive",
    "Performance Incentive",
    "Special Incentive",
    // Deductions
    "Profession Tax",
    "PF amount",
    "ESIC",
    "Arrear Deduction",
    "Karma Life",
    // Totals (recomputed by the pipeline, ignored on input)
    "Total Gross A",
    "Gross Deductions B",
    "Take Home",
    "Net Pay In Words",
];

/// Upload context attached to every mapped row.
#[derive(Debug, Clone)]
pub struct RowContext {
    pub month: String,
    pub year: String,
    pub client_id: String,
}

/// One row in canonical shape, ready for reconciliation. A pure data
/// carrier; nothing here touches storage.
#[derive(Debug, Clone, Default)]
pub struct PayrollRecord {
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

    pub amounts: PayComponents,
    pub gross_earnings_total: f64,

    pub month: String,
    pub year: String,
    pub client_id: String,
}

/// Map a header-keyed row into the canonical record. Missing text columns
/// default to empty strings; missing amount columns go through the
/// normalizer's zero policy. The sheet's own total columns are ignored —
/// the pipeline derives totals itself.
pub fn map_row(row: &HashMap<String, String>, ctx: &RowContext) -> PayrollRecord {
    let text = |key: &str| row.get(key).map(|v| v.trim().to_string()).unwrap_or_default();
    let amount = |key: &str| row.get(key).map(|v| normalize_str(v)).unwrap_or(0.0);

    PayrollRecord {
        employee_id: text("Emp ID"),
        employee_name: text("Employee Name"),
        mobile_number: text("Mobile Number"),
        dob: text("DOB"),
        doj: text("DOJ"),
        designation: text("Designation"),
        department: text("Department"),
        bank_name: text("Bank Name"),
        bank_account_no: text("Bank Account No"),
        ifsc_code: text("IFSC code"),
        pan_no: text("PAN NO"),
        pf_number: text("PF Number"),
        uan_no: text("UAN No"),
        esic_no: text("ESI No"),

        working_days: text("Number of days working"),
        extra_days: text("Extra Days"),
        ot_hrs: text("OT hrs"),
        arrears_days: text("Arrears Days"),
        lop: text("LOP"),

        amounts: PayComponents {
            basic: amount("BASIC"),
            hra: amount("HRA"),
            special_allowance: amount("Special Allowance"),
            statutory_bonus: amount("Statutory Bonus"),
            arrears_amount: amount("Arrears amount"),
            ot_amount: amount("OT Amount"),
            extra_holiday_pay: amount("Extra & Holiday pay"),
            attendance_incentive: amount("Attendance Incentive"),
            performance_incentive: amount("Performance Incentive"),
            special_incentive: amount("Special Incentive"),
            profession_tax: amount("Profession Tax"),
            pf_amount: amount("PF amount"),
            esic: amount("ESIC"),
            arrear_deduction: amount("Arrear Deduction"),
            karma_life: amount("Karma Life"),
        },
        gross_earnings_total: amount("Gross Earnings Total"),

        month: ctx.month.clone(),
        year: ctx.year.clone(),
        client_id: ctx.client_id.clone(),
    }
}

/// Normalize a reporting period into the storage key form: two-digit
/// month, four-digit year.
pub fn normalize_period(month: &str, year: &str) -> Result<(String, String), PortalError> {
    let m: u32 = month
        .trim()
        .parse()
        .map_err(|_| PortalError::Validation(format!("Invalid month: {month:?}")))?;
    if !(1..=12).contains(&m) {
        return Err(PortalError::Validation(format!("Invalid month: {month:?}")));
    }
    let y: u32 = year
        .trim()
        .parse()
        .map_err(|_| PortalError::Validation(format!("Invalid year: {year:?}")))?;
    if !(1900..=9999).contains(&y) {
        return Err(PortalError::Validation(format!("Invalid year: {year:?}")));
    }
    Ok((format!("{m:02}"), format!("{y:04}")))
}

/// Split a combined "YYYY-MM" period selector into the normalized pair.
pub fn split_month_year(month_year: &str) -> Result<(String, String), PortalError> {
    let (year, month) = month_year
        .trim()
        .split_once('-')
        .ok_or_else(|| PortalError::Validation("Invalid month format. Expected YYYY-MM".into()))?;
    normalize_period(month, year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RowContext {
        RowContext {
            month: "03".into(),
            year: "2026".into(),
            client_id: "client-1".into(),
        }
    }

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn maps_named_columns_case_sensitively() {
        let record = map_row(
            &row(&[
                ("Emp ID", "E1"),
                ("Employee Name", "Jane"),
                ("IFSC code", "HDFC0005021"),
                ("BASIC", "13456"),
                ("PF amount", "1250"),
                ("basic", "99999"), // wrong case, must not match
            ]),
            &ctx(),
        );
        assert_eq!(record.employee_id, "E1");
        assert_eq!(record.employee_name, "Jane");
        assert_eq!(record.ifsc_code, "HDFC0005021");
        assert_eq!(record.amounts.basic, 13456.0);
        assert_eq!(record.amounts.pf_amount, 1250.0);
    }

    #[test]
    fn missing_columns_default() {
        let record = map_row(&row(&[("Emp ID", "E2")]), &ctx());
        assert_eq!(record.designation, "");
        assert_eq!(record.amounts.hra, 0.0);
        assert_eq!(record.gross_earnings_total, 0.0);
    }

    #[test]
    fn context_rides_along() {
        let record = map_row(&row(&[("Emp ID", "E3")]), &ctx());
        assert_eq!(record.month, "03");
        assert_eq!(record.year, "2026");
        assert_eq!(record.client_id, "client-1");
    }

    #[test]
    fn period_normalization_pads_and_validates() {
        assert_eq!(
            normalize_period("3", "2026").unwrap(),
            ("03".to_string(), "2026".to_string())
        );
        assert_eq!(
            split_month_year("2026-03").unwrap(),
            ("03".to_string(), "2026".to_string())
        );
        assert!(normalize_period("13", "2026").is_err());
        assert!(normalize_period("0", "2026").is_err());
        assert!(normalize_period("3", "26").is_err());
        assert!(split_month_year("202603").is_err());
    }
}
