use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::payroll::totals::PayComponents;

/// One person's compensation record for exactly one (month, year) period.
/// The (employee_id, month, year) triple is the upsert key; at most one
/// row exists per triple.
///
/// Day-count fields are kept as display text the way the sheet carries
/// them. Monetary components are normalized amounts. The three derived
/// totals and the words rendering are always produced by the pipeline,
/// never copied from input.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payslip {
    #[schema(example = "NCS7582")]
    pub employee_id: String,

    /// Two-digit month, "01".."12".
    #[schema(example = "03")]
    pub month: String,

    /// Four-digit year.
    #[schema(example = "2026")]
    pub year: String,

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

    /// Sheet-provided sub-total printed on the slip. Display only, never
    /// part of the gross earnings sum.
    pub gross_earnings_total: f64,

    // Deductions
    pub profession_tax: f64,
    pub pf_amount: f64,
    pub esic: f64,
    pub arrear_deduction: f64,
    pub karma_life: f64,

    // Derived
    pub gross_earnings: f64,
    pub gross_deductions: f64,
    pub net_pay: f64,
    pub net_pay_words: String,

    #[schema(nullable = true)]
    pub client_id: Option<String>,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: NaiveDateTime,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: NaiveDateTime,
}

impl Payslip {
    /// The monetary components in the shape the totals calculator takes.
    pub fn components(&self) -> PayComponents {
        PayComponents {
            basic: self.basic,
            hra: self.hra,
            special_allowance: self.special_allowance,
            statutory_bonus: self.statutory_bonus,
            arrears_amount: self.arrears_amount,
            ot_amount: self.ot_amount,
            extra_holiday_pay: self.extra_holiday_pay,
            attendance_incentive: self.attendance_incentive,
            performance_incentive: self.performance_incentive,
            special_incentive: self.special_incentive,
            profession_tax: self.profession_tax,
            pf_amount: self.pf_amount,
            esic: self.esic,
            arrear_deduction: self.arrear_deduction,
            karma_life: self.karma_life,
        }
    }
}
