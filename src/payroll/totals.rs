//! Derived monetary totals for one pay period.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// The fifteen monetary components of one pay period. The set is closed:
/// whatever else a sheet carries is display data and is never summed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PayComponents {
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

    pub profession_tax: f64,
    pub pf_amount: f64,
    pub esic: f64,
    pub arrear_deduction: f64,
    pub karma_life: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Earning {
    Basic,
    Hra,
    SpecialAllowance,
    StatutoryBonus,
    ArrearsAmount,
    OtAmount,
    ExtraHolidayPay,
    AttendanceIncentive,
    PerformanceIncentive,
    SpecialIncentive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Deduction {
    ProfessionTax,
    PfAmount,
    Esic,
    ArrearDeduction,
    KarmaLife,
}

impl PayComponents {
    pub fn earning(&self, component: Earning) -> f64 {
        match component {
            Earning::Basic => self.basic,
            Earning::Hra => self.hra,
            Earning::SpecialAllowance => self.special_allowance,
            Earning::StatutoryBonus => self.statutory_bonus,
            Earning::ArrearsAmount => self.arrears_amount,
            Earning::OtAmount => self.ot_amount,
            Earning::ExtraHolidayPay => self.extra_holiday_pay,
            Earning::AttendanceIncentive => self.attendance_incentive,
            Earning::PerformanceIncentive => self.performance_incentive,
            Earning::SpecialIncentive => self.special_incentive,
        }
    }

    pub fn deduction(&self, component: Deduction) -> f64 {
        match component {
            Deduction::ProfessionTax => self.profession_tax,
            Deduction::PfAmount => self.pf_amount,
            Deduction::Esic => self.esic,
            Deduction::ArrearDeduction => self.arrear_deduction,
            Deduction::KarmaLife => self.karma_life,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub gross_earnings: f64,
    pub gross_deductions: f64,
    pub net_pay: f64,
}

/// Derive the three totals from the component amounts. Net pay may go
/// negative when deductions exceed earnings; that is surfaced as-is.
pub fn compute_totals(amounts: &PayComponents) -> Totals {
    let gross_earnings: f64 = Earning::iter().map(|e| amounts.earning(e)).sum();
    let gross_deductions: f64 = Deduction::iter().map(|d| amounts.deduction(d)).sum();
    Totals {
        gross_earnings,
        gross_deductions,
        net_pay: gross_earnings - gross_deductions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PayComponents {
        PayComponents {
            basic: 13456.0,
            hra: 471.0,
            statutory_bonus: 1121.0,
            ot_amount: 9208.0,
            extra_holiday_pay: 515.0,
            profession_tax: 320.0,
            pf_amount: 1250.0,
            esic: 91.0,
            arrear_deduction: 112.0,
            ..PayComponents::default()
        }
    }

    #[test]
    fn sums_the_closed_component_sets() {
        let t = compute_totals(&sample());
        assert_eq!(t.gross_earnings, 24771.0);
        assert_eq!(t.gross_deductions, 1773.0);
        assert_eq!(t.net_pay, 22998.0);
    }

    #[test]
    fn net_pay_identity_holds_exactly() {
        let t = compute_totals(&sample());
        assert_eq!(t.net_pay, t.gross_earnings - t.gross_deductions);
    }

    #[test]
    fn determinism_across_runs() {
        let a = compute_totals(&sample());
        let b = compute_totals(&sample());
        assert_eq!(a, b);
    }

    #[test]
    fn negative_net_pay_is_not_an_error() {
        let amounts = PayComponents {
            basic: 100.0,
            pf_amount: 250.0,
            ..PayComponents::default()
        };
        assert_eq!(compute_totals(&amounts).net_pay, -150.0);
    }

    #[test]
    fn empty_components_total_zero() {
        let t = compute_totals(&PayComponents::default());
        assert_eq!(t.gross_earnings, 0.0);
        assert_eq!(t.gross_deductions, 0.0);
        assert_eq!(t.net_pay, 0.0);
    }
}
