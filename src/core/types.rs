use std::fmt;

use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TimeUnit {
    Years,
    Months,
}

impl TimeUnit {
    pub fn to_years(self, period: f64) -> f64 {
        match self {
            TimeUnit::Years => period,
            TimeUnit::Months => period / 12.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Years => "years",
            TimeUnit::Months => "months",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanScenarioInput {
    pub purchase_amount: f64,
    pub available_cash: f64,
    pub loan_rate: f64,
    pub investment_return: f64,
    pub tax_rate: f64,
    pub compounding_frequency: u32,
    pub horizon_years: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoanRecommendation {
    TakeLoanAndInvest,
    PayCash,
    PayCashWithPartialLoan,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashPathResult {
    pub loan_needed_for_shortfall: f64,
    pub leftover_cash: f64,
    pub loan_interest: f64,
    pub investment_value: f64,
    pub investment_returns: f64,
    pub net_position: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullLoanPathResult {
    pub loan_principal: f64,
    pub total_interest: f64,
    pub investment_value: f64,
    pub investment_returns: f64,
    pub net_position: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanScenarioResult {
    pub cash_path: CashPathResult,
    pub full_loan: FullLoanPathResult,
    pub net_benefit: f64,
    pub recommendation: LoanRecommendation,
    /// Available cash does not cover the purchase; the cash path borrows the gap.
    pub cash_shortfall: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalInput {
    pub goal_name: String,
    pub cost_today: f64,
    pub existing_investment: f64,
    pub years_to_achieve: u32,
    pub expected_return: f64,
    pub inflation_rate: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalYearProgress {
    pub year: u32,
    pub total_invested: f64,
    pub investment_value: f64,
    pub investment_return_earned: f64,
    pub percent_achieved: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalResult {
    pub goal_name: String,
    pub future_cost: f64,
    pub future_value_of_existing: f64,
    pub remaining_amount_needed: f64,
    pub required_monthly_investment: f64,
    pub goal_already_met: bool,
    pub yearly_breakdown: Vec<GoalYearProgress>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Ev,
    Ice,
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleKind::Ev => f.write_str("EV"),
            VehicleKind::Ice => f.write_str("ICE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSpec {
    pub purchase_price: f64,
    /// Share of the purchase price recovered at disposal, as a fraction.
    pub resale_value_fraction: f64,
    /// Distance per unit of energy or fuel (km/kWh, km/l, ...).
    pub efficiency: f64,
    /// Price per unit of energy or fuel.
    pub energy_cost: f64,
    pub annual_maintenance: f64,
    pub annual_insurance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleCostInput {
    pub ev: VehicleSpec,
    pub ice: VehicleSpec,
    pub ev_incentives: f64,
    pub average_annual_distance: f64,
    pub ownership_years: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleCostBreakdown {
    pub purchase_price: f64,
    pub incentives: f64,
    pub total_fuel_cost: f64,
    pub total_maintenance: f64,
    pub total_insurance: f64,
    pub resale_value: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyCostComparison {
    pub year: u32,
    pub ev_cumulative_cost: f64,
    pub ice_cumulative_cost: f64,
    pub ev_currently_cheaper: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "years", rename_all = "kebab-case")]
pub enum Breakeven {
    /// Cheaper to buy and cheaper to run: the cost lines never cross.
    EvAlwaysCheaper,
    NoBreakeven,
    AfterYears(f64),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreakevenTiming {
    EvAlwaysCheaper,
    WithinOwnership,
    BeyondOwnership,
    NoBreakeven,
}

impl Breakeven {
    /// Places the raw breakeven point relative to an ownership period.
    pub fn timing(self, ownership_years: u32) -> BreakevenTiming {
        match self {
            Breakeven::EvAlwaysCheaper => BreakevenTiming::EvAlwaysCheaper,
            Breakeven::NoBreakeven => BreakevenTiming::NoBreakeven,
            Breakeven::AfterYears(years) if years <= ownership_years as f64 => {
                BreakevenTiming::WithinOwnership
            }
            Breakeven::AfterYears(_) => BreakevenTiming::BeyondOwnership,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTcoResult {
    pub ev: VehicleCostBreakdown,
    pub ice: VehicleCostBreakdown,
    pub ev_yearly_operating_cost: f64,
    pub ice_yearly_operating_cost: f64,
    pub total_savings: f64,
    pub yearly_comparison: Vec<YearlyCostComparison>,
    pub breakeven: Breakeven,
}
