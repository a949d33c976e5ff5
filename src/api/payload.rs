use serde::{Deserialize, Serialize};

use super::args::{CliTimeUnit, GoalArgs, LoanArgs, VehicleArgs};
use crate::core::LoanPreset;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ApiTimeUnit {
    #[serde(alias = "year")]
    Years,
    #[serde(alias = "month")]
    Months,
}

impl From<ApiTimeUnit> for CliTimeUnit {
    fn from(value: ApiTimeUnit) -> Self {
        match value {
            ApiTimeUnit::Years => CliTimeUnit::Years,
            ApiTimeUnit::Months => CliTimeUnit::Months,
        }
    }
}

impl From<CliTimeUnit> for ApiTimeUnit {
    fn from(value: CliTimeUnit) -> Self {
        match value {
            CliTimeUnit::Years => ApiTimeUnit::Years,
            CliTimeUnit::Months => ApiTimeUnit::Months,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ApiLoanPreset {
    Conservative,
    Aggressive,
}

impl From<ApiLoanPreset> for LoanPreset {
    fn from(value: ApiLoanPreset) -> Self {
        match value {
            ApiLoanPreset::Conservative => LoanPreset::Conservative,
            ApiLoanPreset::Aggressive => LoanPreset::Aggressive,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct LoanPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<ApiLoanPreset>,
    pub purchase_amount: Option<f64>,
    pub available_cash: Option<f64>,
    pub loan_rate: Option<f64>,
    pub investment_return: Option<f64>,
    pub tax_rate: Option<f64>,
    pub compounding_frequency: Option<u32>,
    pub time_period: Option<f64>,
    pub time_unit: Option<ApiTimeUnit>,
}

impl From<&LoanArgs> for LoanPayload {
    fn from(args: &LoanArgs) -> Self {
        Self {
            preset: None,
            purchase_amount: Some(args.purchase_amount),
            available_cash: Some(args.available_cash),
            loan_rate: Some(args.loan_rate),
            investment_return: Some(args.investment_return),
            tax_rate: Some(args.tax_rate),
            compounding_frequency: Some(args.compounding_frequency),
            time_period: Some(args.time_period),
            time_unit: Some(args.time_unit.into()),
        }
    }
}

/// Applies the supplied keys on top of the preset (or the default scenario).
pub(crate) fn loan_args_from_payload(payload: LoanPayload) -> LoanArgs {
    let mut args = payload
        .preset
        .map(|preset| LoanArgs::from_preset(preset.into()))
        .unwrap_or_default();

    if let Some(v) = payload.purchase_amount {
        args.purchase_amount = v;
    }
    if let Some(v) = payload.available_cash {
        args.available_cash = v;
    }
    if let Some(v) = payload.loan_rate {
        args.loan_rate = v;
    }
    if let Some(v) = payload.investment_return {
        args.investment_return = v;
    }
    if let Some(v) = payload.tax_rate {
        args.tax_rate = v;
    }
    if let Some(v) = payload.compounding_frequency {
        args.compounding_frequency = v;
    }
    if let Some(v) = payload.time_period {
        args.time_period = v;
    }
    if let Some(v) = payload.time_unit {
        args.time_unit = v.into();
    }
    args
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct GoalPayload {
    pub goal_name: Option<String>,
    pub cost_today: Option<f64>,
    pub existing_investment: Option<f64>,
    #[serde(alias = "years")]
    pub years_to_achieve: Option<u32>,
    pub expected_return: Option<f64>,
    pub inflation_rate: Option<f64>,
}

impl From<&GoalArgs> for GoalPayload {
    fn from(args: &GoalArgs) -> Self {
        Self {
            goal_name: Some(args.goal_name.clone()),
            cost_today: Some(args.cost_today),
            existing_investment: Some(args.existing_investment),
            years_to_achieve: Some(args.years_to_achieve),
            expected_return: Some(args.expected_return),
            inflation_rate: Some(args.inflation_rate),
        }
    }
}

pub(crate) fn goal_args_from_payload(payload: GoalPayload) -> GoalArgs {
    let mut args = GoalArgs::default();

    if let Some(v) = payload.goal_name {
        args.goal_name = v;
    }
    if let Some(v) = payload.cost_today {
        args.cost_today = v;
    }
    if let Some(v) = payload.existing_investment {
        args.existing_investment = v;
    }
    if let Some(v) = payload.years_to_achieve {
        args.years_to_achieve = v;
    }
    if let Some(v) = payload.expected_return {
        args.expected_return = v;
    }
    if let Some(v) = payload.inflation_rate {
        args.inflation_rate = v;
    }
    args
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct VehiclePayload {
    pub ev_price: Option<f64>,
    pub ev_resale: Option<f64>,
    pub ev_efficiency: Option<f64>,
    pub ev_energy_cost: Option<f64>,
    pub ev_maintenance: Option<f64>,
    pub ev_insurance: Option<f64>,
    pub ev_incentives: Option<f64>,
    pub ice_price: Option<f64>,
    pub ice_resale: Option<f64>,
    pub ice_efficiency: Option<f64>,
    pub ice_energy_cost: Option<f64>,
    pub ice_maintenance: Option<f64>,
    pub ice_insurance: Option<f64>,
    #[serde(alias = "averageAnnualDistance")]
    pub annual_distance: Option<f64>,
    pub ownership_years: Option<u32>,
}

impl From<&VehicleArgs> for VehiclePayload {
    fn from(args: &VehicleArgs) -> Self {
        Self {
            ev_price: Some(args.ev_price),
            ev_resale: Some(args.ev_resale),
            ev_efficiency: Some(args.ev_efficiency),
            ev_energy_cost: Some(args.ev_energy_cost),
            ev_maintenance: Some(args.ev_maintenance),
            ev_insurance: Some(args.ev_insurance),
            ev_incentives: Some(args.ev_incentives),
            ice_price: Some(args.ice_price),
            ice_resale: Some(args.ice_resale),
            ice_efficiency: Some(args.ice_efficiency),
            ice_energy_cost: Some(args.ice_energy_cost),
            ice_maintenance: Some(args.ice_maintenance),
            ice_insurance: Some(args.ice_insurance),
            annual_distance: Some(args.annual_distance),
            ownership_years: Some(args.ownership_years),
        }
    }
}

pub(crate) fn vehicle_args_from_payload(payload: VehiclePayload) -> VehicleArgs {
    let mut args = VehicleArgs::default();

    if let Some(v) = payload.ev_price {
        args.ev_price = v;
    }
    if let Some(v) = payload.ev_resale {
        args.ev_resale = v;
    }
    if let Some(v) = payload.ev_efficiency {
        args.ev_efficiency = v;
    }
    if let Some(v) = payload.ev_energy_cost {
        args.ev_energy_cost = v;
    }
    if let Some(v) = payload.ev_maintenance {
        args.ev_maintenance = v;
    }
    if let Some(v) = payload.ev_insurance {
        args.ev_insurance = v;
    }
    if let Some(v) = payload.ev_incentives {
        args.ev_incentives = v;
    }
    if let Some(v) = payload.ice_price {
        args.ice_price = v;
    }
    if let Some(v) = payload.ice_resale {
        args.ice_resale = v;
    }
    if let Some(v) = payload.ice_efficiency {
        args.ice_efficiency = v;
    }
    if let Some(v) = payload.ice_energy_cost {
        args.ice_energy_cost = v;
    }
    if let Some(v) = payload.ice_maintenance {
        args.ice_maintenance = v;
    }
    if let Some(v) = payload.ice_insurance {
        args.ice_insurance = v;
    }
    if let Some(v) = payload.annual_distance {
        args.annual_distance = v;
    }
    if let Some(v) = payload.ownership_years {
        args.ownership_years = v;
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn loan_payload_parses_web_keys() {
        let json = r#"{
          "purchaseAmount": 80000,
          "availableCash": 50000,
          "loanRate": 7.25,
          "investmentReturn": 9,
          "taxRate": 20,
          "compoundingFrequency": 12,
          "timePeriod": 36,
          "timeUnit": "months"
        }"#;
        let payload: LoanPayload = serde_json::from_str(json).expect("json should parse");
        let args = loan_args_from_payload(payload);

        assert_approx(args.purchase_amount, 80_000.0);
        assert_approx(args.available_cash, 50_000.0);
        assert_approx(args.loan_rate, 7.25);
        assert_approx(args.investment_return, 9.0);
        assert_approx(args.tax_rate, 20.0);
        assert_eq!(args.compounding_frequency, 12);
        assert_approx(args.time_period, 36.0);
        assert_eq!(args.time_unit, CliTimeUnit::Months);
    }

    #[test]
    fn loan_payload_preset_is_overridden_by_explicit_keys() {
        let json = r#"{ "preset": "conservative", "loanRate": 5 }"#;
        let payload: LoanPayload = serde_json::from_str(json).expect("json should parse");
        let args = loan_args_from_payload(payload);

        assert_approx(args.purchase_amount, 50_000.0);
        assert_approx(args.available_cash, 60_000.0);
        assert_approx(args.loan_rate, 5.0);
        assert_approx(args.investment_return, 7.0);
        assert_approx(args.time_period, 5.0);
    }

    #[test]
    fn empty_loan_payload_uses_default_scenario() {
        let args = loan_args_from_payload(LoanPayload::default());
        assert_eq!(args, LoanArgs::default());
    }

    #[test]
    fn loan_payload_rejects_string_amounts() {
        let json = r#"{ "purchaseAmount": "a lot" }"#;
        assert!(serde_json::from_str::<LoanPayload>(json).is_err());
    }

    #[test]
    fn resolved_loan_args_round_trip_through_payload() {
        let args = LoanArgs {
            available_cash: 10_000.0,
            time_unit: CliTimeUnit::Months,
            ..LoanArgs::default()
        };
        let payload = LoanPayload::from(&args);
        assert!(payload.preset.is_none());
        assert_eq!(loan_args_from_payload(payload), args);
    }

    #[test]
    fn goal_payload_accepts_years_alias() {
        let json = r#"{ "goalName": "Wedding", "costToday": 30000, "years": 3 }"#;
        let payload: GoalPayload = serde_json::from_str(json).expect("json should parse");
        let args = goal_args_from_payload(payload);

        assert_eq!(args.goal_name, "Wedding");
        assert_approx(args.cost_today, 30_000.0);
        assert_eq!(args.years_to_achieve, 3);
        assert_approx(args.expected_return, 10.0);
    }

    #[test]
    fn vehicle_payload_parses_web_keys() {
        let json = r#"{
          "evPrice": 45000,
          "evIncentives": 7500,
          "iceResale": 35,
          "averageAnnualDistance": 20000,
          "ownershipYears": 6
        }"#;
        let payload: VehiclePayload = serde_json::from_str(json).expect("json should parse");
        let args = vehicle_args_from_payload(payload);

        assert_approx(args.ev_price, 45_000.0);
        assert_approx(args.ev_incentives, 7_500.0);
        assert_approx(args.ice_resale, 35.0);
        assert_approx(args.annual_distance, 20_000.0);
        assert_eq!(args.ownership_years, 6);
        assert_approx(args.ice_price, VehicleArgs::default().ice_price);
    }
}
