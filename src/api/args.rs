use std::net::IpAddr;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::{
    GoalInput, LoanPreset, LoanScenarioInput, TimeUnit, VehicleCostInput, VehicleSpec,
};

#[derive(Parser, Debug)]
#[command(
    name = "fincalc",
    about = "Loan-vs-cash, savings goal and EV-vs-ICE ownership cost calculators"
)]
pub struct Cli {
    #[arg(
        long,
        env = "FINCALC_LOG",
        default_value = "info",
        global = true,
        help = "Log filter used when RUST_LOG is unset"
    )]
    pub log: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the calculators as a JSON API over HTTP
    Serve(ServeArgs),
    /// Compare paying cash against borrowing the full price and investing the cash
    LoanVsCash(LoanArgs),
    /// Work out the monthly saving needed to reach a goal
    Goal(GoalArgs),
    /// Compare EV and combustion vehicle total cost of ownership
    VehicleTco(VehicleArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "FINCALC_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,
    #[arg(long, env = "FINCALC_PORT", default_value_t = 8080)]
    pub port: u16,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliTimeUnit {
    Years,
    Months,
}

impl From<CliTimeUnit> for TimeUnit {
    fn from(value: CliTimeUnit) -> Self {
        match value {
            CliTimeUnit::Years => TimeUnit::Years,
            CliTimeUnit::Months => TimeUnit::Months,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct LoanArgs {
    #[arg(long, default_value_t = 100_000.0)]
    pub purchase_amount: f64,
    #[arg(long, default_value_t = 120_000.0)]
    pub available_cash: f64,
    #[arg(long, default_value_t = 4.5, help = "Annual loan interest rate in percent")]
    pub loan_rate: f64,
    #[arg(
        long,
        default_value_t = 10.0,
        help = "Expected annual investment return in percent"
    )]
    pub investment_return: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Tax on investment gains in percent"
    )]
    pub tax_rate: f64,
    #[arg(
        long,
        default_value_t = 1,
        help = "Compounding periods per year, e.g. 1, 2, 4, 12 or 365"
    )]
    pub compounding_frequency: u32,
    #[arg(long, default_value_t = 10.0)]
    pub time_period: f64,
    #[arg(long, value_enum, default_value_t = CliTimeUnit::Years)]
    pub time_unit: CliTimeUnit,
}

impl LoanArgs {
    pub fn from_preset(preset: LoanPreset) -> Self {
        let input = preset.input();
        Self {
            purchase_amount: input.purchase_amount,
            available_cash: input.available_cash,
            loan_rate: input.loan_rate * 100.0,
            investment_return: input.investment_return * 100.0,
            tax_rate: input.tax_rate * 100.0,
            compounding_frequency: input.compounding_frequency,
            time_period: input.horizon_years,
            time_unit: CliTimeUnit::Years,
        }
    }
}

impl Default for LoanArgs {
    fn default() -> Self {
        Self::from_preset(LoanPreset::Aggressive)
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct GoalArgs {
    #[arg(long, default_value = "My goal")]
    pub goal_name: String,
    #[arg(long, default_value_t = 1_000_000.0, help = "Cost of the goal in today's money")]
    pub cost_today: f64,
    #[arg(long, default_value_t = 0.0)]
    pub existing_investment: f64,
    #[arg(long = "years", default_value_t = 10)]
    pub years_to_achieve: u32,
    #[arg(
        long,
        default_value_t = 10.0,
        help = "Expected annual investment return in percent"
    )]
    pub expected_return: f64,
    #[arg(long, default_value_t = 6.0, help = "Expected annual inflation in percent")]
    pub inflation_rate: f64,
}

impl Default for GoalArgs {
    fn default() -> Self {
        Self {
            goal_name: "My goal".to_string(),
            cost_today: 1_000_000.0,
            existing_investment: 0.0,
            years_to_achieve: 10,
            expected_return: 10.0,
            inflation_rate: 6.0,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct VehicleArgs {
    #[arg(long, default_value_t = 1_500_000.0)]
    pub ev_price: f64,
    #[arg(
        long,
        default_value_t = 40.0,
        help = "EV resale value as percent of purchase price"
    )]
    pub ev_resale: f64,
    #[arg(long, default_value_t = 7.0, help = "EV distance per kWh")]
    pub ev_efficiency: f64,
    #[arg(long, default_value_t = 8.0, help = "Electricity price per kWh")]
    pub ev_energy_cost: f64,
    #[arg(long, default_value_t = 5_000.0)]
    pub ev_maintenance: f64,
    #[arg(long, default_value_t = 40_000.0)]
    pub ev_insurance: f64,
    #[arg(long, default_value_t = 0.0, help = "Subsidies that reduce the EV price")]
    pub ev_incentives: f64,
    #[arg(long, default_value_t = 1_000_000.0)]
    pub ice_price: f64,
    #[arg(
        long,
        default_value_t = 40.0,
        help = "ICE resale value as percent of purchase price"
    )]
    pub ice_resale: f64,
    #[arg(long, default_value_t = 15.0, help = "ICE distance per litre of fuel")]
    pub ice_efficiency: f64,
    #[arg(long, default_value_t = 100.0, help = "Fuel price per litre")]
    pub ice_energy_cost: f64,
    #[arg(long, default_value_t = 15_000.0)]
    pub ice_maintenance: f64,
    #[arg(long, default_value_t = 30_000.0)]
    pub ice_insurance: f64,
    #[arg(long, default_value_t = 15_000.0)]
    pub annual_distance: f64,
    #[arg(long, default_value_t = 8)]
    pub ownership_years: u32,
}

impl Default for VehicleArgs {
    fn default() -> Self {
        Self {
            ev_price: 1_500_000.0,
            ev_resale: 40.0,
            ev_efficiency: 7.0,
            ev_energy_cost: 8.0,
            ev_maintenance: 5_000.0,
            ev_insurance: 40_000.0,
            ev_incentives: 0.0,
            ice_price: 1_000_000.0,
            ice_resale: 40.0,
            ice_efficiency: 15.0,
            ice_energy_cost: 100.0,
            ice_maintenance: 15_000.0,
            ice_insurance: 30_000.0,
            annual_distance: 15_000.0,
            ownership_years: 8,
        }
    }
}

fn ensure_finite_args(fields: &[(&str, f64)]) -> Result<(), String> {
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(format!("{name} must be a finite number"));
        }
    }
    Ok(())
}

pub fn build_loan_input(args: &LoanArgs) -> Result<LoanScenarioInput, String> {
    ensure_finite_args(&[
        ("--purchase-amount", args.purchase_amount),
        ("--available-cash", args.available_cash),
        ("--loan-rate", args.loan_rate),
        ("--investment-return", args.investment_return),
        ("--tax-rate", args.tax_rate),
        ("--time-period", args.time_period),
    ])?;

    Ok(LoanScenarioInput {
        purchase_amount: args.purchase_amount,
        available_cash: args.available_cash,
        loan_rate: args.loan_rate / 100.0,
        investment_return: args.investment_return / 100.0,
        tax_rate: args.tax_rate / 100.0,
        compounding_frequency: args.compounding_frequency,
        horizon_years: TimeUnit::from(args.time_unit).to_years(args.time_period),
    })
}

pub fn build_goal_input(args: &GoalArgs) -> Result<GoalInput, String> {
    ensure_finite_args(&[
        ("--cost-today", args.cost_today),
        ("--existing-investment", args.existing_investment),
        ("--expected-return", args.expected_return),
        ("--inflation-rate", args.inflation_rate),
    ])?;

    Ok(GoalInput {
        goal_name: args.goal_name.trim().to_string(),
        cost_today: args.cost_today,
        existing_investment: args.existing_investment,
        years_to_achieve: args.years_to_achieve,
        expected_return: args.expected_return / 100.0,
        inflation_rate: args.inflation_rate / 100.0,
    })
}

pub fn build_vehicle_input(args: &VehicleArgs) -> Result<VehicleCostInput, String> {
    ensure_finite_args(&[
        ("--ev-price", args.ev_price),
        ("--ev-resale", args.ev_resale),
        ("--ev-efficiency", args.ev_efficiency),
        ("--ev-energy-cost", args.ev_energy_cost),
        ("--ev-maintenance", args.ev_maintenance),
        ("--ev-insurance", args.ev_insurance),
        ("--ev-incentives", args.ev_incentives),
        ("--ice-price", args.ice_price),
        ("--ice-resale", args.ice_resale),
        ("--ice-efficiency", args.ice_efficiency),
        ("--ice-energy-cost", args.ice_energy_cost),
        ("--ice-maintenance", args.ice_maintenance),
        ("--ice-insurance", args.ice_insurance),
        ("--annual-distance", args.annual_distance),
    ])?;

    Ok(VehicleCostInput {
        ev: VehicleSpec {
            purchase_price: args.ev_price,
            resale_value_fraction: args.ev_resale / 100.0,
            efficiency: args.ev_efficiency,
            energy_cost: args.ev_energy_cost,
            annual_maintenance: args.ev_maintenance,
            annual_insurance: args.ev_insurance,
        },
        ice: VehicleSpec {
            purchase_price: args.ice_price,
            resale_value_fraction: args.ice_resale / 100.0,
            efficiency: args.ice_efficiency,
            energy_cost: args.ice_energy_cost,
            annual_maintenance: args.ice_maintenance,
            annual_insurance: args.ice_insurance,
        },
        ev_incentives: args.ev_incentives,
        average_annual_distance: args.annual_distance,
        ownership_years: args.ownership_years,
    })
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
    fn loan_input_converts_percent_and_months() {
        let args = LoanArgs {
            loan_rate: 6.0,
            investment_return: 8.0,
            tax_rate: 15.0,
            time_period: 18.0,
            time_unit: CliTimeUnit::Months,
            ..LoanArgs::default()
        };

        let input = build_loan_input(&args).expect("valid args");
        assert_approx(input.loan_rate, 0.06);
        assert_approx(input.investment_return, 0.08);
        assert_approx(input.tax_rate, 0.15);
        assert_approx(input.horizon_years, 1.5);
    }

    #[test]
    fn default_loan_args_match_aggressive_preset() {
        let input = build_loan_input(&LoanArgs::default()).expect("valid args");
        let preset = LoanPreset::Aggressive.input();
        assert_approx(input.purchase_amount, preset.purchase_amount);
        assert_approx(input.loan_rate, preset.loan_rate);
        assert_approx(input.investment_return, preset.investment_return);
        assert_approx(input.horizon_years, preset.horizon_years);
    }

    #[test]
    fn loan_input_rejects_non_finite_values() {
        let args = LoanArgs {
            available_cash: f64::NAN,
            ..LoanArgs::default()
        };
        let err = build_loan_input(&args).expect_err("NaN must be rejected");
        assert!(err.contains("--available-cash"));
    }

    #[test]
    fn goal_input_trims_name_and_converts_rates() {
        let args = GoalArgs {
            goal_name: "  Sabbatical ".to_string(),
            expected_return: 7.0,
            inflation_rate: 3.0,
            ..GoalArgs::default()
        };
        let input = build_goal_input(&args).expect("valid args");
        assert_eq!(input.goal_name, "Sabbatical");
        assert_approx(input.expected_return, 0.07);
        assert_approx(input.inflation_rate, 0.03);
    }

    #[test]
    fn vehicle_input_converts_resale_percent() {
        let args = VehicleArgs {
            ev_resale: 55.0,
            ..VehicleArgs::default()
        };
        let input = build_vehicle_input(&args).expect("valid args");
        assert_approx(input.ev.resale_value_fraction, 0.55);
        assert_approx(input.ice.resale_value_fraction, 0.40);
        assert_eq!(input.ownership_years, 8);
    }

    #[test]
    fn vehicle_input_rejects_infinite_distance() {
        let args = VehicleArgs {
            annual_distance: f64::INFINITY,
            ..VehicleArgs::default()
        };
        let err = build_vehicle_input(&args).expect_err("infinity must be rejected");
        assert!(err.contains("--annual-distance"));
    }

    #[test]
    fn cli_parses_subcommand_flags() {
        let cli = Cli::try_parse_from([
            "fincalc",
            "loan-vs-cash",
            "--purchase-amount",
            "50000",
            "--time-period",
            "6",
            "--time-unit",
            "months",
        ])
        .expect("flags should parse");
        let Command::LoanVsCash(args) = cli.command else {
            panic!("expected loan-vs-cash command");
        };
        assert_approx(args.purchase_amount, 50_000.0);
        assert_approx(args.available_cash, 120_000.0);
        assert_eq!(args.time_unit, CliTimeUnit::Months);
        assert_eq!(cli.log, "info");
    }

    #[test]
    fn cli_rejects_non_numeric_amount() {
        let err = Cli::try_parse_from(["fincalc", "goal", "--cost-today", "lots"])
            .expect_err("non-numeric value must fail");
        assert!(err.to_string().contains("--cost-today"));
    }
}
