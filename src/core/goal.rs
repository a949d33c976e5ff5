use tracing::debug;

use super::compounding::{annuity_payment_for_future_value, compound_growth};
use super::error::{ValidationError, ensure_calculable, ensure_finite, ensure_within_horizon};
use super::types::{GoalInput, GoalResult, GoalYearProgress};

pub fn plan_goal(input: &GoalInput) -> Result<GoalResult, ValidationError> {
    validate(input)?;

    let years = input.years_to_achieve as f64;
    let future_cost = ensure_calculable(
        "future goal cost",
        compound_growth(input.cost_today, input.inflation_rate, years, 1),
    )?;
    let future_value_of_existing = ensure_calculable(
        "future value of existing investment",
        compound_growth(input.existing_investment, input.expected_return, years, 1),
    )?;
    let remaining_amount_needed = (future_cost - future_value_of_existing).max(0.0);
    let goal_already_met = remaining_amount_needed <= 0.0;

    let required_monthly_investment = if goal_already_met {
        0.0
    } else {
        annuity_payment_for_future_value(remaining_amount_needed, input.expected_return, years)
    };

    let yearly_contribution = required_monthly_investment * 12.0;
    let mut total_invested = input.existing_investment;
    let mut investment_value = input.existing_investment;
    let mut yearly_breakdown = Vec::with_capacity(input.years_to_achieve as usize);
    for year in 1..=input.years_to_achieve {
        total_invested += yearly_contribution;
        investment_value = (investment_value + yearly_contribution) * (1.0 + input.expected_return);
        yearly_breakdown.push(GoalYearProgress {
            year,
            total_invested,
            investment_value,
            investment_return_earned: investment_value - total_invested,
            percent_achieved: (investment_value / future_cost * 100.0).min(100.0),
        });
    }

    debug!(
        goal = %input.goal_name,
        future_cost,
        required_monthly_investment,
        goal_already_met,
        "goal planned"
    );

    Ok(GoalResult {
        goal_name: input.goal_name.trim().to_string(),
        future_cost,
        future_value_of_existing,
        remaining_amount_needed,
        required_monthly_investment,
        goal_already_met,
        yearly_breakdown,
    })
}

fn validate(input: &GoalInput) -> Result<(), ValidationError> {
    if input.goal_name.trim().is_empty() {
        return Err(ValidationError::MissingGoalName);
    }
    let cost_today = ensure_finite("goal cost", input.cost_today)?;
    let existing_investment = ensure_finite("existing investment", input.existing_investment)?;
    let expected_return = ensure_finite("expected return", input.expected_return)?;
    let inflation_rate = ensure_finite("inflation rate", input.inflation_rate)?;

    if cost_today <= 0.0 {
        return Err(ValidationError::NonPositiveGoalCost(cost_today));
    }
    if existing_investment < 0.0 {
        return Err(ValidationError::NegativeExistingInvestment(
            existing_investment,
        ));
    }
    if input.years_to_achieve == 0 {
        return Err(ValidationError::ZeroGoalYears);
    }
    ensure_within_horizon("years to achieve the goal", input.years_to_achieve as f64)?;
    if expected_return < 0.0 {
        return Err(ValidationError::NegativeExpectedReturn(expected_return));
    }
    if inflation_rate < 0.0 {
        return Err(ValidationError::NegativeInflationRate(inflation_rate));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn house_deposit() -> GoalInput {
        GoalInput {
            goal_name: "House deposit".to_string(),
            cost_today: 1_000_000.0,
            existing_investment: 0.0,
            years_to_achieve: 10,
            expected_return: 0.10,
            inflation_rate: 0.06,
        }
    }

    #[test]
    fn ten_year_goal_solves_annuity_payment() {
        let result = plan_goal(&house_deposit()).expect("valid goal");

        assert_approx_tol(result.future_cost, 1_790_847.70, 0.01);
        assert_approx_tol(result.future_value_of_existing, 0.0, 1e-9);
        assert_approx_tol(result.remaining_amount_needed, result.future_cost, 1e-9);

        let monthly_rate = 0.10 / 12.0;
        let expected =
            result.future_cost * monthly_rate / ((1.0 + monthly_rate).powi(120) - 1.0);
        assert_approx_tol(result.required_monthly_investment, expected, 1e-6);
        assert_approx_tol(result.required_monthly_investment, 8_742.5, 1.0);
        assert!(!result.goal_already_met);
        assert_eq!(result.goal_name, "House deposit");
    }

    #[test]
    fn yearly_breakdown_compounds_lump_contributions() {
        let result = plan_goal(&house_deposit()).expect("valid goal");
        assert_eq!(result.yearly_breakdown.len(), 10);

        let yearly = result.required_monthly_investment * 12.0;
        let first = result.yearly_breakdown[0];
        assert_eq!(first.year, 1);
        assert_approx_tol(first.total_invested, yearly, 1e-6);
        assert_approx_tol(first.investment_value, yearly * 1.1, 1e-6);
        assert_approx_tol(first.investment_return_earned, yearly * 0.1, 1e-6);

        let second = result.yearly_breakdown[1];
        assert_approx_tol(second.investment_value, (yearly * 1.1 + yearly) * 1.1, 1e-6);
        assert_approx_tol(
            second.percent_achieved,
            second.investment_value / result.future_cost * 100.0,
            1e-9,
        );
    }

    #[test]
    fn existing_investment_that_covers_goal_needs_no_contribution() {
        let mut input = house_deposit();
        input.existing_investment = 900_000.0;

        let result = plan_goal(&input).expect("valid goal");
        assert!(result.future_value_of_existing > result.future_cost);
        assert_eq!(result.remaining_amount_needed, 0.0);
        assert_eq!(result.required_monthly_investment, 0.0);
        assert!(result.goal_already_met);

        let last = result.yearly_breakdown.last().expect("ten years of progress");
        assert_approx_tol(last.total_invested, 900_000.0, 1e-9);
        assert_eq!(last.percent_achieved, 100.0);
    }

    #[test]
    fn zero_return_spreads_remaining_cost_evenly() {
        let mut input = house_deposit();
        input.expected_return = 0.0;
        input.inflation_rate = 0.0;
        input.existing_investment = 40_000.0;

        let result = plan_goal(&input).expect("valid goal");
        assert_approx_tol(result.remaining_amount_needed, 960_000.0, 1e-9);
        assert_approx_tol(result.required_monthly_investment, 8_000.0, 1e-9);

        let last = result.yearly_breakdown.last().expect("ten years of progress");
        assert_approx_tol(last.investment_value, 1_000_000.0, 1e-6);
        assert_approx_tol(last.investment_return_earned, 0.0, 1e-6);
        assert_approx_tol(last.percent_achieved, 100.0, 1e-9);
    }

    #[test]
    fn rejects_invalid_goals() {
        let mut blank = house_deposit();
        blank.goal_name = "   ".to_string();
        assert_eq!(plan_goal(&blank).unwrap_err(), ValidationError::MissingGoalName);

        let mut free = house_deposit();
        free.cost_today = 0.0;
        assert_eq!(
            plan_goal(&free).unwrap_err(),
            ValidationError::NonPositiveGoalCost(0.0)
        );

        let mut now = house_deposit();
        now.years_to_achieve = 0;
        assert_eq!(plan_goal(&now).unwrap_err(), ValidationError::ZeroGoalYears);

        let mut losing = house_deposit();
        losing.expected_return = -0.02;
        assert_eq!(
            plan_goal(&losing).unwrap_err(),
            ValidationError::NegativeExpectedReturn(-0.02)
        );

        let mut deflation = house_deposit();
        deflation.inflation_rate = -0.01;
        assert_eq!(
            plan_goal(&deflation).unwrap_err(),
            ValidationError::NegativeInflationRate(-0.01)
        );

        let mut debt = house_deposit();
        debt.existing_investment = -5.0;
        assert_eq!(
            plan_goal(&debt).unwrap_err(),
            ValidationError::NegativeExistingInvestment(-5.0)
        );

        let mut lifetime = house_deposit();
        lifetime.years_to_achieve = u32::MAX;
        assert_eq!(
            plan_goal(&lifetime).unwrap_err(),
            ValidationError::HorizonTooLong {
                field: "years to achieve the goal",
                years: u32::MAX as f64
            }
        );
    }

    #[test]
    fn century_long_goal_is_accepted() {
        let mut input = house_deposit();
        input.years_to_achieve = 100;
        let result = plan_goal(&input).expect("100 years is within range");
        assert_eq!(result.yearly_breakdown.len(), 100);
    }

    #[test]
    fn overflowing_growth_is_rejected_instead_of_reported_as_met() {
        let runaway = GoalInput {
            goal_name: "Moonbase".to_string(),
            cost_today: 1_000.0,
            existing_investment: 1.0,
            years_to_achieve: 100,
            expected_return: 1.0e10,
            inflation_rate: 1.0e10,
        };
        assert_eq!(
            plan_goal(&runaway).unwrap_err(),
            ValidationError::Overflow {
                field: "future goal cost"
            }
        );

        let windfall = GoalInput {
            inflation_rate: 0.05,
            ..runaway
        };
        assert_eq!(
            plan_goal(&windfall).unwrap_err(),
            ValidationError::Overflow {
                field: "future value of existing investment"
            }
        );
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_breakdown_is_bounded_and_monotonic(
            cost in 1_000u32..5_000_000,
            existing in 0u32..2_000_000,
            years in 1u32..40,
            return_bp in 0u32..1_500,
            inflation_bp in 0u32..1_000
        ) {
            let input = GoalInput {
                goal_name: "Goal".to_string(),
                cost_today: cost as f64,
                existing_investment: existing as f64,
                years_to_achieve: years,
                expected_return: return_bp as f64 / 10_000.0,
                inflation_rate: inflation_bp as f64 / 10_000.0,
            };
            let result = plan_goal(&input).expect("valid goal");
            prop_assert_eq!(result.yearly_breakdown.len(), years as usize);
            prop_assert!(result.remaining_amount_needed >= 0.0);
            prop_assert!(result.required_monthly_investment >= 0.0);
            prop_assert!(result.required_monthly_investment.is_finite());

            let mut previous_invested = input.existing_investment;
            for (idx, row) in result.yearly_breakdown.iter().enumerate() {
                prop_assert_eq!(row.year, idx as u32 + 1);
                prop_assert!(row.percent_achieved <= 100.0);
                prop_assert!(row.total_invested + 1e-9 >= previous_invested);
                prop_assert!(row.investment_return_earned >= -1e-6);
                previous_invested = row.total_invested;
            }
        }
    }
}
