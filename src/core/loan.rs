use tracing::{debug, warn};

use super::compounding::{amortized_loan_total_interest, investment_value_after_tax};
use super::error::{ValidationError, ensure_calculable, ensure_finite, ensure_within_horizon};
use super::types::{
    CashPathResult, FullLoanPathResult, LoanRecommendation, LoanScenarioInput, LoanScenarioResult,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LoanPreset {
    Conservative,
    Aggressive,
}

impl LoanPreset {
    pub const ALL: [LoanPreset; 2] = [LoanPreset::Conservative, LoanPreset::Aggressive];

    pub fn name(self) -> &'static str {
        match self {
            LoanPreset::Conservative => "conservative",
            LoanPreset::Aggressive => "aggressive",
        }
    }

    pub fn input(self) -> LoanScenarioInput {
        match self {
            LoanPreset::Conservative => LoanScenarioInput {
                purchase_amount: 50_000.0,
                available_cash: 60_000.0,
                loan_rate: 0.065,
                investment_return: 0.07,
                tax_rate: 0.0,
                compounding_frequency: 1,
                horizon_years: 5.0,
            },
            LoanPreset::Aggressive => LoanScenarioInput {
                purchase_amount: 100_000.0,
                available_cash: 120_000.0,
                loan_rate: 0.045,
                investment_return: 0.10,
                tax_rate: 0.0,
                compounding_frequency: 1,
                horizon_years: 10.0,
            },
        }
    }
}

/// Compares paying cash (borrowing only any shortfall) against borrowing the
/// full price and investing all available cash.
pub fn analyze_loan_vs_cash(
    input: &LoanScenarioInput,
) -> Result<LoanScenarioResult, ValidationError> {
    validate(input)?;

    let years = input.horizon_years;
    let loan_needed_for_shortfall = (input.purchase_amount - input.available_cash).max(0.0);
    let leftover_cash = (input.available_cash - input.purchase_amount).max(0.0);
    let cash_shortfall = loan_needed_for_shortfall > 0.0;
    if cash_shortfall {
        warn!(
            shortfall = loan_needed_for_shortfall,
            "available cash does not cover the purchase; cash path takes a partial loan"
        );
    }

    let cash_investment_value = ensure_calculable(
        "cash path investment value",
        investment_value_after_tax(
            leftover_cash,
            input.investment_return,
            years,
            input.compounding_frequency,
            input.tax_rate,
        ),
    )?;
    let cash_loan_interest = if cash_shortfall {
        ensure_calculable(
            "shortfall loan interest",
            amortized_loan_total_interest(loan_needed_for_shortfall, input.loan_rate, years),
        )?
    } else {
        0.0
    };
    let cash_path = CashPathResult {
        loan_needed_for_shortfall,
        leftover_cash,
        loan_interest: cash_loan_interest,
        investment_value: cash_investment_value,
        investment_returns: cash_investment_value - leftover_cash,
        net_position: cash_investment_value - (loan_needed_for_shortfall + cash_loan_interest),
    };

    let full_loan_interest = ensure_calculable(
        "full loan interest",
        amortized_loan_total_interest(input.purchase_amount, input.loan_rate, years),
    )?;
    let full_loan_investment_value = ensure_calculable(
        "full loan investment value",
        investment_value_after_tax(
            input.available_cash,
            input.investment_return,
            years,
            input.compounding_frequency,
            input.tax_rate,
        ),
    )?;
    let full_loan = FullLoanPathResult {
        loan_principal: input.purchase_amount,
        total_interest: full_loan_interest,
        investment_value: full_loan_investment_value,
        investment_returns: full_loan_investment_value - input.available_cash,
        net_position: full_loan_investment_value - (input.purchase_amount + full_loan_interest),
    };

    let net_benefit = ensure_calculable(
        "net benefit",
        full_loan.net_position - cash_path.net_position,
    )?;
    let recommendation = if net_benefit > 0.0 {
        LoanRecommendation::TakeLoanAndInvest
    } else if cash_shortfall {
        LoanRecommendation::PayCashWithPartialLoan
    } else {
        LoanRecommendation::PayCash
    };
    debug!(net_benefit, ?recommendation, "loan-vs-cash analyzed");

    Ok(LoanScenarioResult {
        cash_path,
        full_loan,
        net_benefit,
        recommendation,
        cash_shortfall,
    })
}

fn validate(input: &LoanScenarioInput) -> Result<(), ValidationError> {
    let purchase_amount = ensure_finite("purchase amount", input.purchase_amount)?;
    let available_cash = ensure_finite("available cash", input.available_cash)?;
    let loan_rate = ensure_finite("loan rate", input.loan_rate)?;
    let investment_return = ensure_finite("investment return", input.investment_return)?;
    let tax_rate = ensure_finite("tax rate", input.tax_rate)?;
    let horizon_years = ensure_finite("time period", input.horizon_years)?;

    if purchase_amount <= 0.0 {
        return Err(ValidationError::NonPositivePurchaseAmount(purchase_amount));
    }
    if available_cash < 0.0 {
        return Err(ValidationError::NegativeAvailableCash(available_cash));
    }
    if loan_rate < 0.0 {
        return Err(ValidationError::NegativeLoanRate(loan_rate));
    }
    if investment_return <= -1.0 {
        return Err(ValidationError::InvestmentReturnTooLow(investment_return));
    }
    if !(0.0..=1.0).contains(&tax_rate) {
        return Err(ValidationError::TaxRateOutOfRange(tax_rate));
    }
    if input.compounding_frequency == 0 {
        return Err(ValidationError::ZeroCompoundingFrequency);
    }
    if horizon_years <= 0.0 {
        return Err(ValidationError::NonPositiveHorizon(horizon_years));
    }
    ensure_within_horizon("time period", horizon_years)?;
    Ok(())
}
