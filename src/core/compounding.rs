//! Growth and borrowing primitives shared by the analyzers.
//!
//! Rates are annual fractions (`0.05` for 5%) and horizons are in years,
//! possibly fractional.

pub const DEFAULT_PERIODS_PER_YEAR: u32 = 1;

const ZERO_RATE_EPS: f64 = 1e-12;

/// `principal * (1 + r/n)^(n*t)`. A zero `periods_per_year` falls back to
/// annual compounding.
pub fn compound_growth(principal: f64, annual_rate: f64, years: f64, periods_per_year: u32) -> f64 {
    if principal == 0.0 {
        return 0.0;
    }
    let periods = if periods_per_year == 0 {
        DEFAULT_PERIODS_PER_YEAR
    } else {
        periods_per_year
    } as f64;
    principal * (1.0 + annual_rate / periods).powf(periods * years)
}

/// Compounded value with only the gain taxed at `tax_rate`.
pub fn investment_value_after_tax(
    principal: f64,
    annual_rate: f64,
    years: f64,
    periods_per_year: u32,
    tax_rate: f64,
) -> f64 {
    let amount = compound_growth(principal, annual_rate, years, periods_per_year);
    let gain = amount - principal;
    amount - gain * tax_rate
}

/// Fixed monthly payment that retires `principal` over `years`.
pub fn amortized_monthly_payment(principal: f64, annual_rate: f64, years: f64) -> f64 {
    let payments = years * 12.0;
    if principal <= 0.0 || payments <= 0.0 {
        return 0.0;
    }

    let monthly_rate = annual_rate / 12.0;
    if monthly_rate.abs() < ZERO_RATE_EPS {
        return principal / payments;
    }

    let growth = (1.0 + monthly_rate).powf(payments);
    if !growth.is_finite() {
        // growth / (growth - 1) tends to 1.
        return principal * monthly_rate;
    }
    principal * monthly_rate * growth / (growth - 1.0)
}

/// Level monthly contribution whose ordinary-annuity future value after
/// `years` equals `target`. A zero rate spreads `target` evenly.
pub fn annuity_payment_for_future_value(target: f64, annual_rate: f64, years: f64) -> f64 {
    let payments = years * 12.0;
    if target <= 0.0 || payments <= 0.0 {
        return 0.0;
    }

    let monthly_rate = annual_rate / 12.0;
    if monthly_rate.abs() < ZERO_RATE_EPS {
        return target / payments;
    }
    target * monthly_rate / ((1.0 + monthly_rate).powf(payments) - 1.0)
}

/// Total interest paid over the life of a fixed-payment loan.
///
/// Monthly amortization is applied regardless of how the lender actually
/// compounds, so treat the figure as an approximation.
pub fn amortized_loan_total_interest(principal: f64, annual_rate: f64, years: f64) -> f64 {
    if principal <= 0.0 || years <= 0.0 || annual_rate.abs() < ZERO_RATE_EPS {
        return 0.0;
    }
    let payments = years * 12.0;
    amortized_monthly_payment(principal, annual_rate, years) * payments - principal
}
