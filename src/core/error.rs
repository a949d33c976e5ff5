use thiserror::Error;

use super::types::VehicleKind;

/// Longest horizon, in years, any calculator accepts.
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Reasons an analyzer rejects a calculation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("purchase amount must be positive, got {0}")]
    NonPositivePurchaseAmount(f64),

    #[error("available cash cannot be negative, got {0}")]
    NegativeAvailableCash(f64),

    #[error("loan rate cannot be negative, got {0}")]
    NegativeLoanRate(f64),

    #[error("investment return must be greater than -100%, got {0}")]
    InvestmentReturnTooLow(f64),

    #[error("tax rate must be between 0 and 1, got {0}")]
    TaxRateOutOfRange(f64),

    #[error("compounding frequency must be at least once per year")]
    ZeroCompoundingFrequency,

    #[error("time period must be positive, got {0} years")]
    NonPositiveHorizon(f64),

    #[error("goal name is required")]
    MissingGoalName,

    #[error("goal cost must be positive, got {0}")]
    NonPositiveGoalCost(f64),

    #[error("existing investment cannot be negative, got {0}")]
    NegativeExistingInvestment(f64),

    #[error("years to achieve the goal must be positive")]
    ZeroGoalYears,

    #[error("expected return cannot be negative, got {0}")]
    NegativeExpectedReturn(f64),

    #[error("inflation rate cannot be negative, got {0}")]
    NegativeInflationRate(f64),

    #[error("{vehicle} purchase price must be positive, got {value}")]
    NonPositiveVehiclePrice { vehicle: VehicleKind, value: f64 },

    #[error("{vehicle} efficiency must be positive, got {value}")]
    NonPositiveEfficiency { vehicle: VehicleKind, value: f64 },

    #[error("{vehicle} resale value must be between 0 and 1 of the purchase price, got {value}")]
    ResaleFractionOutOfRange { vehicle: VehicleKind, value: f64 },

    #[error("{vehicle} {field} cannot be negative, got {value}")]
    NegativeVehicleCost {
        vehicle: VehicleKind,
        field: &'static str,
        value: f64,
    },

    #[error("EV incentives cannot be negative, got {0}")]
    NegativeIncentives(f64),

    #[error("average annual distance must be positive, got {0}")]
    NonPositiveDistance(f64),

    #[error("ownership period must be at least one year")]
    ZeroOwnershipYears,

    #[error("{field} cannot exceed {max} years, got {years}", max = MAX_HORIZON_YEARS)]
    HorizonTooLong { field: &'static str, years: f64 },

    #[error("{field} is too large to calculate")]
    Overflow { field: &'static str },
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

pub(crate) fn ensure_within_horizon(field: &'static str, years: f64) -> Result<f64, ValidationError> {
    if years > MAX_HORIZON_YEARS as f64 {
        Err(ValidationError::HorizonTooLong { field, years })
    } else {
        Ok(years)
    }
}

/// Derived figures must stay finite; `inf - inf` is NaN and compares as false.
pub(crate) fn ensure_calculable(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::Overflow { field })
    }
}
