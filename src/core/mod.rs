pub mod compounding;
mod error;
mod goal;
mod loan;
mod types;
mod vehicle;

pub use error::{MAX_HORIZON_YEARS, ValidationError};
pub use goal::plan_goal;
pub use loan::{LoanPreset, analyze_loan_vs_cash};
pub use types::{
    Breakeven, BreakevenTiming, CashPathResult, FullLoanPathResult, GoalInput, GoalResult,
    GoalYearProgress, LoanRecommendation, LoanScenarioInput, LoanScenarioResult, TimeUnit,
    VehicleCostBreakdown, VehicleCostInput, VehicleKind, VehicleSpec, VehicleTcoResult,
    YearlyCostComparison,
};
pub use vehicle::analyze_vehicle_tco;
