use tracing::debug;

use super::error::{ValidationError, ensure_calculable, ensure_finite, ensure_within_horizon};
use super::types::{
    Breakeven, VehicleCostBreakdown, VehicleCostInput, VehicleKind, VehicleSpec, VehicleTcoResult,
    YearlyCostComparison,
};

#[derive(Debug, Clone, Copy)]
struct YearlyCosts {
    fuel: f64,
    maintenance: f64,
    insurance: f64,
}

impl YearlyCosts {
    fn for_vehicle(spec: &VehicleSpec, annual_distance: f64) -> Self {
        Self {
            fuel: annual_distance / spec.efficiency * spec.energy_cost,
            maintenance: spec.annual_maintenance,
            insurance: spec.annual_insurance,
        }
    }

    fn operating(self) -> f64 {
        self.fuel + self.maintenance + self.insurance
    }
}

fn cost_breakdown(
    spec: &VehicleSpec,
    incentives: f64,
    annual_distance: f64,
    years: u32,
) -> VehicleCostBreakdown {
    let years = years as f64;
    let total_distance = annual_distance * years;
    let energy_used = total_distance / spec.efficiency;
    let total_fuel_cost = energy_used * spec.energy_cost;
    let total_maintenance = spec.annual_maintenance * years;
    let total_insurance = spec.annual_insurance * years;
    let resale_value = spec.purchase_price * spec.resale_value_fraction;

    VehicleCostBreakdown {
        purchase_price: spec.purchase_price,
        incentives,
        total_fuel_cost,
        total_maintenance,
        total_insurance,
        resale_value,
        total_cost: spec.purchase_price - incentives + total_fuel_cost + total_maintenance
            + total_insurance
            - resale_value,
    }
}

/// Year at which two linear cost lines `initial + operating * t` meet.
fn solve_breakeven(
    ev_initial: f64,
    ice_initial: f64,
    ev_operating: f64,
    ice_operating: f64,
) -> Breakeven {
    if ev_initial <= ice_initial && ev_operating <= ice_operating {
        return Breakeven::EvAlwaysCheaper;
    }
    if ice_operating <= ev_operating {
        return Breakeven::NoBreakeven;
    }
    let years = (ev_initial - ice_initial) / (ice_operating - ev_operating);
    if years <= 0.0 {
        Breakeven::NoBreakeven
    } else {
        Breakeven::AfterYears(years)
    }
}

/// Total cost of ownership for an EV against a combustion vehicle, with the
/// cumulative cost per year and the raw breakeven point.
pub fn analyze_vehicle_tco(input: &VehicleCostInput) -> Result<VehicleTcoResult, ValidationError> {
    validate(input)?;

    let years = input.ownership_years;
    let ev = cost_breakdown(&input.ev, input.ev_incentives, input.average_annual_distance, years);
    let ice = cost_breakdown(&input.ice, 0.0, input.average_annual_distance, years);
    ensure_calculable("EV total cost", ev.total_cost)?;
    ensure_calculable("ICE total cost", ice.total_cost)?;
    let total_savings = ensure_calculable("total savings", ice.total_cost - ev.total_cost)?;

    let ev_yearly = YearlyCosts::for_vehicle(&input.ev, input.average_annual_distance);
    let ice_yearly = YearlyCosts::for_vehicle(&input.ice, input.average_annual_distance);
    let ev_initial = input.ev.purchase_price - input.ev_incentives;
    let ice_initial = input.ice.purchase_price;

    let mut yearly_comparison = Vec::with_capacity(years as usize);
    let mut ev_cumulative = ev_initial;
    let mut ice_cumulative = ice_initial;
    for year in 1..=years {
        ev_cumulative += ev_yearly.operating();
        ice_cumulative += ice_yearly.operating();

        // Resale is realised once, at disposal.
        let (ev_cumulative_cost, ice_cumulative_cost) = if year == years {
            (ev_cumulative - ev.resale_value, ice_cumulative - ice.resale_value)
        } else {
            (ev_cumulative, ice_cumulative)
        };
        yearly_comparison.push(YearlyCostComparison {
            year,
            ev_cumulative_cost,
            ice_cumulative_cost,
            ev_currently_cheaper: ev_cumulative_cost <= ice_cumulative_cost,
        });
    }

    let breakeven = solve_breakeven(
        ev_initial,
        ice_initial,
        ev_yearly.operating(),
        ice_yearly.operating(),
    );
    debug!(
        ev_total = ev.total_cost,
        ice_total = ice.total_cost,
        ?breakeven,
        "vehicle TCO analyzed"
    );

    Ok(VehicleTcoResult {
        total_savings,
        ev,
        ice,
        ev_yearly_operating_cost: ev_yearly.operating(),
        ice_yearly_operating_cost: ice_yearly.operating(),
        yearly_comparison,
        breakeven,
    })
}

fn validate(input: &VehicleCostInput) -> Result<(), ValidationError> {
    validate_spec(VehicleKind::Ev, &input.ev)?;
    validate_spec(VehicleKind::Ice, &input.ice)?;

    let incentives = ensure_finite("EV incentives", input.ev_incentives)?;
    let distance = ensure_finite("average annual distance", input.average_annual_distance)?;
    if incentives < 0.0 {
        return Err(ValidationError::NegativeIncentives(incentives));
    }
    if distance <= 0.0 {
        return Err(ValidationError::NonPositiveDistance(distance));
    }
    if input.ownership_years == 0 {
        return Err(ValidationError::ZeroOwnershipYears);
    }
    ensure_within_horizon("ownership period", input.ownership_years as f64)?;
    Ok(())
}

fn validate_spec(vehicle: VehicleKind, spec: &VehicleSpec) -> Result<(), ValidationError> {
    let [
        price_field,
        resale_field,
        efficiency_field,
        energy_field,
        maintenance_field,
        insurance_field,
    ] = match vehicle {
        VehicleKind::Ev => [
            "EV purchase price",
            "EV resale value",
            "EV efficiency",
            "EV energy cost",
            "EV annual maintenance",
            "EV annual insurance",
        ],
        VehicleKind::Ice => [
            "ICE purchase price",
            "ICE resale value",
            "ICE efficiency",
            "ICE energy cost",
            "ICE annual maintenance",
            "ICE annual insurance",
        ],
    };
    let price = ensure_finite(price_field, spec.purchase_price)?;
    let resale = ensure_finite(resale_field, spec.resale_value_fraction)?;
    let efficiency = ensure_finite(efficiency_field, spec.efficiency)?;

    if price <= 0.0 {
        return Err(ValidationError::NonPositiveVehiclePrice {
            vehicle,
            value: price,
        });
    }
    if efficiency <= 0.0 {
        return Err(ValidationError::NonPositiveEfficiency {
            vehicle,
            value: efficiency,
        });
    }
    if !(0.0..=1.0).contains(&resale) {
        return Err(ValidationError::ResaleFractionOutOfRange {
            vehicle,
            value: resale,
        });
    }

    for (finite_field, field, value) in [
        (energy_field, "energy cost", spec.energy_cost),
        (maintenance_field, "annual maintenance", spec.annual_maintenance),
        (insurance_field, "annual insurance", spec.annual_insurance),
    ] {
        let value = ensure_finite(finite_field, value)?;
        if value < 0.0 {
            return Err(ValidationError::NegativeVehicleCost {
                vehicle,
                field,
                value,
            });
        }
    }
    Ok(())
}
