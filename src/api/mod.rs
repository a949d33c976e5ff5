mod args;
mod payload;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Json, Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

pub use args::{
    Cli, CliTimeUnit, Command, GoalArgs, LoanArgs, ServeArgs, VehicleArgs, build_goal_input,
    build_loan_input, build_vehicle_input,
};
pub use store::{Calculator, InputStore, MemoryInputStore};

use crate::core::{
    Breakeven, BreakevenTiming, GoalResult, LoanPreset, LoanRecommendation, LoanScenarioResult,
    TimeUnit, VehicleTcoResult, analyze_loan_vs_cash, analyze_vehicle_tco, plan_goal,
};
use payload::{
    ApiTimeUnit, GoalPayload, LoanPayload, VehiclePayload, goal_args_from_payload,
    loan_args_from_payload, vehicle_args_from_payload,
};

#[derive(Clone)]
struct AppState {
    store: Arc<dyn InputStore>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoanVsCashResponse {
    time_period: f64,
    time_unit: ApiTimeUnit,
    horizon_years: f64,
    #[serde(flatten)]
    result: LoanScenarioResult,
    warnings: Vec<String>,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalResponse {
    #[serde(flatten)]
    result: GoalResult,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VehicleTcoResponse {
    ownership_years: u32,
    #[serde(flatten)]
    result: VehicleTcoResult,
    breakeven_timing: BreakevenTiming,
    message: String,
}

#[derive(Debug, Serialize)]
struct PresetEntry {
    name: &'static str,
    inputs: LoanPayload,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn loan_vs_cash_response(args: &LoanArgs) -> Result<LoanVsCashResponse, String> {
    let input = build_loan_input(args)?;
    let result = analyze_loan_vs_cash(&input).map_err(|e| e.to_string())?;

    let horizon = format!(
        "{} {}",
        args.time_period,
        TimeUnit::from(args.time_unit).label()
    );
    let mut warnings = Vec::new();
    if result.cash_shortfall {
        warnings.push(format!(
            "Available cash is {:.0} short of the purchase amount; the cash option includes a loan for the difference.",
            result.cash_path.loan_needed_for_shortfall
        ));
    }

    let message = match result.recommendation {
        LoanRecommendation::TakeLoanAndInvest => format!(
            "Taking a loan and investing provides {:.0} more after {horizon}.",
            result.net_benefit
        ),
        LoanRecommendation::PayCash => format!(
            "Paying cash saves {:.0} compared to taking a loan after {horizon}.",
            result.net_benefit.abs()
        ),
        LoanRecommendation::PayCashWithPartialLoan => format!(
            "Paying cash and borrowing only the {:.0} shortfall saves {:.0} compared to a full loan after {horizon}.",
            result.cash_path.loan_needed_for_shortfall,
            result.net_benefit.abs()
        ),
    };

    Ok(LoanVsCashResponse {
        time_period: args.time_period,
        time_unit: args.time_unit.into(),
        horizon_years: input.horizon_years,
        result,
        warnings,
        message,
    })
}

fn goal_response(args: &GoalArgs) -> Result<GoalResponse, String> {
    let input = build_goal_input(args)?;
    let result = plan_goal(&input).map_err(|e| e.to_string())?;

    let message = if result.goal_already_met {
        format!(
            "Your existing investment already covers {} in {} years.",
            result.goal_name, input.years_to_achieve
        )
    } else {
        format!(
            "Invest {:.2} per month for {} years to reach {} ({:.0} in future money).",
            result.required_monthly_investment,
            input.years_to_achieve,
            result.goal_name,
            result.future_cost
        )
    };

    Ok(GoalResponse { result, message })
}

fn vehicle_tco_response(args: &VehicleArgs) -> Result<VehicleTcoResponse, String> {
    let input = build_vehicle_input(args)?;
    let result = analyze_vehicle_tco(&input).map_err(|e| e.to_string())?;

    let timing = result.breakeven.timing(input.ownership_years);
    let years = input.ownership_years;
    let message = match (timing, result.breakeven) {
        (BreakevenTiming::EvAlwaysCheaper, _) => {
            "The EV costs less up front and to run, so it is cheaper from day one.".to_string()
        }
        (BreakevenTiming::WithinOwnership, Breakeven::AfterYears(t)) => format!(
            "The EV breaks even after {t:.1} years, within the {years}-year ownership period."
        ),
        (BreakevenTiming::BeyondOwnership, Breakeven::AfterYears(t)) => format!(
            "The EV would break even after {t:.1} years, beyond the {years}-year ownership period."
        ),
        _ => "The EV never recovers its higher price: its running costs are not lower.".to_string(),
    };

    Ok(VehicleTcoResponse {
        ownership_years: years,
        result,
        breakeven_timing: timing,
        message,
    })
}

fn loan_presets() -> Vec<PresetEntry> {
    LoanPreset::ALL
        .into_iter()
        .map(|preset| PresetEntry {
            name: preset.name(),
            inputs: LoanPayload::from(&LoanArgs::from_preset(preset)),
        })
        .collect()
}

pub fn router(store: Arc<dyn InputStore>) -> Router {
    Router::new()
        .route(
            "/api/loan-vs-cash",
            get(loan_get_handler).post(loan_post_handler),
        )
        .route("/api/loan-vs-cash/presets", get(loan_presets_handler))
        .route("/api/goal", get(goal_get_handler).post(goal_post_handler))
        .route(
            "/api/vehicle-tco",
            get(vehicle_get_handler).post(vehicle_post_handler),
        )
        .route("/api/last-inputs/:calculator", get(last_inputs_handler))
        .fallback(not_found_handler)
        .with_state(AppState { store })
}

pub async fn run_http_server(args: ServeArgs) -> std::io::Result<()> {
    let addr = SocketAddr::new(args.host, args.port);
    let app = router(Arc::new(MemoryInputStore::default()));

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "fincalc HTTP API listening");
    info!("Local access: http://127.0.0.1:{}/api/loan-vs-cash", args.port);

    axum::serve(listener, app).await
}

/// Runs one command to completion; one-shot calculators print JSON to stdout.
pub async fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Serve(args) => run_http_server(args)
            .await
            .map_err(|e| format!("Server error: {e}")),
        Command::LoanVsCash(args) => print_json(&loan_vs_cash_response(&args)?),
        Command::Goal(args) => print_json(&goal_response(&args)?),
        Command::VehicleTco(args) => print_json(&vehicle_tco_response(&args)?),
    }
}

fn print_json<T: Serialize>(body: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(body)
        .map_err(|e| format!("Failed to serialize response: {e}"))?;
    println!("{json}");
    Ok(())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn loan_get_handler(
    State(state): State<AppState>,
    Query(payload): Query<LoanPayload>,
) -> Response {
    loan_handler_impl(&state, payload)
}

async fn loan_post_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoanPayload>,
) -> Response {
    loan_handler_impl(&state, payload)
}

async fn loan_presets_handler() -> Response {
    json_response(StatusCode::OK, loan_presets())
}

async fn goal_get_handler(
    State(state): State<AppState>,
    Query(payload): Query<GoalPayload>,
) -> Response {
    goal_handler_impl(&state, payload)
}

async fn goal_post_handler(
    State(state): State<AppState>,
    Json(payload): Json<GoalPayload>,
) -> Response {
    goal_handler_impl(&state, payload)
}

async fn vehicle_get_handler(
    State(state): State<AppState>,
    Query(payload): Query<VehiclePayload>,
) -> Response {
    vehicle_handler_impl(&state, payload)
}

async fn vehicle_post_handler(
    State(state): State<AppState>,
    Json(payload): Json<VehiclePayload>,
) -> Response {
    vehicle_handler_impl(&state, payload)
}

async fn last_inputs_handler(
    State(state): State<AppState>,
    Path(calculator): Path<Calculator>,
) -> Response {
    last_inputs_impl(&state, calculator)
}

fn loan_handler_impl(state: &AppState, payload: LoanPayload) -> Response {
    debug!(?payload, "loan-vs-cash request");
    let args = loan_args_from_payload(payload);
    match loan_vs_cash_response(&args) {
        Ok(response) => {
            remember(state, Calculator::LoanVsCash, &LoanPayload::from(&args));
            json_response(StatusCode::OK, response)
        }
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn goal_handler_impl(state: &AppState, payload: GoalPayload) -> Response {
    debug!(?payload, "goal request");
    let args = goal_args_from_payload(payload);
    match goal_response(&args) {
        Ok(response) => {
            remember(state, Calculator::Goal, &GoalPayload::from(&args));
            json_response(StatusCode::OK, response)
        }
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn vehicle_handler_impl(state: &AppState, payload: VehiclePayload) -> Response {
    debug!(?payload, "vehicle-tco request");
    let args = vehicle_args_from_payload(payload);
    match vehicle_tco_response(&args) {
        Ok(response) => {
            remember(state, Calculator::VehicleTco, &VehiclePayload::from(&args));
            json_response(StatusCode::OK, response)
        }
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn last_inputs_impl(state: &AppState, calculator: Calculator) -> Response {
    match state.store.load(calculator) {
        Some(inputs) => json_response(StatusCode::OK, inputs),
        None => error_response(StatusCode::NOT_FOUND, "No inputs stored for this calculator"),
    }
}

fn remember<T: Serialize>(state: &AppState, calculator: Calculator, inputs: &T) {
    match serde_json::to_value(inputs) {
        Ok(value) => state.store.save(calculator, value),
        Err(e) => warn!(?calculator, error = %e, "could not store last inputs"),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    if status.is_client_error() {
        debug!(%status, error = msg, "request rejected");
    }
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
