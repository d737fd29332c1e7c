//! Terminal views over store snapshots.
//!
//! Every function returns the rendered text; printing is left to the
//! commands so the views stay testable.

use cloudtrim_application::ApplyOutcome;
use cloudtrim_application::demo_fallback::DEMO_DATA_NOTE;
use cloudtrim_core::api::HealthStatus;
use cloudtrim_core::cost::CostSnapshot;
use cloudtrim_core::format::{format_percent, format_trend, format_usd, format_usd_cents};
use cloudtrim_core::recommendation::SavingsForecast;
use cloudtrim_core::resource::{ResourceUtilization, UnderutilizedResource};
use cloudtrim_core::store::{AppState, DataOrigin, FetchLifecycle};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::fmt::Write;

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|title| {
            Cell::new(title)
                .set_alignment(CellAlignment::Center)
                .add_attribute(Attribute::Bold)
        }));
    table
}

fn money(amount: f64) -> Cell {
    Cell::new(format_usd_cents(amount)).set_alignment(CellAlignment::Right)
}

fn status_cell(status: &str) -> Cell {
    let color = match status.to_ascii_lowercase().as_str() {
        "running" | "applied" | "healthy" | "ok" => Color::Green,
        "stopped" | "pending" => Color::Yellow,
        "terminated" | "failed" => Color::Red,
        _ => Color::Reset,
    };
    Cell::new(status).fg(color).set_alignment(CellAlignment::Center)
}

fn priority_cell(priority: &str) -> Cell {
    let color = match priority.to_ascii_lowercase().as_str() {
        "high" => Color::Red,
        "medium" => Color::Yellow,
        "low" => Color::Green,
        _ => Color::Reset,
    };
    Cell::new(priority).fg(color).set_alignment(CellAlignment::Center)
}

/// Appends the error of a rejected operation, if it has one.
fn error_line(out: &mut String, label: &str, lifecycle: &FetchLifecycle) {
    if let Some(error) = &lifecycle.error {
        let _ = writeln!(out, "  ! {label}: {error}");
    }
}

/// Month-over-month change with a rising/falling marker.
fn trend(trend_percentage: f64) -> String {
    let marker = if trend_percentage > 0.0 {
        "▲"
    } else if trend_percentage < 0.0 {
        "▼"
    } else {
        "="
    };
    format!("{marker} {}", format_trend(trend_percentage))
}

/// Summary cards: total cost with trend, resources, savings, CPU.
pub fn summary(state: &AppState) -> String {
    let mut cards = table(&["Total Cost", "Active Resources", "Potential Savings", "CPU Usage"]);

    let cost = match &state.costs.current {
        Some(snapshot) => format!(
            "{}\n{}",
            format_usd(snapshot.total_cost),
            trend(snapshot.trend_percentage)
        ),
        None if state.costs.current_fetch.is_loading() => "loading...".to_string(),
        None => "-".to_string(),
    };
    let totals = state.resources.totals;
    let resources = format!("{} / {}", totals.active_count, totals.total_count);
    let savings = format_usd(state.recommendations.total_potential_savings);
    let cpu = state
        .resources
        .utilization
        .as_ref()
        .map(|u| format_percent(u.cpu_usage))
        .unwrap_or_else(|| "-".to_string());

    cards.add_row(vec![
        Cell::new(cost),
        Cell::new(resources).set_alignment(CellAlignment::Center),
        Cell::new(savings).set_alignment(CellAlignment::Right),
        Cell::new(cpu).set_alignment(CellAlignment::Right),
    ]);

    let mut out = format!("{cards}\n");
    error_line(&mut out, "Costs", &state.costs.current_fetch);
    error_line(&mut out, "Utilization", &state.resources.utilization_fetch);
    out
}

/// Service breakdown and daily series of one cost snapshot.
pub fn costs(title: &str, snapshot: &CostSnapshot) -> String {
    let mut out = format!(
        "{title}: {} ({})\n",
        format_usd(snapshot.total_cost),
        trend(snapshot.trend_percentage)
    );

    if !snapshot.service_costs.is_empty() {
        let mut services = table(&["Service", "Cost", "Share"]);
        let total = snapshot.service_total();
        for service in &snapshot.service_costs {
            let share = if total > 0.0 {
                format_percent(service.cost / total * 100.0)
            } else {
                "-".to_string()
            };
            services.add_row(vec![
                Cell::new(&service.service),
                money(service.cost),
                Cell::new(share).set_alignment(CellAlignment::Right),
            ]);
        }
        let _ = writeln!(out, "{services}");
    }

    if !snapshot.daily_costs.is_empty() {
        let mut daily = table(&["Date", "Cost"]);
        for day in &snapshot.daily_costs {
            daily.add_row(vec![Cell::new(&day.date), money(day.cost)]);
        }
        let _ = writeln!(out, "{daily}");
    }
    out
}

pub fn current_costs(state: &AppState) -> String {
    let mut out = match &state.costs.current {
        Some(snapshot) => costs("Current month", snapshot),
        None => "No cost data.\n".to_string(),
    };
    error_line(&mut out, "Costs", &state.costs.current_fetch);
    if state.costs.current_origin == DataOrigin::Fallback {
        let _ = writeln!(out, "{DEMO_DATA_NOTE}");
    }
    out
}

pub fn historical_costs(state: &AppState) -> String {
    let mut out = match &state.costs.historical {
        Some(historical) => costs(
            &format!("Last {} days", historical.days),
            &historical.snapshot,
        ),
        None => "No historical cost data.\n".to_string(),
    };
    error_line(&mut out, "Historical costs", &state.costs.historical_fetch);
    out
}

pub fn resources(state: &AppState) -> String {
    let resources = &state.resources;
    let mut out = String::new();

    if resources.items.is_empty() {
        out.push_str("No resources.\n");
    } else {
        let mut rows = table(&["ID", "Name", "Type", "Region", "Status", "Cost", "Utilization"]);
        for record in &resources.items {
            rows.add_row(vec![
                Cell::new(&record.id),
                Cell::new(&record.name),
                Cell::new(&record.resource_type),
                Cell::new(&record.region),
                status_cell(&record.status),
                money(record.cost),
                Cell::new(format_percent(record.utilization_percent))
                    .set_alignment(CellAlignment::Right),
            ]);
        }
        let _ = writeln!(out, "{rows}");
        let _ = writeln!(
            out,
            "{} resources, {} running, {} per month",
            resources.totals.total_count,
            resources.totals.active_count,
            format_usd_cents(resources.totals.total_cost)
        );
    }

    error_line(&mut out, "Resources", &resources.list_fetch);
    if resources.origin == DataOrigin::Fallback {
        let _ = writeln!(out, "{DEMO_DATA_NOTE}");
    }
    out
}

pub fn utilization(state: &AppState) -> String {
    let mut out = match &state.resources.utilization {
        Some(utilization) => utilization_table(utilization),
        None => "No utilization data.\n".to_string(),
    };
    error_line(&mut out, "Utilization", &state.resources.utilization_fetch);
    out
}

fn utilization_table(utilization: &ResourceUtilization) -> String {
    let mut rows = table(&["Metric", "Used", "Total", "Usage"]);
    rows.add_row(vec![
        Cell::new("CPU"),
        Cell::new("-"),
        Cell::new("-"),
        Cell::new(format_percent(utilization.cpu_usage)).set_alignment(CellAlignment::Right),
    ]);
    rows.add_row(vec![
        Cell::new("Memory"),
        Cell::new(utilization.memory_usage).set_alignment(CellAlignment::Right),
        Cell::new(utilization.total_memory).set_alignment(CellAlignment::Right),
        Cell::new(format_percent(utilization.memory_percent())).set_alignment(CellAlignment::Right),
    ]);
    rows.add_row(vec![
        Cell::new("Storage"),
        Cell::new(utilization.storage_usage).set_alignment(CellAlignment::Right),
        Cell::new(utilization.total_storage).set_alignment(CellAlignment::Right),
        Cell::new(format_percent(utilization.storage_percent()))
            .set_alignment(CellAlignment::Right),
    ]);
    format!("{rows}\n")
}

pub fn recommendations(state: &AppState) -> String {
    let recs = &state.recommendations;
    let mut out = String::new();

    if recs.items.is_empty() {
        out.push_str("No recommendations.\n");
    } else {
        let mut rows = table(&[
            "ID",
            "Resource",
            "Type",
            "Current",
            "Recommended",
            "Savings",
            "Priority",
            "Status",
        ]);
        for rec in &recs.items {
            rows.add_row(vec![
                Cell::new(&rec.id),
                Cell::new(&rec.resource_id),
                Cell::new(&rec.resource_type),
                Cell::new(&rec.current_config),
                Cell::new(&rec.recommended_config),
                money(rec.potential_savings),
                priority_cell(&rec.priority),
                status_cell(&rec.status),
            ]);
        }
        let _ = writeln!(out, "{rows}");
        let _ = writeln!(
            out,
            "Total potential savings: {}",
            format_usd(recs.total_potential_savings)
        );
    }

    error_line(&mut out, "Recommendations", &recs.list_fetch);
    error_line(&mut out, "Apply", &recs.apply_fetch);
    out
}

pub fn apply_outcome(outcome: &ApplyOutcome) -> String {
    match outcome {
        ApplyOutcome::Applied(rec) => format!(
            "Applied {} on {}: {} -> {} (status {})\n",
            rec.id, rec.resource_id, rec.current_config, rec.recommended_config, rec.status
        ),
        ApplyOutcome::NotInCollection(rec) => format!(
            "Applied {} (status {}), but it is not in the loaded recommendation list\n",
            rec.id, rec.status
        ),
    }
}

pub fn underutilized(rows: &[UnderutilizedResource]) -> String {
    if rows.is_empty() {
        return "No underutilized resources.\n".to_string();
    }
    let mut table = table(&["Resource", "Type", "Average", "Peak", "Cost / Month", "Last Used"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.resource_id),
            Cell::new(&row.resource_type),
            Cell::new(format_percent(row.average_utilization)).set_alignment(CellAlignment::Right),
            Cell::new(format_percent(row.peak_utilization)).set_alignment(CellAlignment::Right),
            money(row.cost_per_month),
            Cell::new(row.last_used.as_deref().unwrap_or("-")),
        ]);
    }
    format!("{table}\n")
}

pub fn forecast(forecast: &SavingsForecast) -> String {
    let mut out = format!(
        "Potential savings: {} across {} recommendations\n",
        format_usd(forecast.total_potential_savings),
        forecast.recommendations_count
    );
    if !forecast.breakdown_by_service.is_empty() {
        let mut services = table(&["Service", "Savings"]);
        for (service, savings) in &forecast.breakdown_by_service {
            services.add_row(vec![Cell::new(service), money(*savings)]);
        }
        let _ = writeln!(out, "{services}");
    }
    if !forecast.implementation_timeline.is_empty() {
        let mut timeline = table(&["Timeframe", "Savings"]);
        for (period, savings) in &forecast.implementation_timeline {
            timeline.add_row(vec![Cell::new(period), money(*savings)]);
        }
        let _ = writeln!(out, "{timeline}");
    }
    out
}

pub fn health(status: &HealthStatus) -> String {
    match &status.timestamp {
        Some(timestamp) => format!("Backend {} at {}\n", status.status, timestamp),
        None => format!("Backend {}\n", status.status),
    }
}

/// The full dashboard page.
pub fn dashboard(state: &AppState, generated_at: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "CloudTrim Dashboard  ({generated_at})");
    if let Some(user) = state.auth.session.user() {
        let _ = writeln!(out, "{} - {} plan", user.company_name, user.plan);
    }
    out.push('\n');
    out.push_str(&summary(state));
    out.push('\n');
    out.push_str(&resources(state));
    if state.costs.current_origin == DataOrigin::Fallback
        && state.resources.origin != DataOrigin::Fallback
    {
        let _ = writeln!(out, "{DEMO_DATA_NOTE}");
    }
    if !state.recommendations.items.is_empty() || state.recommendations.list_fetch.error.is_some() {
        out.push('\n');
        out.push_str(&recommendations(state));
    }
    out
}
