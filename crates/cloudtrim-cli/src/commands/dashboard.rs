use super::{emit, failure};
use crate::context::AppContext;
use crate::render;
use anyhow::{Result, bail};
use tokio_util::sync::CancellationToken;

/// Summary cards, resources and recommendations in one page.
pub async fn dashboard(ctx: &AppContext, cancel: &CancellationToken) -> Result<()> {
    let load = ctx.dashboard.load_dashboard(cancel).await;
    if load.was_cancelled() {
        bail!("Dashboard load cancelled");
    }
    // Recommendations feed the savings card; a failure shows inline.
    if let Err(err) = ctx.recommendations.load_recommendations(cancel).await
        && err.is_cancelled()
    {
        bail!("Dashboard load cancelled");
    }

    let generated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
    emit(&render::dashboard(&ctx.store.snapshot(), &generated_at))
}

pub async fn costs(ctx: &AppContext, cancel: &CancellationToken, days: Option<u32>) -> Result<()> {
    match days {
        Some(days) => {
            ctx.dashboard
                .load_historical_costs(cancel, days)
                .await
                .map_err(|err| failure("Historical cost load", err))?;
            emit(&render::historical_costs(&ctx.store.snapshot()))
        }
        None => {
            ctx.dashboard
                .load_current_costs(cancel)
                .await
                .map_err(|err| failure("Cost load", err))?;
            emit(&render::current_costs(&ctx.store.snapshot()))
        }
    }
}

pub async fn resources(ctx: &AppContext, cancel: &CancellationToken) -> Result<()> {
    ctx.dashboard
        .load_resources(cancel)
        .await
        .map_err(|err| failure("Resource load", err))?;
    emit(&render::resources(&ctx.store.snapshot()))
}

pub async fn utilization(ctx: &AppContext, cancel: &CancellationToken) -> Result<()> {
    ctx.dashboard
        .load_utilization(cancel)
        .await
        .map_err(|err| failure("Utilization load", err))?;
    emit(&render::utilization(&ctx.store.snapshot()))
}

pub async fn health(ctx: &AppContext, cancel: &CancellationToken) -> Result<()> {
    let status = ctx
        .dashboard
        .health_check(cancel)
        .await
        .map_err(|err| failure("Health check", err))?;
    emit(&render::health(&status))?;
    if !status.is_healthy() {
        bail!("Backend reported status '{}'", status.status);
    }
    Ok(())
}
