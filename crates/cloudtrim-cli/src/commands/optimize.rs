use super::{emit, failure};
use crate::context::AppContext;
use crate::render;
use anyhow::Result;
use tokio_util::sync::CancellationToken;

pub async fn recommendations(ctx: &AppContext, cancel: &CancellationToken) -> Result<()> {
    ctx.recommendations
        .load_recommendations(cancel)
        .await
        .map_err(|err| failure("Recommendation load", err))?;
    emit(&render::recommendations(&ctx.store.snapshot()))
}

/// Loads the list first so the applied entry can be replaced in place.
pub async fn apply(ctx: &AppContext, cancel: &CancellationToken, id: &str) -> Result<()> {
    ctx.recommendations
        .load_recommendations(cancel)
        .await
        .map_err(|err| failure("Recommendation load", err))?;
    let outcome = ctx
        .recommendations
        .apply_recommendation(cancel, id)
        .await
        .map_err(|err| failure("Apply", err))?;

    emit(&render::apply_outcome(&outcome))?;
    emit(&render::recommendations(&ctx.store.snapshot()))
}

pub async fn underutilized(ctx: &AppContext, cancel: &CancellationToken) -> Result<()> {
    let rows = ctx
        .recommendations
        .underutilized_resources(cancel)
        .await
        .map_err(|err| failure("Underutilized resource load", err))?;
    emit(&render::underutilized(&rows))
}

pub async fn forecast(ctx: &AppContext, cancel: &CancellationToken) -> Result<()> {
    let forecast = ctx
        .recommendations
        .savings_forecast(cancel)
        .await
        .map_err(|err| failure("Forecast", err))?;
    emit(&render::forecast(&forecast))
}
