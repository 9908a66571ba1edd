//! Team handlers.

use actix_web::{web, HttpResponse};
use prassign_core::use_cases::{
    reviews::CascadeReassignForDeactivatedMembersInterface,
    teams::{AddTeamInterface, DeactivateTeamInterface, GetTeamInterface, GetTeamStatsInterface},
};
use prassign_models::Team;
use serde::Deserialize;
use shaku::HasComponent;

use crate::{server::AppContext, Result};

#[derive(Debug, Deserialize)]
pub(crate) struct TeamNameParams {
    team_name: String,
}

#[tracing::instrument(skip_all, fields(team_name = data.team_name))]
pub(crate) async fn team_add(
    ctx: web::Data<AppContext>,
    data: web::Json<Team>,
) -> Result<HttpResponse> {
    let add_team: &dyn AddTeamInterface = ctx.core_module.resolve_ref();
    let team = add_team
        .run(&ctx.as_core_context(), data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "team": team })))
}

#[tracing::instrument(skip_all, fields(team_name = params.team_name))]
pub(crate) async fn team_get(
    ctx: web::Data<AppContext>,
    params: web::Query<TeamNameParams>,
) -> Result<HttpResponse> {
    let get_team: &dyn GetTeamInterface = ctx.core_module.resolve_ref();
    let team = get_team
        .run(&ctx.as_core_context(), &params.team_name)
        .await?;

    Ok(HttpResponse::Ok().json(team))
}

#[tracing::instrument(skip_all, fields(team_name = data.team_name))]
pub(crate) async fn team_deactivate(
    ctx: web::Data<AppContext>,
    data: web::Json<TeamNameParams>,
) -> Result<HttpResponse> {
    let deactivate_team: &dyn DeactivateTeamInterface = ctx.core_module.resolve_ref();
    let team = deactivate_team
        .run(&ctx.as_core_context(), &data.team_name)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "team": team })))
}

#[tracing::instrument(skip_all, fields(team_name = data.team_name))]
pub(crate) async fn team_reassign_inactive(
    ctx: web::Data<AppContext>,
    data: web::Json<TeamNameParams>,
) -> Result<HttpResponse> {
    let cascade: &dyn CascadeReassignForDeactivatedMembersInterface =
        ctx.core_module.resolve_ref();
    let substitutions = cascade
        .run(&ctx.as_core_context(), None, &data.team_name)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "substitutions": substitutions })))
}

#[tracing::instrument(skip_all, fields(team_name = params.team_name))]
pub(crate) async fn team_stats(
    ctx: web::Data<AppContext>,
    params: web::Query<TeamNameParams>,
) -> Result<HttpResponse> {
    let get_team_stats: &dyn GetTeamStatsInterface = ctx.core_module.resolve_ref();
    let stats = get_team_stats
        .run(&ctx.as_core_context(), &params.team_name)
        .await?;

    Ok(HttpResponse::Ok().json(stats))
}
