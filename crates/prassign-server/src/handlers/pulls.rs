//! Pull request handlers.

use actix_web::{web, HttpResponse};
use prassign_core::use_cases::pulls::{
    CreatePullRequestInterface, MergePullRequestInterface, ReassignPullRequestInterface,
};
use serde::Deserialize;
use shaku::HasComponent;

use crate::{server::AppContext, Result};

#[derive(Debug, Deserialize)]
pub(crate) struct CreateJson {
    pull_request_id: String,
    pull_request_name: String,
    author_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MergeJson {
    pull_request_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReassignJson {
    pull_request_id: String,
    old_user_id: String,
}

#[tracing::instrument(skip_all, fields(
    pull_request_id = data.pull_request_id,
    author_id = data.author_id
))]
pub(crate) async fn pull_request_create(
    ctx: web::Data<AppContext>,
    data: web::Json<CreateJson>,
) -> Result<HttpResponse> {
    let create_pull_request: &dyn CreatePullRequestInterface = ctx.core_module.resolve_ref();
    let pull_request = create_pull_request
        .run(
            &ctx.as_core_context(),
            &data.pull_request_id,
            &data.pull_request_name,
            &data.author_id,
        )
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "pr": pull_request })))
}

#[tracing::instrument(skip_all, fields(pull_request_id = data.pull_request_id))]
pub(crate) async fn pull_request_merge(
    ctx: web::Data<AppContext>,
    data: web::Json<MergeJson>,
) -> Result<HttpResponse> {
    let merge_pull_request: &dyn MergePullRequestInterface = ctx.core_module.resolve_ref();
    let pull_request = merge_pull_request
        .run(&ctx.as_core_context(), &data.pull_request_id)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "pr": pull_request })))
}

#[tracing::instrument(skip_all, fields(
    pull_request_id = data.pull_request_id,
    old_user_id = data.old_user_id
))]
pub(crate) async fn pull_request_reassign(
    ctx: web::Data<AppContext>,
    data: web::Json<ReassignJson>,
) -> Result<HttpResponse> {
    let reassign_pull_request: &dyn ReassignPullRequestInterface = ctx.core_module.resolve_ref();
    let reassigned = reassign_pull_request
        .run(&ctx.as_core_context(), &data.pull_request_id, &data.old_user_id)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "pr": reassigned.pull_request,
        "replaced_by": reassigned.replaced_by,
    })))
}
