//! User handlers.

use actix_web::{web, HttpResponse};
use prassign_core::use_cases::users::{ListUserReviewsInterface, SetUserIsActiveInterface};
use prassign_models::{PullRequest, PullRequestStatus};
use serde::{Deserialize, Serialize};
use shaku::HasComponent;

use crate::{server::AppContext, Result};

#[derive(Debug, Deserialize)]
pub(crate) struct SetIsActiveJson {
    user_id: String,
    is_active: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserIdParams {
    user_id: String,
}

/// Pull request without its reviewers.
#[derive(Debug, Serialize)]
struct PullRequestShort {
    pull_request_id: String,
    pull_request_name: String,
    author_id: String,
    status: PullRequestStatus,
}

impl From<PullRequest> for PullRequestShort {
    fn from(pull_request: PullRequest) -> Self {
        Self {
            pull_request_id: pull_request.id,
            pull_request_name: pull_request.name,
            author_id: pull_request.author_id,
            status: pull_request.status,
        }
    }
}

#[tracing::instrument(skip_all, fields(user_id = data.user_id, is_active = data.is_active))]
pub(crate) async fn users_set_is_active(
    ctx: web::Data<AppContext>,
    data: web::Json<SetIsActiveJson>,
) -> Result<HttpResponse> {
    let set_user_is_active: &dyn SetUserIsActiveInterface = ctx.core_module.resolve_ref();
    let user = set_user_is_active
        .run(&ctx.as_core_context(), &data.user_id, data.is_active)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": user })))
}

#[tracing::instrument(skip_all, fields(user_id = params.user_id))]
pub(crate) async fn users_get_review(
    ctx: web::Data<AppContext>,
    params: web::Query<UserIdParams>,
) -> Result<HttpResponse> {
    let list_user_reviews: &dyn ListUserReviewsInterface = ctx.core_module.resolve_ref();
    let pull_requests: Vec<PullRequestShort> = list_user_reviews
        .run(&ctx.as_core_context(), &params.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user_id": params.user_id,
        "pull_requests": pull_requests,
    })))
}
