use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use memorybox_core::{model, service::CreateCapsule};

use crate::{
    app_state::SharedState,
    http_error::{ApiResult, ErrorBody, HttpError},
    principal::RequestPrincipal,
    schema::{
        Capsule, CapsuleId, CreateCapsuleRequest, OpenCapsuleRequest, OpenCapsuleResponse,
        UpdateCapsuleRequest,
    },
};

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_capsules).post(create_capsule))
        .route(
            "/:id",
            get(get_capsule).patch(update_capsule).delete(delete_capsule),
        )
        .route("/:id/open", post(open_capsule))
}

fn parse_id(id: String) -> ApiResult<model::CapsuleId> {
    CapsuleId(id).try_into().map_err(HttpError::bad_request)
}

#[utoipa::path(
    post,
    path = "/api/capsules",
    request_body = CreateCapsuleRequest,
    responses(
        (status = 201, body = Capsule),
        (status = 400, body = ErrorBody),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody),
    ),
)]
#[tracing::instrument(skip(app_state, request), fields(principal = %principal.0))]
pub async fn create_capsule(
    State(app_state): State<SharedState>,
    principal: RequestPrincipal,
    Json(request): Json<CreateCapsuleRequest>,
) -> ApiResult<(StatusCode, Json<Capsule>)> {
    let create = CreateCapsule {
        album_id: request.album_id.try_into().map_err(HttpError::bad_request)?,
        unlock_at: request.unlock_at,
        theme: request.theme.into(),
        password_protected: request.password_protected,
        password: request.password,
        reminder_policy: request.reminder_policy.into(),
    };
    let capsule = app_state.capsules.create(&principal.0, create).await?;
    Ok((StatusCode::CREATED, Json((&capsule).into())))
}

#[utoipa::path(
    get,
    path = "/api/capsules",
    responses((status = 200, body = Vec<Capsule>)),
)]
#[tracing::instrument(skip(app_state))]
pub async fn list_capsules(
    State(app_state): State<SharedState>,
    principal: RequestPrincipal,
) -> ApiResult<Json<Vec<Capsule>>> {
    let capsules = app_state.capsules.list_visible(&principal.0).await?;
    Ok(Json(capsules.iter().map(Capsule::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/capsules/{id}",
    params(("id" = String, Path, description = "CapsuleId")),
    responses(
        (status = 200, body = Capsule),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody),
    ),
)]
#[tracing::instrument(skip(app_state))]
pub async fn get_capsule(
    State(app_state): State<SharedState>,
    principal: RequestPrincipal,
    Path(id): Path<String>,
) -> ApiResult<Json<Capsule>> {
    let capsule = app_state.capsules.get(parse_id(id)?, &principal.0).await?;
    Ok(Json((&capsule).into()))
}

#[utoipa::path(
    patch,
    path = "/api/capsules/{id}",
    params(("id" = String, Path, description = "CapsuleId")),
    request_body = UpdateCapsuleRequest,
    responses(
        (status = 200, body = Capsule),
        (status = 400, body = ErrorBody),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 409, body = ErrorBody),
    ),
)]
#[tracing::instrument(skip(app_state, request))]
pub async fn update_capsule(
    State(app_state): State<SharedState>,
    principal: RequestPrincipal,
    Path(id): Path<String>,
    Json(request): Json<UpdateCapsuleRequest>,
) -> ApiResult<Json<Capsule>> {
    let capsule = app_state
        .capsules
        .update(parse_id(id)?, &principal.0, request.into())
        .await?;
    Ok(Json((&capsule).into()))
}

#[utoipa::path(
    delete,
    path = "/api/capsules/{id}",
    params(("id" = String, Path, description = "CapsuleId")),
    responses(
        (status = 204, description = "Capsule deleted"),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody),
    ),
)]
#[tracing::instrument(skip(app_state))]
pub async fn delete_capsule(
    State(app_state): State<SharedState>,
    principal: RequestPrincipal,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    app_state
        .capsules
        .delete(parse_id(id)?, &principal.0)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Asks whether the capsule can be opened now, supplying the password if it has one.
#[utoipa::path(
    post,
    path = "/api/capsules/{id}/open",
    params(("id" = String, Path, description = "CapsuleId")),
    request_body = OpenCapsuleRequest,
    responses(
        (status = 200, body = OpenCapsuleResponse),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody),
    ),
)]
#[tracing::instrument(skip(app_state, request))]
pub async fn open_capsule(
    State(app_state): State<SharedState>,
    principal: RequestPrincipal,
    Path(id): Path<String>,
    request: Option<Json<OpenCapsuleRequest>>,
) -> ApiResult<Json<OpenCapsuleResponse>> {
    let password = request.and_then(|Json(request)| request.password);
    let result = app_state
        .capsules
        .check_access(parse_id(id)?, &principal.0, password)
        .await?;
    Ok(Json(result.into()))
}
