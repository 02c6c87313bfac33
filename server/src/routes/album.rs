use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use memorybox_core::model::{self, Principal};

use crate::{
    app_state::SharedState,
    http_error::{ApiResult, ErrorBody, HttpError},
    principal::RequestPrincipal,
    schema::{Album, AlbumId, CreateAlbumRequest, ShareAlbumRequest, ShareAlbumResponse},
};

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(get_visible_albums).post(create_album))
        .route("/:id/share", post(share_album))
}

#[utoipa::path(
    get,
    path = "/api/albums",
    responses((status = 200, body = Vec<Album>)),
)]
#[tracing::instrument(skip(app_state))]
pub async fn get_visible_albums(
    State(app_state): State<SharedState>,
    principal: RequestPrincipal,
) -> ApiResult<Json<Vec<Album>>> {
    let albums = app_state.albums.list_visible(&principal.0).await?;
    Ok(Json(albums.iter().map(Album::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/albums",
    request_body = CreateAlbumRequest,
    responses(
        (status = 201, body = Album),
        (status = 400, body = ErrorBody),
    ),
)]
#[tracing::instrument(skip(app_state))]
pub async fn create_album(
    State(app_state): State<SharedState>,
    principal: RequestPrincipal,
    Json(request): Json<CreateAlbumRequest>,
) -> ApiResult<(StatusCode, Json<Album>)> {
    request.validate().map_err(HttpError::bad_request)?;
    let album = app_state
        .albums
        .create_album(&principal.0, request.name, request.description)
        .await?;
    Ok((StatusCode::CREATED, Json((&album).into())))
}

/// Adds a collaborator, or upgrades a viewer to editor. Never downgrades.
#[utoipa::path(
    post,
    path = "/api/albums/{id}/share",
    params(("id" = String, Path, description = "AlbumId")),
    request_body = ShareAlbumRequest,
    responses(
        (status = 200, body = ShareAlbumResponse),
        (status = 400, body = ErrorBody),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody),
    ),
)]
#[tracing::instrument(skip(app_state))]
pub async fn share_album(
    State(app_state): State<SharedState>,
    principal: RequestPrincipal,
    Path(id): Path<String>,
    Json(request): Json<ShareAlbumRequest>,
) -> ApiResult<Json<ShareAlbumResponse>> {
    request.validate().map_err(HttpError::bad_request)?;
    let album_id: model::AlbumId = AlbumId(id).try_into().map_err(HttpError::bad_request)?;
    let outcome = app_state
        .albums
        .share(
            album_id,
            &principal.0,
            &Principal::new(request.principal),
            request.permission.into(),
        )
        .await?;
    Ok(Json(outcome.into()))
}
