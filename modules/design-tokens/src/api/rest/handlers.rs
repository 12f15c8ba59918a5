use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use serde_json::Value;
use tokens_auth::axum_ext::Authn;

use crate::domain::error::Resource;
use crate::domain::service::{Asset, AssetService, DesignSystemService, UserService};

use super::dto::{
    DataList, DeletedCountDto, HealthDto, MessageData, RemovedDto, SignedInUserDto, UserDto,
};
use super::error::ApiResult;
use super::extract::JsonBody;

pub async fn health() -> Json<HealthDto> {
    Json(HealthDto { status: "ok" })
}

pub async fn signup(
    Extension(svc): Extension<Arc<UserService>>,
    body: Option<JsonBody<Value>>,
) -> ApiResult<(StatusCode, Json<SignedInUserDto>)> {
    let body = JsonBody::or_empty(body);
    let signed = svc.signup(&body).await?;
    Ok((StatusCode::CREATED, Json(signed.into())))
}

pub async fn login(
    Extension(svc): Extension<Arc<UserService>>,
    body: Option<JsonBody<Value>>,
) -> ApiResult<Json<SignedInUserDto>> {
    let body = JsonBody::or_empty(body);
    let signed = svc.login(&body).await?;
    Ok(Json(signed.into()))
}

pub async fn me(
    Authn(ctx): Authn,
    Extension(svc): Extension<Arc<UserService>>,
) -> ApiResult<Json<UserDto>> {
    let user = svc.me(&ctx).await?;
    Ok(Json(user.into()))
}

/// Palettes answer with the bare payload; the other assets wrap it in `{message, data}`.
fn asset_response<P: Serialize>(
    resource: Resource,
    status: StatusCode,
    verb: &str,
    payload: P,
) -> Response {
    match resource {
        Resource::Palette => (status, Json(payload)).into_response(),
        _ => {
            let message = format!("{} {verb} successfully", resource.title());
            (status, Json(MessageData::new(message, payload))).into_response()
        }
    }
}

pub async fn create_asset<T: Asset>(
    Authn(ctx): Authn,
    Extension(svc): Extension<Arc<AssetService<T>>>,
    body: Option<JsonBody<Value>>,
) -> ApiResult<Response> {
    let body = JsonBody::or_empty(body);
    let doc = svc.create(&ctx, &body).await?;
    Ok(asset_response(T::RESOURCE, StatusCode::CREATED, "created", doc))
}

pub async fn get_asset<T: Asset>(
    Authn(ctx): Authn,
    Extension(svc): Extension<Arc<AssetService<T>>>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let doc = svc.get(&ctx, &id).await?;
    Ok(asset_response(T::RESOURCE, StatusCode::OK, "retrieved", doc))
}

pub async fn update_asset<T: Asset>(
    Authn(ctx): Authn,
    Extension(svc): Extension<Arc<AssetService<T>>>,
    Path(id): Path<String>,
    body: Option<JsonBody<Value>>,
) -> ApiResult<Response> {
    let body = JsonBody::or_empty(body);
    let outcome = svc.update(&ctx, &id, &body).await?;
    Ok(asset_response(T::RESOURCE, StatusCode::OK, "updated", outcome))
}

pub async fn delete_asset<T: Asset>(
    Authn(ctx): Authn,
    Extension(svc): Extension<Arc<AssetService<T>>>,
    Path(id): Path<String>,
) -> ApiResult<Json<RemovedDto>> {
    let removed = svc.delete(&ctx, &id).await?;
    Ok(Json(RemovedDto {
        message: format!("{} with id : {removed} successfully removed", T::RESOURCE.title()),
        id: removed,
    }))
}

pub async fn create_design_system(
    Authn(ctx): Authn,
    Extension(svc): Extension<Arc<DesignSystemService>>,
    body: Option<JsonBody<Value>>,
) -> ApiResult<impl IntoResponse> {
    let body = JsonBody::or_empty(body);
    let ds = svc.create(&ctx, &body).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageData::new("Design system created successfully", ds)),
    ))
}

pub async fn get_design_system(
    Authn(ctx): Authn,
    Extension(svc): Extension<Arc<DesignSystemService>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let ds = svc.get(&ctx, &id).await?;
    Ok(Json(MessageData::new("Design system retrieved successfully", ds)))
}

pub async fn list_user_design_systems(
    Authn(ctx): Authn,
    Extension(svc): Extension<Arc<DesignSystemService>>,
    Path(user_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let data = svc.list_by_user(&ctx, &user_id).await?;
    Ok(Json(DataList { data }))
}

pub async fn update_design_system(
    Authn(ctx): Authn,
    Extension(svc): Extension<Arc<DesignSystemService>>,
    Path(id): Path<String>,
    body: Option<JsonBody<Value>>,
) -> ApiResult<impl IntoResponse> {
    let body = JsonBody::or_empty(body);
    let ds = svc.update(&ctx, &id, &body).await?;
    Ok(Json(MessageData::new("Design system updated successfully", ds)))
}

pub async fn delete_design_system(
    Authn(ctx): Authn,
    Extension(svc): Extension<Arc<DesignSystemService>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let outcome = svc.delete(&ctx, &id).await?;
    Ok(Json(MessageData::new(
        "Design system deleted successfully",
        DeletedCountDto::from(outcome),
    )))
}
