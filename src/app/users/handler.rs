//! 用户处理器

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Json, Redirect, Response},
    Form,
};

use super::{
    model::{SearchQuery, User, UserForm},
    service::UserService,
    view,
};
use crate::core::{
    error::{CoreError, PageError},
    response::redirect_to_index,
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
}

impl AppState {
    pub fn new(user_service: UserService) -> Self {
        Self { user_service }
    }
}

/// 首页：用户列表
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let users = state.user_service.list_users().await?;
    Ok(Html(view::index_page(&users)))
}

pub async fn create_form() -> Html<String> {
    Html(view::create_page())
}

pub async fn create_user(
    State(state): State<AppState>,
    Form(form): Form<UserForm>,
) -> Result<Redirect, PageError> {
    state.user_service.create_user(form).await?;
    Ok(redirect_to_index())
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let user = state.user_service.get_user(&id).await?;
    Ok(Html(view::edit_page(&user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<UserForm>,
) -> Result<Redirect, PageError> {
    state.user_service.update_user(&id, form).await?;
    Ok(redirect_to_index())
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    state.user_service.delete_user(&id).await?;
    Ok(redirect_to_index())
}

/// 搜索页，空查询直接回到首页
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, PageError> {
    match state.user_service.search_users(&query.q).await? {
        Some(results) => Ok(Html(view::search_page(&results)).into_response()),
        None => Ok(redirect_to_index().into_response()),
    }
}

/// JSON: 全部用户
pub async fn list_users_api(
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, CoreError> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

/// JSON: 搜索，空查询返回空数组
pub async fn search_users_api(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<User>>, CoreError> {
    let users = state
        .user_service
        .search_users(&query.q)
        .await?
        .map(|results| results.users)
        .unwrap_or_default();
    Ok(Json(users))
}
