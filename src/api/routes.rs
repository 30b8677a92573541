/*
 * Responsibility
 * - URL 構造の定義
 * - 認証必須の範囲 (/members/me, /favorites) にだけ security context middleware を Required で掛ける
 * - /logout は Optional (誰の logout かをログに残すため)
 */
use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::api::handlers::{
    favorites::{create_favorite, delete_favorite, list_favorites},
    health::health,
    lines::{add_section, create_line, delete_line, get_line, list_lines, remove_section, update_line},
    login::{login_form, login_token, logout},
    members::{
        create_member, delete_me, delete_member, get_me, get_member, update_me, update_member,
    },
    paths::find_path,
    stations::{create_station, delete_station, list_stations},
};
use crate::middleware::auth::{self, AuthPolicy};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/members", post(create_member))
        .route(
            "/members/{id}",
            get(get_member).put(update_member).delete(delete_member),
        )
        .route("/login/token", post(login_token))
        .route("/login/form", post(login_form))
        .route("/stations", get(list_stations).post(create_station))
        .route("/stations/{id}", delete(delete_station))
        .route("/lines", get(list_lines).post(create_line))
        .route(
            "/lines/{id}",
            get(get_line).put(update_line).delete(delete_line),
        )
        .route(
            "/lines/{id}/sections",
            post(add_section).delete(remove_section),
        )
        .route("/paths", get(find_path));

    let protected = Router::new()
        .route("/members/me", get(get_me).put(update_me).delete(delete_me))
        .route("/favorites", get(list_favorites).post(create_favorite))
        .route("/favorites/{id}", delete(delete_favorite));
    let protected = auth::apply(protected, state.clone(), AuthPolicy::Required);

    let session = Router::new().route("/logout", post(logout));
    let session = auth::apply(session, state, AuthPolicy::Optional);

    public.merge(protected).merge(session)
}
