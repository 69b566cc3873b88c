//! Auth handlers: sign-up, OTP sign-in and verification, password sign-in,
//! logout, me.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::dto::request::{PasswordSignInRequest, SignInRequest, SignUpRequest, VerifyRequest};
use crate::dto::response::{
    AccountIdResponse, ApiResponse, MessageResponse, SessionResponse, UserResponse,
};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::extractors::session::{clear_session_cookie, session_cookie, session_secret};
use crate::state::AppState;

/// POST /api/auth/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> ApiResult<Json<ApiResponse<AccountIdResponse>>> {
    req.validate()?;
    let account_id = state.user_service.sign_up(&req.full_name, &req.email).await?;
    Ok(Json(ApiResponse::ok(AccountIdResponse { account_id })))
}

/// POST /api/auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> ApiResult<Json<ApiResponse<AccountIdResponse>>> {
    req.validate()?;
    let account_id = state.user_service.sign_in(&req.email).await?;
    Ok(Json(ApiResponse::ok(AccountIdResponse { account_id })))
}

/// POST /api/auth/verify
pub async fn verify(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<VerifyRequest>,
) -> ApiResult<(CookieJar, Json<ApiResponse<SessionResponse>>)> {
    req.validate()?;
    let session = state.user_service.verify(&req.account_id, &req.code).await?;
    let jar = jar.add(session_cookie(&state.config.session, session.secret));
    Ok((
        jar,
        Json(ApiResponse::ok(SessionResponse {
            session_id: session.id,
        })),
    ))
}

/// POST /api/auth/password
pub async fn password(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<PasswordSignInRequest>,
) -> ApiResult<(CookieJar, Json<ApiResponse<SessionResponse>>)> {
    req.validate()?;
    let session = state
        .user_service
        .sign_in_with_password(&req.email, &req.password)
        .await?;
    let jar = jar.add(session_cookie(&state.config.session, session.secret));
    Ok((
        jar,
        Json(ApiResponse::ok(SessionResponse {
            session_id: session.id,
        })),
    ))
}

/// POST /api/auth/logout
///
/// Always clears the cookie; a request without a session is a no-op.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<ApiResponse<MessageResponse>>)> {
    if let Some(secret) = session_secret(&jar, &state.config.session) {
        let user = state
            .session_resolver
            .resolve_current_user(Some(secret.as_str()))
            .await;
        state.user_service.sign_out(&secret, user.as_ref()).await?;
    }

    Ok((
        clear_session_cookie(jar, &state.config.session),
        Json(ApiResponse::ok(MessageResponse {
            message: "Signed out".to_string(),
        })),
    ))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::ok(UserResponse::from(auth.0.user)))
}
