//! Account handlers under `/user`.

use actix_web::{HttpResponse, web};

use blog_core::DomainError;
use blog_core::services::NewAccount;
use blog_shared::MessageResponse;
use blog_shared::dto::{
    ResetPasswordRequest, SetNewPasswordRequest, SigninRequest, SignupRequest, SigninResponse,
    TokenRequest,
};

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 6;

fn validate_email(email: &str) -> AppResult<()> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    Ok(())
}

fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Activation and reset links arrive without a token when the client is broken.
fn require_token(token: Option<String>) -> AppResult<String> {
    token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Error happening please try again".to_string()))
}

/// POST /user/signup
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username is required".to_string()));
    }
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let email = req.email.clone();
    state
        .accounts
        .signup(NewAccount {
            username: req.username,
            email: req.email,
            gender: req.gender,
            password: req.password,
        })
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Email has been sent to {}. Please check your email to activate your account",
        email
    ))))
}

/// POST /user/activation
pub async fn activation(
    state: web::Data<AppState>,
    body: web::Json<TokenRequest>,
) -> AppResult<HttpResponse> {
    let token = require_token(body.into_inner().token)?;

    state.accounts.activate(&token).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Account create successful")))
}

/// POST /user/signin
pub async fn signin(
    state: web::Data<AppState>,
    body: web::Json<SigninRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate_email(&req.email)?;
    if req.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }

    let signed_in = state.accounts.signin(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(SigninResponse {
        correct_user: views::user(signed_in.user),
        token: signed_in.token,
        success: "Login Successful".to_string(),
    }))
}

/// GET /user/get/data
pub async fn current_user(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let user = state.accounts.current_user(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(views::user(user)))
}

/// GET /user/get/all-users
pub async fn all_users(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.accounts.all_users().await?;
    let body: Vec<_> = users.into_iter().map(views::user).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /user/signout
///
/// Sessions are bearer tokens held by the client; there is nothing to revoke.
pub async fn signout() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::new("Signout successful"))
}

/// POST /user/reset-password
pub async fn reset_password(
    state: web::Data<AppState>,
    body: web::Json<ResetPasswordRequest>,
) -> AppResult<HttpResponse> {
    let email = body.into_inner().email;
    validate_email(&email)?;

    match state.accounts.request_password_reset(&email).await {
        Ok(()) => {}
        Err(DomainError::NotFound(msg)) => return Err(AppError::BadRequest(msg)),
        Err(e) => return Err(e.into()),
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Email has been sent to {}. Please check your email to reset password your account",
        email
    ))))
}

/// POST /user/set/new-password
pub async fn set_new_password(
    state: web::Data<AppState>,
    body: web::Json<SetNewPasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let token = require_token(req.token)?;
    validate_password(&req.password)?;

    state.accounts.set_new_password(&token, &req.password).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password successfully updated")))
}
