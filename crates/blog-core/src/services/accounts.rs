//! Account lifecycle: signup by emailed activation link, sign-in and
//! password reset.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{PendingAccount, User};
use crate::error::DomainError;
use crate::ports::{AuthError, Email, Mailer, PasswordService, TokenService, UserRepository};

/// Where emailed links point and who sends them.
#[derive(Debug, Clone)]
pub struct AccountLinks {
    /// Base URL of the web client, without trailing slash.
    pub client_url: String,
    pub email_from: String,
}

/// Signup form, already validated for shape by the caller.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub gender: String,
    pub password: String,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: User,
    pub token: String,
}

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
    mailer: Arc<dyn Mailer>,
    links: AccountLinks,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
        mailer: Arc<dyn Mailer>,
        links: AccountLinks,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
            mailer,
            links,
        }
    }

    /// Start a registration: nothing is stored until the emailed activation
    /// link is used.
    pub async fn signup(&self, account: NewAccount) -> Result<(), DomainError> {
        if self.users.find_by_email(&account.email).await?.is_some() {
            return Err(DomainError::Duplicate("Email already registered".to_string()));
        }

        let password_hash = self
            .passwords
            .hash(&account.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let pending = PendingAccount {
            username: account.username,
            email: account.email,
            gender: account.gender,
            password_hash,
        };
        let token = self
            .tokens
            .issue_activation(&pending)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        self.mailer
            .send(self.activation_email(&pending.email, &token))
            .await?;

        tracing::info!("Activation email sent");
        Ok(())
    }

    /// Turn a valid activation token into a stored account.
    pub async fn activate(&self, token: &str) -> Result<User, DomainError> {
        let pending = self
            .tokens
            .verify_activation(token)
            .map_err(link_error)?;

        let user = self.users.insert(User::from(pending)).await?;
        tracing::info!(user_id = %user.id, "Account activated");
        Ok(user)
    }

    /// Check credentials and issue a session token.
    pub async fn signin(&self, email: &str, password: &str) -> Result<SignedIn, DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue_session(&user)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(SignedIn { user, token })
    }

    pub async fn current_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found.".to_string()))
    }

    pub async fn all_users(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.list().await?)
    }

    /// Email a password reset link to an existing account.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), DomainError> {
        if self.users.find_by_email(email).await?.is_none() {
            return Err(DomainError::NotFound("User not found.".to_string()));
        }

        let token = self
            .tokens
            .issue_password_reset(email)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        self.mailer.send(self.reset_email(email, &token)).await?;
        tracing::info!("Password reset email sent");
        Ok(())
    }

    /// Store a new password for the account a reset token was issued to.
    pub async fn set_new_password(&self, token: &str, password: &str) -> Result<(), DomainError> {
        let email = self
            .tokens
            .verify_password_reset(token)
            .map_err(link_error)?;

        let password_hash = self
            .passwords
            .hash(password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if !self.users.update_password(&email, &password_hash).await? {
            return Err(DomainError::NotFound("User not found.".to_string()));
        }
        Ok(())
    }

    fn activation_email(&self, to: &str, token: &str) -> Email {
        Email {
            from: self.links.email_from.clone(),
            to: to.to_string(),
            subject: "Account activation link".to_string(),
            html: format!(
                r#"<h1>Welcome to MY BLOG.</h1>
<h2>Please use the following link to activate your account</h2>
<a target="_blank" href="{}/account/activate/{}">Click Here To Activate Your Account.</a>
<hr />
<p>This email may contain sensitive information</p>"#,
                self.links.client_url, token
            ),
        }
    }

    fn reset_email(&self, to: &str, token: &str) -> Email {
        Email {
            from: self.links.email_from.clone(),
            to: to.to_string(),
            subject: "Password reset link".to_string(),
            html: format!(
                r#"<h1>Welcome to MY BLOG.</h1>
<h2>Please use the following link to reset your password</h2>
<a target="_blank" href="{}/set/new/password/{}">Click Here To Reset Your Password.</a>
<hr />
<p>This email may contain sensitive information</p>"#,
                self.links.client_url, token
            ),
        }
    }
}

fn link_error(err: AuthError) -> DomainError {
    match err {
        AuthError::TokenExpired | AuthError::InvalidToken(_) => DomainError::LinkExpired,
        other => DomainError::Internal(other.to_string()),
    }
}
