use crate::domain::user::model::{User, UserLoginReceive, UserRegisterReceive, UserRole, UserSend};
use crate::domain::user::repository::UserRepository;
use crate::domain::validation::ValidationErrors;
use crate::utils::errors::ApiError;
use crate::utils::security::auth::AuthUtils;

const MIN_PASSWORD_LEN: usize = 8;

fn hash(password: &str) -> Result<String, ApiError> {
    AuthUtils::hash_password(password)
        .map_err(|e| ApiError::InternalServerError(format!("password hashing failed: {}", e)))
}

/// Registers an enabled account with the plain `ROLE_USER` role.
pub async fn register(repo: &dyn UserRepository, form: UserRegisterReceive) -> Result<UserSend, ApiError> {
    let username = form.username.trim().to_string();

    let mut errors = ValidationErrors::new();
    if username.is_empty() {
        errors.reject("username", "required", "must not be blank");
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.reject(
            "password",
            "size",
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }
    errors.into_result()?;

    let user = User {
        id: None,
        username,
        password: hash(&form.password)?,
        enabled: true,
        roles: vec![UserRole::User],
    };

    let user = repo.create_user(user).await?;
    tracing::info!(username = %user.username, "user registered");

    Ok(UserSend { username: user.username, roles: user.roles, access_token: None })
}

/// Checks the credentials and issues a signed access token.
pub async fn login(
    repo: &dyn UserRepository,
    credentials: UserLoginReceive,
    secret_key: &str,
    token_minutes: i64,
) -> Result<UserSend, ApiError> {
    let rejected = || ApiError::Unauthorized("Invalid username or password".to_string());

    let user = repo
        .get_user_by_username(credentials.username.trim())
        .await?
        .ok_or_else(rejected)?;

    // A corrupt stored hash is treated like a wrong password.
    let verified = AuthUtils::verify_password(&credentials.password, &user.password).unwrap_or(false);
    if !verified || !user.enabled {
        tracing::warn!(username = %user.username, "rejected login");
        return Err(rejected());
    }

    let token = AuthUtils::generate_access_token(&user.username, &user.roles, secret_key, token_minutes)?;

    Ok(UserSend {
        username: user.username,
        roles: user.roles,
        access_token: Some(token),
    })
}

/// Creates the configured administrator unless the username already exists.
/// Returns whether an account was created.
pub async fn bootstrap_admin(repo: &dyn UserRepository, username: &str, password: &str) -> Result<bool, ApiError> {
    if let Some(existing) = repo.get_user_by_username(username).await? {
        if existing.has_role(UserRole::Admin) {
            tracing::debug!(username, "admin account already present");
        } else {
            tracing::warn!(username, "configured admin username belongs to an account without ROLE_ADMIN; left unchanged");
        }
        return Ok(false);
    }

    let admin = User {
        id: None,
        username: username.to_string(),
        password: hash(password)?,
        enabled: true,
        roles: vec![UserRole::Admin, UserRole::Owner, UserRole::Vet],
    };
    repo.create_user(admin).await?;
    tracing::info!(username, "admin account created");
    Ok(true)
}
