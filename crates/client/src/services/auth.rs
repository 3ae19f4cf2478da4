use timemesh_core::models::user::{LoginRequest, RegisterRequest, RegisterResponse, TokenPair, User};

use crate::{
    api::{ApiClient, REGISTER_PATH, TOKEN_PATH},
    errors::{ClientResult, RegisterFailure},
};

/// Signs in with a username (or email) and password, storing tokens and the profile.
pub async fn login(api: &ApiClient, username: &str, password: &str) -> ClientResult<User> {
    let request = LoginRequest {
        username: username.trim().to_string(),
        password: password.to_string(),
    };
    let tokens: TokenPair = api.post(TOKEN_PATH, &request).await?;
    api.session().set_tokens(&tokens)?;

    let user = me(api).await?;
    tracing::info!("Signed in as {}", user.username);
    Ok(user)
}

/// Creates an account. Failures are classified for the sign-up form.
pub async fn register(api: &ApiClient, request: &RegisterRequest) -> Result<RegisterResponse, RegisterFailure> {
    api.post(REGISTER_PATH, request).await.map_err(|e| {
        tracing::info!("Registration failed: {}", e);
        RegisterFailure::classify(&e)
    })
}

/// Fetches the signed-in user's profile and caches it in the session.
pub async fn me(api: &ApiClient) -> ClientResult<User> {
    let user: User = api.get("/api/users/me/").await?;
    api.session().set_user(&user)?;
    Ok(user)
}

pub fn logout(api: &ApiClient) -> ClientResult<()> {
    api.session().clear_credentials()?;
    tracing::info!("Signed out");
    Ok(())
}
