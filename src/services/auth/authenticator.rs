/*
 * Responsibility
 * - email / password → SecurityContext
 * - form login, token login, Basic strategy の共通入口
 * - 「email が無い」と「password 違い」は外から区別できないようにする
 */
use std::sync::Arc;

use tracing::debug;

use crate::services::auth::{
    AuthError, PasswordEncoder, SecurityContext, user_details::UserDetailsService,
};

#[derive(Clone)]
pub struct AuthenticationManager {
    users: Arc<dyn UserDetailsService>,
    encoder: PasswordEncoder,
}

impl std::fmt::Debug for AuthenticationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationManager")
            .field("encoder", &self.encoder)
            .finish_non_exhaustive()
    }
}

impl AuthenticationManager {
    pub fn new(users: Arc<dyn UserDetailsService>, encoder: PasswordEncoder) -> Self {
        Self { users, encoder }
    }

    /// Returns `AuthError::InvalidCredentials` for both an unknown email and a wrong
    /// password. Other errors are infrastructure failures.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SecurityContext, AuthError> {
        let user = match self.users.load_user_by_username(email).await {
            Ok(user) => user,
            Err(AuthError::UserNotFound) => {
                self.encoder.burn(password).await?;
                debug!("authentication failed: unknown principal");
                return Err(AuthError::InvalidCredentials);
            }
            Err(err) => return Err(err),
        };

        if !user.check_password(&self.encoder, password).await? {
            debug!("authentication failed: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user.to_security_context())
    }
}
