pub mod authenticator;
pub mod context;
pub mod password;
pub mod session;
pub mod strategy;
pub mod token;
pub mod user_details;

use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::cache::CacheError;

pub use authenticator::AuthenticationManager;
pub use context::{SECURITY_CONTEXT_KEY, SecurityContext};
pub use password::{PasswordEncoder, PasswordError};
pub use session::SessionStore;
pub use strategy::{ExtractionStrategy, SecurityContextExtractor};
pub use token::{IssuedToken, JwtTokenProvider, TokenError};
pub use user_details::{LoginMemberService, UserDetails, UserDetailsService};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("session store: {0}")]
    Session(#[from] CacheError),
    #[error("password hashing: {0}")]
    Password(#[from] PasswordError),
    #[error("token signing: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}
