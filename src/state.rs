/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - repo / cache backend を受け取り、service 群と認証 strategy を組み立てる
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::repos::Repos;
use crate::services::auth::{
    AuthenticationManager, ExtractionStrategy, JwtTokenProvider, LoginMemberService,
    PasswordEncoder, PasswordError, SecurityContextExtractor, SessionStore,
};
use crate::services::cache::CacheClient;
use crate::services::favorite::FavoriteService;
use crate::services::member::MemberService;
use crate::services::subway::SubwayService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub members: MemberService,
    pub subway: SubwayService,
    pub favorites: FavoriteService,
    pub authenticator: AuthenticationManager,
    pub sessions: SessionStore,
    pub tokens: Arc<JwtTokenProvider>,
    /// session -> basic -> bearer
    pub security: Arc<SecurityContextExtractor>,
    pub session_cookie_secure: bool,
}

impl AppState {
    pub fn new(
        config: &Config,
        repos: Repos,
        cache: Arc<dyn CacheClient>,
    ) -> Result<Self, PasswordError> {
        let encoder = PasswordEncoder::new(config.password_hash_cost)?;

        let authenticator = AuthenticationManager::new(
            Arc::new(LoginMemberService::new(repos.members.clone())),
            encoder.clone(),
        );
        let sessions = SessionStore::new(cache, Duration::from_secs(config.session_ttl_seconds));
        let tokens = Arc::new(JwtTokenProvider::new(
            &config.jwt_secret,
            &config.auth_issuer,
            config.access_token_ttl_seconds,
            config.access_token_leeway_seconds,
        ));

        let security = Arc::new(SecurityContextExtractor::new(vec![
            ExtractionStrategy::Session(sessions.clone()),
            ExtractionStrategy::Basic(authenticator.clone()),
            ExtractionStrategy::Bearer(tokens.clone()),
        ]));

        let subway = SubwayService::new(repos.clone());
        let favorites = FavoriteService::new(
            repos.favorites.clone(),
            repos.stations.clone(),
            subway.clone(),
        );

        Ok(Self {
            members: MemberService::new(repos.members, encoder),
            subway,
            favorites,
            authenticator,
            sessions,
            tokens,
            security,
            session_cookie_secure: config.session_cookie_secure,
        })
    }
}
