/*
 * Responsibility
 * - 認証系 middleware の入口
 * - security_context: strategy を順に試し、SecurityContext を request extensions に載せる
 */
pub mod security_context;

pub use security_context::{AuthPolicy, apply};
