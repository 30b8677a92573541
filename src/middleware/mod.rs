/*
 * Responsibility
 * - middleware の公開インターフェース
 * - 各 module は `apply(router, ...)` で layer を掛ける
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
