/*!
 * Handler 向け extractor
 *
 * - AuthMember: 認証必須 (SecurityContext が無ければ 401)
 * - OptionalAuthMember: 匿名も許す
 */
mod auth_member;

pub use auth_member::{AuthMember, OptionalAuthMember};
