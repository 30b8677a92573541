/*
 * Responsibility
 * - 永続化や HTTP に依存しない entity / value 型
 * - 不変条件 (roles は空にならない、など) はここで守る
 */
pub mod favorite;
pub mod member;
pub mod subway;

pub use favorite::Favorite;
pub use member::{LoginMember, Member, NewMember, RoleType};
pub use subway::{Line, Section, Station};
