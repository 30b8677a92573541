/*
 * Responsibility
 * - 各 repo trait と backend (Postgres / in-memory) の束ね
 * - AppState には `Repos` だけを持たせる
 */
pub mod error;
pub mod favorite_repo;
pub mod line_repo;
pub mod member_repo;
pub mod memory;
pub mod station_repo;

use std::sync::Arc;

use sqlx::PgPool;

pub use error::{RepoError, RepoResult};
pub use favorite_repo::FavoriteRepo;
pub use line_repo::LineRepo;
pub use member_repo::MemberRepo;
pub use memory::MemoryStore;
pub use station_repo::StationRepo;

#[derive(Clone)]
pub struct Repos {
    pub members: Arc<dyn MemberRepo>,
    pub stations: Arc<dyn StationRepo>,
    pub lines: Arc<dyn LineRepo>,
    pub favorites: Arc<dyn FavoriteRepo>,
}

impl Repos {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            members: Arc::new(member_repo::PgMemberRepo::new(pool.clone())),
            stations: Arc::new(station_repo::PgStationRepo::new(pool.clone())),
            lines: Arc::new(line_repo::PgLineRepo::new(pool.clone())),
            favorites: Arc::new(favorite_repo::PgFavoriteRepo::new(pool)),
        }
    }

    pub fn memory() -> Self {
        let store = MemoryStore::new();
        Self {
            members: Arc::new(store.clone()),
            stations: Arc::new(store.clone()),
            lines: Arc::new(store.clone()),
            favorites: Arc::new(store),
        }
    }
}

impl std::fmt::Debug for Repos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repos").finish_non_exhaustive()
    }
}
