//! In-process storage backend.
//!
//! Mirrors the Postgres schema closely enough for local runs and HTTP-level tests:
//! - ids start at 1 per table
//! - member email and line name are unique (-> `RepoError::Conflict`)
//! - deleting a member / station / line cascades like the foreign keys do

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Favorite, Line, Member, NewMember, Section, Station};
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::{FavoriteRepo, LineRepo, MemberRepo, StationRepo};

struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
struct Tables {
    members: Table<Member>,
    stations: Table<Station>,
    lines: Table<Line>,
    favorites: Table<Favorite>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberRepo for MemoryStore {
    async fn create(&self, member: NewMember) -> RepoResult<Member> {
        let mut t = self.inner.write().await;
        if t.members.rows.values().any(|m| m.email() == member.email) {
            return Err(RepoError::Conflict);
        }

        let id = t.members.next_id();
        let stored = Member::from_parts(
            id,
            member.email,
            member.password_hash,
            member.age,
            member.roles,
        );
        t.members.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Member>> {
        Ok(self.inner.read().await.members.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Member>> {
        let t = self.inner.read().await;
        Ok(t.members.rows.values().find(|m| m.email() == email).cloned())
    }

    async fn update(&self, member: &Member) -> RepoResult<bool> {
        let mut t = self.inner.write().await;
        if t
            .members
            .rows
            .values()
            .any(|m| m.id() != member.id() && m.email() == member.email())
        {
            return Err(RepoError::Conflict);
        }

        match t.members.rows.get_mut(&member.id()) {
            Some(stored) => {
                stored.update(member.email(), member.age());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut t = self.inner.write().await;
        let removed = t.members.rows.remove(&id).is_some();
        if removed {
            t.favorites.rows.retain(|_, f| f.member_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl StationRepo for MemoryStore {
    async fn create(&self, name: &str) -> RepoResult<Station> {
        let mut t = self.inner.write().await;
        let id = t.stations.next_id();
        let station = Station {
            id,
            name: name.to_string(),
        };
        t.stations.rows.insert(id, station.clone());
        Ok(station)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Station>> {
        Ok(self.inner.read().await.stations.rows.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> RepoResult<Vec<Station>> {
        let t = self.inner.read().await;
        Ok(t.stations
            .rows
            .values()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn list(&self) -> RepoResult<Vec<Station>> {
        Ok(self.inner.read().await.stations.rows.values().cloned().collect())
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut t = self.inner.write().await;
        let removed = t.stations.rows.remove(&id).is_some();
        if removed {
            t.favorites
                .rows
                .retain(|_, f| f.source_station_id != id && f.target_station_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl LineRepo for MemoryStore {
    async fn create(&self, name: &str, color: &str, first: Section) -> RepoResult<Line> {
        let mut t = self.inner.write().await;
        if t.lines.rows.values().any(|l| l.name == name) {
            return Err(RepoError::Conflict);
        }

        let id = t.lines.next_id();
        let line = Line {
            id,
            name: name.to_string(),
            color: color.to_string(),
            sections: vec![first],
        };
        t.lines.rows.insert(id, line.clone());
        Ok(line)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Line>> {
        Ok(self.inner.read().await.lines.rows.get(&id).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<Line>> {
        Ok(self.inner.read().await.lines.rows.values().cloned().collect())
    }

    async fn update(&self, id: i64, name: &str, color: &str) -> RepoResult<bool> {
        let mut t = self.inner.write().await;
        if t.lines.rows.values().any(|l| l.id != id && l.name == name) {
            return Err(RepoError::Conflict);
        }

        match t.lines.rows.get_mut(&id) {
            Some(line) => {
                line.name = name.to_string();
                line.color = color.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        Ok(self.inner.write().await.lines.rows.remove(&id).is_some())
    }

    async fn save_sections(&self, line_id: i64, sections: &[Section]) -> RepoResult<()> {
        if let Some(line) = self.inner.write().await.lines.rows.get_mut(&line_id) {
            line.sections = sections.to_vec();
        }
        Ok(())
    }

    async fn all_sections(&self) -> RepoResult<Vec<Section>> {
        let t = self.inner.read().await;
        Ok(t.lines
            .rows
            .values()
            .flat_map(|l| l.sections.iter().copied())
            .collect())
    }
}

#[async_trait]
impl FavoriteRepo for MemoryStore {
    async fn create(
        &self,
        member_id: i64,
        source_station_id: i64,
        target_station_id: i64,
    ) -> RepoResult<Favorite> {
        let mut t = self.inner.write().await;
        let id = t.favorites.next_id();
        let favorite = Favorite {
            id,
            member_id,
            source_station_id,
            target_station_id,
        };
        t.favorites.rows.insert(id, favorite);
        Ok(favorite)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Favorite>> {
        Ok(self.inner.read().await.favorites.rows.get(&id).copied())
    }

    async fn list_by_member(&self, member_id: i64) -> RepoResult<Vec<Favorite>> {
        let t = self.inner.read().await;
        Ok(t.favorites
            .rows
            .values()
            .filter(|f| f.is_owned_by(member_id))
            .copied()
            .collect())
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        Ok(self.inner.write().await.favorites.rows.remove(&id).is_some())
    }
}
