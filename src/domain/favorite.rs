/// A member-owned pair of stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Favorite {
    pub id: i64,
    pub member_id: i64,
    pub source_station_id: i64,
    pub target_station_id: i64,
}

impl Favorite {
    pub fn is_owned_by(&self, member_id: i64) -> bool {
        self.member_id == member_id
    }
}
