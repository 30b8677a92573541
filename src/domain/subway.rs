#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: i64,
    pub name: String,
}

/// One edge of a line: `up_station_id` -> `down_station_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub up_station_id: i64,
    pub down_station_id: i64,
    pub distance: i32,
}

impl Section {
    pub fn new(up_station_id: i64, down_station_id: i64, distance: i32) -> Self {
        Self {
            up_station_id,
            down_station_id,
            distance,
        }
    }

    pub fn contains(&self, station_id: i64) -> bool {
        self.up_station_id == station_id || self.down_station_id == station_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub sections: Vec<Section>,
}
