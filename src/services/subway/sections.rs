//! The section chain of one line.
//!
//! A line is a single path `s1 -> s2 -> ... -> sn`; `Sections` keeps its sections
//! in that up-to-down order and enforces the insert/remove rules.

use std::collections::{HashMap, HashSet};

use crate::domain::Section;
use crate::services::subway::SectionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections(Vec<Section>);

impl Sections {
    /// Accepts sections in any order.
    pub fn new(sections: Vec<Section>) -> Self {
        Self(ordered(sections))
    }

    pub fn as_slice(&self) -> &[Section] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Section> {
        self.0
    }

    /// Station ids from the upper terminal to the lower terminal.
    pub fn station_ids(&self) -> Vec<i64> {
        let mut ids = Vec::with_capacity(self.0.len() + 1);
        if let Some(first) = self.0.first() {
            ids.push(first.up_station_id);
        }
        ids.extend(self.0.iter().map(|s| s.down_station_id));
        ids
    }

    pub fn contains_station(&self, station_id: i64) -> bool {
        self.0.iter().any(|s| s.contains(station_id))
    }

    pub fn add(&mut self, new: Section) -> Result<(), SectionError> {
        if new.up_station_id == new.down_station_id {
            return Err(SectionError::SameStation);
        }
        if new.distance <= 0 {
            return Err(SectionError::InvalidDistance);
        }
        if self.0.is_empty() {
            self.0.push(new);
            return Ok(());
        }

        let has_up = self.contains_station(new.up_station_id);
        let has_down = self.contains_station(new.down_station_id);

        match (has_up, has_down) {
            (true, true) => Err(SectionError::AlreadyRegistered),
            (false, false) => Err(SectionError::NotConnected),
            (true, false) => {
                // up -> new_down -> old_down
                match self
                    .0
                    .iter()
                    .position(|s| s.up_station_id == new.up_station_id)
                {
                    Some(i) => {
                        let old = self.0[i];
                        let rest = shorten(old, new)?;
                        self.0[i] = new;
                        self.0
                            .insert(i + 1, Section::new(new.down_station_id, old.down_station_id, rest));
                    }
                    // up is the lower terminal
                    None => self.0.push(new),
                }
                Ok(())
            }
            (false, true) => {
                // old_up -> new_up -> down
                match self
                    .0
                    .iter()
                    .position(|s| s.down_station_id == new.down_station_id)
                {
                    Some(i) => {
                        let old = self.0[i];
                        let rest = shorten(old, new)?;
                        self.0[i] = Section::new(old.up_station_id, new.up_station_id, rest);
                        self.0.insert(i + 1, new);
                    }
                    // down is the upper terminal
                    None => self.0.insert(0, new),
                }
                Ok(())
            }
        }
    }

    /// Removes a station, joining its neighbours into one section.
    pub fn remove_station(&mut self, station_id: i64) -> Result<(), SectionError> {
        if !self.contains_station(station_id) {
            return Err(SectionError::StationNotOnLine);
        }
        if self.0.len() <= 1 {
            return Err(SectionError::LastSection);
        }

        let upper = self.0.iter().position(|s| s.down_station_id == station_id);
        let lower = self.0.iter().position(|s| s.up_station_id == station_id);

        match (upper, lower) {
            (Some(u), Some(l)) => {
                let distance = self.0[u]
                    .distance
                    .checked_add(self.0[l].distance)
                    .ok_or(SectionError::InvalidDistance)?;
                let merged = Section::new(
                    self.0[u].up_station_id,
                    self.0[l].down_station_id,
                    distance,
                );
                self.0[u] = merged;
                self.0.remove(l);
            }
            (Some(u), None) => {
                self.0.remove(u);
            }
            (None, Some(l)) => {
                self.0.remove(l);
            }
            (None, None) => return Err(SectionError::StationNotOnLine),
        }
        Ok(())
    }
}

// distance left over after `new` takes part of `old`
fn shorten(old: Section, new: Section) -> Result<i32, SectionError> {
    if new.distance >= old.distance {
        return Err(SectionError::InvalidDistance);
    }
    Ok(old.distance - new.distance)
}

fn ordered(sections: Vec<Section>) -> Vec<Section> {
    let downs: HashSet<i64> = sections.iter().map(|s| s.down_station_id).collect();
    let Some(first) = sections
        .iter()
        .find(|s| !downs.contains(&s.up_station_id))
        .copied()
    else {
        return sections;
    };

    let by_up: HashMap<i64, Section> = sections.iter().map(|s| (s.up_station_id, *s)).collect();
    let mut out = Vec::with_capacity(sections.len());
    let mut next = Some(first);
    while let Some(section) = next {
        if out.len() == sections.len() {
            break;
        }
        out.push(section);
        next = by_up.get(&section.down_station_id).copied();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_distance(s: &Sections) -> i32 {
        s.as_slice().iter().map(|s| s.distance).sum()
    }

    // 1 -(10)- 2 -(10)- 3
    fn line() -> Sections {
        Sections::new(vec![Section::new(2, 3, 10), Section::new(1, 2, 10)])
    }

    #[test]
    fn sections_are_ordered_up_to_down() {
        assert_eq!(line().station_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn extending_either_end() {
        let mut s = line();
        s.add(Section::new(3, 4, 5)).unwrap();
        s.add(Section::new(0, 1, 5)).unwrap();
        assert_eq!(s.station_ids(), vec![0, 1, 2, 3, 4]);
        assert_eq!(total_distance(&s), 30);
    }

    #[test]
    fn inserting_between_splits_and_keeps_total_distance() {
        let mut s = line();
        s.add(Section::new(1, 5, 4)).unwrap();
        assert_eq!(s.station_ids(), vec![1, 5, 2, 3]);
        assert_eq!(s.as_slice()[1], Section::new(5, 2, 6));

        s.add(Section::new(6, 3, 3)).unwrap();
        assert_eq!(s.station_ids(), vec![1, 5, 2, 6, 3]);
        assert_eq!(s.as_slice()[2], Section::new(2, 6, 7));
        assert_eq!(total_distance(&s), 20);
    }

    #[test]
    fn split_must_be_strictly_shorter() {
        let mut s = line();
        assert_eq!(
            s.add(Section::new(1, 5, 10)),
            Err(SectionError::InvalidDistance)
        );
        assert_eq!(s, line());
    }

    #[test]
    fn rejects_known_and_unknown_pairs() {
        let mut s = line();
        assert_eq!(
            s.add(Section::new(1, 3, 1)),
            Err(SectionError::AlreadyRegistered)
        );
        assert_eq!(s.add(Section::new(8, 9, 1)), Err(SectionError::NotConnected));
        assert_eq!(s.add(Section::new(3, 3, 1)), Err(SectionError::SameStation));
        assert_eq!(s.add(Section::new(3, 4, 0)), Err(SectionError::InvalidDistance));
    }

    #[test]
    fn removing_a_middle_station_merges_neighbours() {
        let mut s = line();
        s.remove_station(2).unwrap();
        assert_eq!(s.as_slice(), &[Section::new(1, 3, 20)]);
    }

    #[test]
    fn removing_terminals() {
        let mut s = line();
        s.remove_station(1).unwrap();
        assert_eq!(s.station_ids(), vec![2, 3]);

        let mut s = line();
        s.remove_station(3).unwrap();
        assert_eq!(s.station_ids(), vec![1, 2]);
    }

    #[test]
    fn last_section_cannot_be_removed() {
        let mut s = Sections::new(vec![Section::new(1, 2, 10)]);
        assert_eq!(s.remove_station(1), Err(SectionError::LastSection));
        assert_eq!(s.remove_station(9), Err(SectionError::StationNotOnLine));
    }

    #[test]
    fn merging_past_the_distance_range_is_rejected() {
        let mut s = Sections::new(vec![
            Section::new(1, 2, i32::MAX),
            Section::new(2, 3, i32::MAX),
        ]);
        assert_eq!(s.remove_station(2), Err(SectionError::InvalidDistance));
        assert_eq!(s.station_ids(), vec![1, 2, 3]);
    }
}
