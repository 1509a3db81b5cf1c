//! Per-region request generations
//!
//! Each request that will render into a region takes a ticket. Only the
//! newest ticket for a region may render; older responses are dropped.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::render::Region;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub region: Region,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct RegionGenerations {
    counters: [AtomicU64; 4],
}

impl RegionGenerations {
    pub fn begin(&self, region: Region) -> Ticket {
        let generation = self.counters[region.slot()].fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { region, generation }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.counters[ticket.region.slot()].load(Ordering::SeqCst) == ticket.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_supersedes_older() {
        let generations = RegionGenerations::default();
        let first = generations.begin(Region::TrackList);
        assert!(generations.is_current(first));

        let second = generations.begin(Region::TrackList);
        assert!(!generations.is_current(first));
        assert!(generations.is_current(second));
    }

    #[test]
    fn regions_are_independent() {
        let generations = RegionGenerations::default();
        let tracks = generations.begin(Region::TrackList);
        generations.begin(Region::AlbumList);
        assert!(generations.is_current(tracks));
    }
}
