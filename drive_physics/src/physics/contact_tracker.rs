use std::collections::VecDeque;

use drive_common::{ObstacleId, Real};

use crate::constants::MAX_CONTACT_EVENTS;

/// One obstacle contact, recorded before the velocity correction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactRecord {
    pub tick: u64,
    pub obstacle: ObstacleId,
    pub impact_speed: Real,
}

/// Bounded log of recent obstacle contacts
#[derive(Debug, Clone)]
pub struct ContactLog {
    records: VecDeque<ContactRecord>,
    capacity: usize,
    total: u64,
    // set once the log starts dropping records, cleared by `clear`
    overflowing: bool,
}

impl Default for ContactLog {
    fn default() -> Self {
        Self::with_capacity(MAX_CONTACT_EVENTS)
    }
}

impl ContactLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
            total: 0,
            overflowing: false,
        }
    }

    /// Append a contact, dropping the oldest one when full
    pub fn record(&mut self, record: ContactRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
            if !self.overflowing {
                log::warn!("Reached maximum contact records ({}), dropping oldest", self.capacity);
                self.overflowing = true;
            }
        }
        self.records.push_back(record);
        self.total += 1;
    }

    /// Recent contacts, oldest first
    pub fn recent(&self) -> impl Iterator<Item = &ContactRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&ContactRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Contacts recorded since the last clear, including dropped ones
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of retained records for a given obstacle
    pub fn hits_for(&self, obstacle: ObstacleId) -> usize {
        self.records.iter().filter(|r| r.obstacle == obstacle).count()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.total = 0;
        self.overflowing = false;
    }
}
