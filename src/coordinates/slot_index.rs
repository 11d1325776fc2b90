//! Slot ordering and indexing.
//!
//! # Algorithm
//! 1. Pick one ordering basis for the whole slot set:
//!    wall-clock start if every slot has one, else explicit order if every
//!    slot has one, else identifier.
//! 2. Sort by the basis key, ties broken by identifier.
//! 3. Number the sorted slots 0..n.
//!
//! Never fails. The identifier basis always yields a valid, reproducible
//! order even when it carries no chronological meaning.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::models::TimeSlot;

/// Key used to order slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderingBasis {
    /// Wall-clock `start` ascending.
    WallClock,
    /// Explicit `order` ascending.
    ExplicitOrder,
    /// Identifier, lexical. Degraded: may not be chronological.
    Identifier,
}

/// Total order over a request's slots and the id → index mapping.
#[derive(Debug, Clone)]
pub struct SlotIndex {
    basis: OrderingBasis,
    slots: Vec<TimeSlot>,
    index: HashMap<String, usize>,
}

impl SlotIndex {
    /// Orders the given slots.
    ///
    /// Duplicate ids keep their first occurrence.
    pub fn build(slots: &[TimeSlot]) -> Self {
        let mut unique: Vec<TimeSlot> = Vec::with_capacity(slots.len());
        let mut seen: HashSet<&str> = HashSet::with_capacity(slots.len());
        for slot in slots {
            if seen.insert(slot.id.as_str()) {
                unique.push(slot.clone());
            }
        }

        let basis = choose_basis(&unique);
        match basis {
            OrderingBasis::WallClock => {
                unique.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)))
            }
            OrderingBasis::ExplicitOrder => {
                unique.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)))
            }
            OrderingBasis::Identifier => unique.sort_by(|a, b| a.id.cmp(&b.id)),
        }

        let index = unique
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();

        Self {
            basis,
            slots: unique,
            index,
        }
    }

    /// The basis that determined the order.
    pub fn basis(&self) -> OrderingBasis {
        self.basis
    }

    /// Whether the order fell back to identifiers for a non-empty slot set.
    pub fn is_ambiguous(&self) -> bool {
        self.basis == OrderingBasis::Identifier && !self.slots.is_empty()
    }

    /// Zero-based position of a slot, `None` if unknown.
    pub fn index_of(&self, slot_id: &str) -> Option<usize> {
        self.index.get(slot_id).copied()
    }

    /// Slot at a position.
    pub fn slot_at(&self, index: usize) -> Option<&TimeSlot> {
        self.slots.get(index)
    }

    /// Looks up a slot by id.
    pub fn slot(&self, slot_id: &str) -> Option<&TimeSlot> {
        self.index_of(slot_id).and_then(|i| self.slot_at(i))
    }

    /// Number of distinct slots.
    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    /// Slot ids in order.
    pub fn ordered_ids(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.id.as_str())
    }
}

fn choose_basis(slots: &[TimeSlot]) -> OrderingBasis {
    if slots.is_empty() {
        return OrderingBasis::Identifier;
    }
    if slots.iter().all(|s| s.start.is_some()) {
        OrderingBasis::WallClock
    } else if slots.iter().all(|s| s.order.is_some()) {
        OrderingBasis::ExplicitOrder
    } else {
        OrderingBasis::Identifier
    }
}
