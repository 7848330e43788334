//! Pucs and the registry that owns them
//!
//! The registry is a slot arena: each piece lives in a slot addressed by a
//! [`PucId`] (slot index + generation). Freed slots go on a free list and are
//! reused with a bumped generation, so a stale id never aliases a new piece.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Matchable identity of a puc. Two pucs chain only if their species match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Sunny,
    Cool,
    Heart,
    Thinker,
    Wow,
}

impl Species {
    pub const COUNT: usize = 5;
    pub const ALL: [Species; Self::COUNT] = [
        Species::Sunny,
        Species::Cool,
        Species::Heart,
        Species::Thinker,
        Species::Wow,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Stable identity of a puc for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PucId {
    pub index: u32,
    pub generation: u32,
}

/// A matchable game piece
#[derive(Debug, Clone, PartialEq)]
pub struct Puc {
    pub pos: Vec2,
    pub vel: Vec2,
    pub species: Species,
    /// Power level in `[1, max_tier]`
    pub tier: u8,
    /// Part of the active chain
    pub selected: bool,
    /// Seconds left in the removal window; `Some` while removing
    pub removal_timer: Option<f32>,
}

impl Puc {
    pub fn new(pos: Vec2, species: Species, tier: u8) -> Self {
        debug_assert!(tier >= 1, "puc tier must be at least 1");
        Self {
            pos,
            vel: Vec2::ZERO,
            species,
            tier,
            selected: false,
            removal_timer: None,
        }
    }

    /// Removing pucs are invisible to physics and hit-testing
    #[inline]
    pub fn is_removing(&self) -> bool {
        self.removal_timer.is_some()
    }

    /// Start the removal window
    pub fn begin_removal(&mut self, delay: f32) {
        self.selected = false;
        self.removal_timer = Some(delay.max(0.0));
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    puc: Option<Puc>,
}

/// Owns the live puc population
#[derive(Debug, Clone, Default)]
pub struct PucRegistry {
    slots: Vec<Slot>,
    /// Vacant slot indices, reused before the arena grows
    free_list: Vec<u32>,
    count: usize,
}

impl PucRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pucs occupying a slot, removing ones included
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Pucs that take part in physics and hit-testing
    pub fn active_count(&self) -> usize {
        self.iter().filter(|(_, p)| !p.is_removing()).count()
    }

    /// Number of slots ever allocated
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn insert(&mut self, puc: Puc) -> PucId {
        self.count += 1;
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.puc = Some(puc);
            PucId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                puc: Some(puc),
            });
            PucId {
                index,
                generation: 0,
            }
        }
    }

    pub fn remove(&mut self, id: PucId) -> Option<Puc> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let puc = slot.puc.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index);
        self.count -= 1;
        Some(puc)
    }

    pub fn get(&self, id: PucId) -> Option<&Puc> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.puc.as_ref()
    }

    pub fn get_mut(&mut self, id: PucId) -> Option<&mut Puc> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.puc.as_mut()
    }

    /// Mutable access to two distinct pucs at once
    pub fn get_pair_mut(&mut self, a: PucId, b: PucId) -> Option<(&mut Puc, &mut Puc)> {
        if a.index == b.index {
            return None;
        }
        let (ia, ib) = (a.index as usize, b.index as usize);
        if ia.max(ib) >= self.slots.len() {
            return None;
        }

        let (first, second) = if ia < ib {
            let (lo, hi) = self.slots.split_at_mut(ib);
            (&mut lo[ia], &mut hi[0])
        } else {
            let (lo, hi) = self.slots.split_at_mut(ia);
            (&mut hi[0], &mut lo[ib])
        };
        if first.generation != a.generation || second.generation != b.generation {
            return None;
        }
        match (first.puc.as_mut(), second.puc.as_mut()) {
            (Some(pa), Some(pb)) => Some((pa, pb)),
            _ => None,
        }
    }

    /// Occupied slots in slot order
    pub fn iter(&self) -> impl Iterator<Item = (PucId, &Puc)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.puc.as_ref().map(|puc| {
                (
                    PucId {
                        index: i as u32,
                        generation: slot.generation,
                    },
                    puc,
                )
            })
        })
    }

    /// Non-removing pucs in slot order
    pub fn iter_active(&self) -> impl Iterator<Item = (PucId, &Puc)> {
        self.iter().filter(|(_, puc)| !puc.is_removing())
    }

    /// Ids of non-removing pucs in slot order
    pub fn active_ids(&self) -> Vec<PucId> {
        self.iter_active().map(|(id, _)| id).collect()
    }

    /// Count down removal windows and free the pucs whose window elapsed.
    /// Returns how many were dropped.
    pub fn advance_removals(&mut self, dt: f32) -> usize {
        let mut expired = Vec::new();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if let Some(puc) = slot.puc.as_mut()
                && let Some(timer) = puc.removal_timer.as_mut()
            {
                *timer -= dt;
                if *timer <= 0.0 {
                    expired.push(PucId {
                        index: i as u32,
                        generation: slot.generation,
                    });
                }
            }
        }
        for id in &expired {
            self.remove(*id);
        }
        expired.len()
    }
}
