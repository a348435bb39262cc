//! Ordered pools of scrolling objects.
//!
//! Objects are appended ahead of the camera and evicted from the front once
//! they have scrolled past, so a pool is always sorted by world column without
//! ever being re-sorted.

use std::collections::VecDeque;
use std::ops::Range;

use rand::Rng;

use crate::assets::{AssetKind, GlyphSource};
use crate::camera::Camera;
use crate::entities::{
    Decoration, DecorationKind, GameObject, Hazard, HazardKind, Player, SCENERY_ROW,
};

// ── Spawn / despawn tables ────────────────────────────────────────────────────

/// Columns between consecutive trash objects.
pub const HAZARD_GAP: Range<i32> = 15..45;
/// Rows a trash object's top edge may sit on.
pub const HAZARD_ROWS: Range<i32> = 13..22;
/// Columns between consecutive decorations.
pub const SCENERY_GAP: Range<i32> = 30..45;
/// World columns the first decoration may start at.
pub const SCENERY_FIRST: Range<i32> = 0..15;
/// Decorations are dropped once this far behind the camera.
pub const SCENERY_TRAIL: i32 = 50;

// ── Pool ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct ObjectPool<K> {
    objects: VecDeque<GameObject<K>>,
    capacity: usize,
}

impl<K: Copy> ObjectPool<K> {
    pub fn new(capacity: usize) -> ObjectPool<K> {
        ObjectPool {
            objects: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameObject<K>> {
        self.objects.iter()
    }

    pub fn front(&self) -> Option<&GameObject<K>> {
        self.objects.front()
    }

    pub fn back(&self) -> Option<&GameObject<K>> {
        self.objects.back()
    }

    /// Strictly ascending by world column.
    pub fn is_sorted(&self) -> bool {
        self.objects
            .iter()
            .zip(self.objects.iter().skip(1))
            .all(|(a, b)| a.x < b.x)
    }

    /// Appends behind the current last object.
    pub fn push(&mut self, object: GameObject<K>) {
        debug_assert!(self.objects.len() < self.capacity, "pool over capacity");
        debug_assert!(
            self.objects.back().map_or(true, |last| last.x < object.x),
            "pool would become unsorted"
        );
        self.objects.push_back(object);
    }

    /// Fills the pool up to capacity.  `next` receives the current last
    /// object, if any, and returns the one to append after it.
    pub fn spawn(&mut self, mut next: impl FnMut(Option<&GameObject<K>>) -> GameObject<K>) -> usize {
        let mut spawned = 0;
        while self.objects.len() < self.capacity {
            let object = next(self.objects.back());
            self.push(object);
            spawned += 1;
        }
        spawned
    }

    /// Pops from the front while `eligible` holds and returns how many went.
    /// Stops at the first object that stays.
    pub fn evict_while(&mut self, mut eligible: impl FnMut(&GameObject<K>) -> bool) -> usize {
        let mut evicted = 0;
        while let Some(front) = self.objects.front() {
            if !eligible(front) {
                break;
            }
            self.objects.pop_front();
            evicted += 1;
        }
        evicted
    }
}

// ── Trash ─────────────────────────────────────────────────────────────────────

/// The first piece of trash enters at the right screen edge; the rest follow
/// at random gaps.
pub fn spawn_hazards(
    pool: &mut ObjectPool<HazardKind>,
    camera: &Camera,
    screen_width: i32,
    rng: &mut impl Rng,
) -> usize {
    pool.spawn(|last| {
        let x = match last {
            Some(last) => last.x + rng.gen_range(HAZARD_GAP),
            None => camera.to_world_x(screen_width),
        };
        Hazard {
            x,
            y: rng.gen_range(HAZARD_ROWS),
            kind: HazardKind::ALL[rng.gen_range(0..HazardKind::ALL.len())],
        }
    })
}

/// Drops trash whose right edge has passed the shark's mouth and credits
/// every living fish one evaded piece per drop.
pub fn despawn_hazards(
    pool: &mut ObjectPool<HazardKind>,
    camera: &Camera,
    assets: &impl GlyphSource,
    players: &mut [Player; 2],
) -> usize {
    let threshold = camera.to_world_x(assets.shark_width());
    let evicted =
        pool.evict_while(|hazard| hazard.x + assets.width_of(AssetKind::Hazard(hazard.kind)) < threshold);
    for _ in 0..evicted {
        for player in players.iter_mut() {
            player.credit_evaded();
        }
    }
    if evicted > 0 {
        log::debug!(
            "{} trash evaded at offset {}, scores {}/{}",
            evicted,
            camera.offset(),
            players[0].trash_evaded,
            players[1].trash_evaded
        );
    }
    evicted
}

// ── Scenery ───────────────────────────────────────────────────────────────────

pub fn spawn_decorations(pool: &mut ObjectPool<DecorationKind>, rng: &mut impl Rng) -> usize {
    pool.spawn(|last| {
        let x = match last {
            Some(last) => last.x + rng.gen_range(SCENERY_GAP),
            None => rng.gen_range(SCENERY_FIRST),
        };
        Decoration {
            x,
            y: SCENERY_ROW,
            kind: DecorationKind::ALL[rng.gen_range(0..DecorationKind::ALL.len())],
        }
    })
}

pub fn despawn_decorations(pool: &mut ObjectPool<DecorationKind>, camera: &Camera) -> usize {
    let threshold = camera.offset() - SCENERY_TRAIL;
    pool.evict_while(|decoration| decoration.x < threshold)
}
