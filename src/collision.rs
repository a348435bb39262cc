//! Collision tests.
//!
//! Trash hits are read off the hazard layer instead of being computed from
//! bounding boxes: a fish is hit when any cell of its footprint already holds
//! a trash glyph.  The cost is the fish's width, whatever the amount of trash.
//! This holds because trash is painted into a freshly cleared scene before
//! any fish moves, trash never overlaps other trash, and nothing else shares
//! the fish rows at that point.

use crate::entities::Player;
use crate::scene::HazardLayer;

/// Fish on the same row closer than this many columns bump into each other.
pub const FISH_PROXIMITY: i32 = 9;

/// True when any cell of the `width`-wide footprint at (`x`, `y`) is solid.
pub fn footprint_blocked(layer: &HazardLayer<'_>, x: i32, y: i32, width: i32) -> bool {
    (x..x + width).any(|col| layer.is_solid(col, y))
}

/// Both fish alive, on one row, and too close.
pub fn fish_overlap(a: &Player, b: &Player) -> bool {
    a.is_alive() && b.is_alive() && a.y == b.y && (a.x - b.x).abs() < FISH_PROXIMITY
}

/// Dazes both fish if they bumped into each other.
pub fn hit_fish(players: &mut [Player; 2]) -> bool {
    if !fish_overlap(&players[0], &players[1]) {
        return false;
    }
    log::debug!("fish collided on row {}", players[0].y);
    for player in players.iter_mut() {
        player.daze();
    }
    true
}

/// Dazes `player` if its footprint overlaps trash.
pub fn hit_trash(player: &mut Player, layer: &HazardLayer<'_>, fish_width: i32) -> bool {
    if !footprint_blocked(layer, player.x, player.y, fish_width) {
        return false;
    }
    log::debug!("fish hit trash at ({}, {})", player.x, player.y);
    player.daze();
    true
}
