//! Fish movement and the free / dazed / dead state machine.

use crate::assets::GlyphSource;
use crate::collision::{hit_fish, hit_trash};
use crate::entities::{
    FishStatus, InputSymbol, Player, PlayerId, DAZED_TICKS, PLAYFIELD_BOTTOM, PLAYFIELD_TOP,
    SCREEN_WIDTH,
};
use crate::scene::HazardLayer;

/// Screen-space limits the fish are held to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub screen_width: i32,
    /// Fish left of this column are inside the shark.
    pub shark_width: i32,
    pub fish_width: i32,
}

impl Bounds {
    pub fn from_assets(assets: &impl GlyphSource) -> Bounds {
        Bounds {
            screen_width: SCREEN_WIDTH,
            shark_width: assets.shark_width(),
            fish_width: assets.fish_width(),
        }
    }
}

/// Applies this tick's keystroke.  Player one goes first, so player two's
/// fish test sees player one's new position.
///
/// A free fish without a request still runs both collision tests: trash
/// scrolls into fish that hold still.
pub fn move_fish(
    players: &mut [Player; 2],
    layer: &HazardLayer<'_>,
    input: Option<InputSymbol>,
    fish_width: i32,
) {
    for id in PlayerId::ALL {
        let i = id.index();
        if !players[i].is_free() {
            continue;
        }
        match input.filter(|symbol| symbol.player == id) {
            Some(symbol) => {
                let (dx, dy) = symbol.direction.delta();
                let (x, y) = (players[i].x, players[i].y);
                players[i].x += dx;
                players[i].y += dy;
                if hit_fish(players) || hit_trash(&mut players[i], layer, fish_width) {
                    players[i].x = x;
                    players[i].y = y;
                }
            }
            None => {
                hit_fish(players);
                hit_trash(&mut players[i], layer, fish_width);
            }
        }
    }
}

/// End-of-move status update: the shark eats fish that fell behind its
/// mouth, dazed fish drift back and recover, free fish are nudged back into
/// the playfield one cell at a time.
pub fn update_status(id: PlayerId, player: &mut Player, bounds: &Bounds) {
    if player.x < bounds.shark_width {
        if player.is_alive() {
            log::info!("player {:?} was eaten at row {}", id, player.y);
        }
        player.status = FishStatus::Dead;
        player.x -= 1;
        return;
    }

    match player.status {
        FishStatus::Dazed { ticks } => {
            player.x -= 1;
            let served = ticks + 1;
            debug_assert!(served <= DAZED_TICKS);
            player.status = if served == DAZED_TICKS {
                FishStatus::Free
            } else {
                FishStatus::Dazed { ticks: served }
            };
        }
        FishStatus::Free => {
            if player.y < PLAYFIELD_TOP {
                player.y += 1;
            } else if player.y > PLAYFIELD_BOTTOM {
                player.y -= 1;
            } else if player.x > bounds.screen_width - bounds.fish_width {
                player.x -= 1;
            }
        }
        // Unreachable while x only falls once dead, but keep the drift.
        FishStatus::Dead => player.x -= 1,
    }
}

/// One tick of fish logic against the hazard layer.
pub fn update_fish(
    players: &mut [Player; 2],
    layer: &HazardLayer<'_>,
    input: Option<InputSymbol>,
    bounds: &Bounds,
) {
    move_fish(players, layer, input, bounds.fish_width);
    for id in PlayerId::ALL {
        update_status(id, &mut players[id.index()], bounds);
    }
}
