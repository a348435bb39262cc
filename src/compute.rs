//! Session set-up and the per-tick driver.
//!
//! All randomness comes through an injected `Rng`, so a seeded generator
//! replays a session exactly given the same keystrokes.

use std::ops::Range;

use rand::Rng;

use crate::assets::GlyphSource;
use crate::camera::Camera;
use crate::compositor::{self, Frame};
use crate::entities::{
    Guest, GuestKind, InputSymbol, Outcome, Player, Session, SessionStatus, GUEST_ROW,
    MAX_SCORE, SCENERY_LIMIT, SCREEN_WIDTH, TRASH_LIMIT,
};
use crate::pool::{
    despawn_decorations, despawn_hazards, spawn_decorations, spawn_hazards, ObjectPool,
};
use crate::records::Records;

/// Start positions: player one upper-left, player two lower and a bit ahead.
pub const P1_START: (i32, i32) = (40, 16);
pub const P2_START: (i32, i32) = (50, 25);

/// Columns past the right screen edge where the guest may start.
pub const GUEST_DELAY: Range<i32> = 0..300;

// ── Constructors ──────────────────────────────────────────────────────────────

/// Species are met in unlock order; once all are known any may show up.
pub fn choose_guest(encyclopedia_level: u32, rng: &mut impl Rng) -> Guest {
    let x = SCREEN_WIDTH + rng.gen_range(GUEST_DELAY);
    let kind = match encyclopedia_level {
        0 => GuestKind::Turtle,
        1 => GuestKind::Dolphin,
        2 => GuestKind::Whale,
        _ => GuestKind::ALL[rng.gen_range(0..GuestKind::ALL.len())],
    };
    Guest {
        x,
        y: GUEST_ROW,
        kind,
    }
}

/// A fresh session seeded from the persisted records.
pub fn init_session(records: &Records, rng: &mut impl Rng) -> Session {
    let guest = choose_guest(records.encyclopedia_level, rng);
    log::info!(
        "new session: bests {}/{}, encyclopedia level {}, guest {}",
        records.p1_best,
        records.p2_best,
        records.encyclopedia_level,
        guest.kind.name()
    );
    Session {
        camera: Camera::new(),
        hazards: ObjectPool::new(TRASH_LIMIT),
        decorations: ObjectPool::new(SCENERY_LIMIT),
        players: [
            Player::new(P1_START.0, P1_START.1, records.p1_best),
            Player::new(P2_START.0, P2_START.1, records.p2_best),
        ],
        guest,
        guest_passed: false,
        encyclopedia_level: records.encyclopedia_level,
        leveled_up: false,
        status: SessionStatus::Running,
    }
}

// ── Per-tick steps ────────────────────────────────────────────────────────────

/// Tops up and prunes both pools.  Evicted trash is scored here.
pub fn manage_objects(session: &mut Session, assets: &impl GlyphSource, rng: &mut impl Rng) {
    spawn_hazards(&mut session.hazards, &session.camera, SCREEN_WIDTH, rng);
    despawn_hazards(
        &mut session.hazards,
        &session.camera,
        assets,
        &mut session.players,
    );
    spawn_decorations(&mut session.decorations, rng);
    despawn_decorations(&mut session.decorations, &session.camera);

    debug_assert!(session.hazards.is_sorted());
    debug_assert!(session.decorations.is_sorted());
}

/// `None` while the game goes on.
pub fn evaluate_end(session: &Session) -> Option<Outcome> {
    let [p1, p2] = &session.players;
    if !p1.is_alive() && !p2.is_alive() {
        return Some(Outcome::NoWinner);
    }
    match (p1.trash_evaded >= MAX_SCORE, p2.trash_evaded >= MAX_SCORE) {
        (true, true) => Some(Outcome::Both),
        (true, false) => Some(Outcome::PlayerOne),
        (false, true) => Some(Outcome::PlayerTwo),
        (false, false) => None,
    }
}

/// Advance the simulation by one tick and return the resulting status.
/// Once a session has ended further calls change nothing.
pub fn tick(
    session: &mut Session,
    frame: &mut Frame,
    assets: &impl GlyphSource,
    input: Option<InputSymbol>,
    rng: &mut impl Rng,
) -> SessionStatus {
    if let SessionStatus::Ended(_) = session.status {
        return session.status;
    }

    manage_objects(session, assets, rng);
    compositor::composite(session, frame, assets, input);
    session.camera.advance();

    if let Some(outcome) = evaluate_end(session) {
        log::info!(
            "session over at offset {}: {:?}, scores {}/{}",
            session.camera.offset(),
            outcome,
            session.players[0].trash_evaded,
            session.players[1].trash_evaded
        );
        session.status = SessionStatus::Ended(outcome);
    }
    session.status
}
