//! Builds one frame.
//!
//! Layers are painted in a fixed order, later ones on top:
//!
//! 1. trash, into a cleared scene (this is also the collision surface)
//! 2. fish, after they moved against the trash-only scene
//! 3. shark
//! 4. header text
//! 5. sea floor and scenery
//! 6. guest

use crate::assets::{AssetKind, GlyphSource, FISH_EYE_COLUMN};
use crate::camera::Camera;
use crate::entities::{
    DecorationKind, FishStatus, Guest, GuestKind, InputSymbol, Player, PlayerId, Session,
    FLOOR_GLYPH, FLOOR_ROW, HEADER_ROWS, MAX_ENCYCLOPEDIA_LEVEL, SCENE_ROWS, SCREEN_WIDTH,
    SHARK_ROW,
};
use crate::movement::{self, Bounds};
use crate::pool::ObjectPool;
use crate::scene::Scene;

// ── Frame ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub lines: [String; HEADER_ROWS],
}

/// What the display shows each tick: the header above the scene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub header: Header,
    pub scene: Scene,
}

impl Frame {
    pub fn new() -> Frame {
        Frame {
            header: Header::default(),
            scene: Scene::new(SCREEN_WIDTH as usize, SCENE_ROWS as usize),
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Frame::new()
    }
}

// ── Compositing ───────────────────────────────────────────────────────────────

/// Rebuilds `frame` for this tick.  Fish movement, collisions and the guest
/// encounter happen here as the layers they depend on become available.
pub fn composite(
    session: &mut Session,
    frame: &mut Frame,
    assets: &impl GlyphSource,
    input: Option<InputSymbol>,
) {
    let bounds = Bounds::from_assets(assets);

    let layer = frame
        .scene
        .lay_hazards(&session.hazards, &session.camera, assets);
    movement::update_fish(&mut session.players, &layer, input, &bounds);

    paint_fish(&mut frame.scene, &session.players, assets, bounds.shark_width);
    paint_shark(&mut frame.scene, assets);
    frame.header = header_for(session);
    paint_floor(&mut frame.scene);
    paint_decorations(
        &mut frame.scene,
        &session.decorations,
        &session.camera,
        assets,
    );
    paint_guest(&mut frame.scene, &session.guest, &session.camera, assets);
    note_guest_passage(session, assets);
}

fn eye(status: FishStatus) -> char {
    match status {
        FishStatus::Free => 'o',
        FishStatus::Dazed { .. } => '@',
        FishStatus::Dead => 'X',
    }
}

/// Fish are hidden while inside the shark, so it always appears in front.
fn paint_fish(scene: &mut Scene, players: &[Player; 2], assets: &impl GlyphSource, shark_edge: i32) {
    let glyph = assets.glyph(AssetKind::Fish);
    for player in players {
        for col in 0..glyph.width() {
            let x = player.x + col as i32;
            if x < shark_edge {
                continue;
            }
            let ch = if col == FISH_EYE_COLUMN {
                eye(player.status)
            } else {
                glyph.get(col, 0)
            };
            scene.put(x, player.y, ch);
        }
    }
}

fn paint_shark(scene: &mut Scene, assets: &impl GlyphSource) {
    scene.blit(assets.glyph(AssetKind::Shark), 0, SHARK_ROW, 0, false);
}

fn paint_floor(scene: &mut Scene) {
    for col in 0..scene.width() as i32 {
        scene.put(col, FLOOR_ROW, FLOOR_GLYPH);
    }
}

fn paint_decorations(
    scene: &mut Scene,
    decorations: &ObjectPool<DecorationKind>,
    camera: &Camera,
    assets: &impl GlyphSource,
) {
    for decoration in decorations.iter() {
        let col = camera.to_screen_x(decoration.x);
        if col >= scene.width() as i32 {
            break;
        }
        let glyph = assets.glyph(AssetKind::Decoration(decoration.kind));
        scene.blit(glyph, col, decoration.y, 0, false);
    }
}

fn paint_guest(scene: &mut Scene, guest: &Guest, camera: &Camera, assets: &impl GlyphSource) {
    let glyph = assets.glyph(AssetKind::Guest(guest.kind));
    let col = camera.to_screen_x(guest.x);
    if col >= scene.width() as i32 || col + glyph.width() as i32 <= 0 {
        return;
    }
    scene.blit(glyph, col, guest.y, 0, true);
}

/// Fires once, on the tick the guest's tail leaves the left edge.
fn note_guest_passage(session: &mut Session, assets: &impl GlyphSource) {
    if session.guest_passed {
        return;
    }
    let tail = session.guest.x + assets.width_of(AssetKind::Guest(session.guest.kind));
    if session.camera.to_screen_x(tail) > 0 {
        return;
    }
    session.guest_passed = true;
    if session.encyclopedia_level < MAX_ENCYCLOPEDIA_LEVEL {
        session.encyclopedia_level += 1;
        session.leveled_up = true;
    }
    log::info!(
        "{} swam past, encyclopedia level {}",
        session.guest.kind.name(),
        session.encyclopedia_level
    );
}

// ── Header ────────────────────────────────────────────────────────────────────

fn write_at(line: &mut [char], col: usize, text: &str) {
    for (i, ch) in text.chars().enumerate() {
        if let Some(cell) = line.get_mut(col + i) {
            *cell = ch;
        }
    }
}

/// Scores below ten get a leading zero.
pub fn format_score(score: u32) -> String {
    format!("{:02}", score)
}

/// Species names unlocked at `level`, in unlock order.
pub fn found_species(level: u32) -> String {
    GuestKind::ALL
        .iter()
        .take(level.min(MAX_ENCYCLOPEDIA_LEVEL) as usize)
        .map(|kind| kind.name())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A dashed rule, the score line, and another rule.
pub fn header_for(session: &Session) -> Header {
    let width = SCREEN_WIDTH as usize;
    let rule = "-".repeat(width);
    let p1 = session.player(PlayerId::One);
    let p2 = session.player(PlayerId::Two);

    let mut line = vec![' '; width];
    write_at(&mut line, 10, "P1 SCORE:");
    write_at(&mut line, 20, &format_score(p1.trash_evaded));
    write_at(&mut line, 23, "BEST:");
    write_at(&mut line, 29, &format_score(p1.best));
    write_at(
        &mut line,
        46,
        &format!("LVL {} ENCYCLOPEDIA", session.encyclopedia_level),
    );
    write_at(&mut line, 79, "FOUND ?????? ??????? ?????");
    write_at(&mut line, 85, &found_species(session.encyclopedia_level));
    write_at(&mut line, 120, "P2 SCORE:");
    write_at(&mut line, 130, &format_score(p2.trash_evaded));
    write_at(&mut line, 133, "BEST:");
    write_at(&mut line, 139, &format_score(p2.best));

    Header {
        lines: [rule.clone(), line.into_iter().collect(), rule],
    }
}
