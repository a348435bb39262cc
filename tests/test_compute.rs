use waste_management::assets::{AssetKind, AssetSet, GlyphSource};
use waste_management::compositor::{format_score, found_species, header_for, Frame};
use waste_management::compute::*;
use waste_management::entities::*;
use waste_management::pool::HAZARD_GAP;
use waste_management::records::Records;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn assets() -> AssetSet {
    AssetSet::builtin().unwrap()
}

fn fresh_session(rng: &mut StdRng) -> Session {
    init_session(&Records::default(), rng)
}

// ── init_session ──────────────────────────────────────────────────────────────

#[test]
fn init_session_start_positions() {
    let s = fresh_session(&mut seeded_rng());
    assert_eq!((s.players[0].x, s.players[0].y), P1_START);
    assert_eq!((s.players[1].x, s.players[1].y), P2_START);
    for p in &s.players {
        assert_eq!(p.status, FishStatus::Free);
        assert_eq!(p.trash_evaded, 0);
    }
}

#[test]
fn init_session_empty_pools() {
    let s = fresh_session(&mut seeded_rng());
    assert!(s.hazards.is_empty());
    assert!(s.decorations.is_empty());
    assert_eq!(s.hazards.capacity(), TRASH_LIMIT);
    assert_eq!(s.decorations.capacity(), SCENERY_LIMIT);
    assert_eq!(s.camera.offset(), 0);
    assert_eq!(s.status, SessionStatus::Running);
    assert!(!s.guest_passed);
    assert!(!s.leveled_up);
}

#[test]
fn init_session_carries_records() {
    let records = Records {
        p1_best: 3,
        p2_best: 8,
        encyclopedia_level: 1,
    };
    let s = init_session(&records, &mut seeded_rng());
    assert_eq!(s.players[0].best, 3);
    assert_eq!(s.players[1].best, 8);
    assert_eq!(s.encyclopedia_level, 1);
    assert_eq!(s.guest.kind, GuestKind::Dolphin);
}

// ── choose_guest ──────────────────────────────────────────────────────────────

#[test]
fn guest_follows_unlock_order() {
    let mut rng = seeded_rng();
    assert_eq!(choose_guest(0, &mut rng).kind, GuestKind::Turtle);
    assert_eq!(choose_guest(1, &mut rng).kind, GuestKind::Dolphin);
    assert_eq!(choose_guest(2, &mut rng).kind, GuestKind::Whale);
}

#[test]
fn guest_starts_off_screen_right() {
    let mut rng = seeded_rng();
    for level in 0..6 {
        let guest = choose_guest(level, &mut rng);
        assert!(guest.x >= SCREEN_WIDTH + GUEST_DELAY.start);
        assert!(guest.x < SCREEN_WIDTH + GUEST_DELAY.end);
        assert_eq!(guest.y, GUEST_ROW);
    }
}

// ── manage_objects ────────────────────────────────────────────────────────────

#[test]
fn first_manage_fills_both_pools() {
    let mut rng = seeded_rng();
    let mut s = fresh_session(&mut rng);
    manage_objects(&mut s, &assets(), &mut rng);

    assert_eq!(s.hazards.len(), TRASH_LIMIT);
    assert_eq!(s.decorations.len(), SCENERY_LIMIT);
    assert_eq!(s.hazards.front().map(|h| h.x), Some(SCREEN_WIDTH));

    let xs: Vec<i32> = s.hazards.iter().map(|h| h.x).collect();
    for pair in xs.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(HAZARD_GAP.contains(&gap), "gap {}", gap);
    }
    for hazard in s.hazards.iter() {
        assert!((13..22).contains(&hazard.y));
    }
    for decoration in s.decorations.iter() {
        assert_eq!(decoration.y, SCENERY_ROW);
    }
}

#[test]
fn manage_credits_every_evicted_hazard() {
    let mut rng = seeded_rng();
    let assets = assets();
    let mut s = fresh_session(&mut rng);
    manage_objects(&mut s, &assets, &mut rng);

    // Scroll until the first piece of trash is past the shark.
    let first = *s.hazards.front().unwrap();
    let width = assets.width_of(AssetKind::Hazard(first.kind));
    while first.x + width >= s.camera.offset() + assets.shark_width() {
        s.camera.advance();
    }
    manage_objects(&mut s, &assets, &mut rng);

    assert_eq!(s.players[0].trash_evaded, 1);
    assert_eq!(s.players[1].trash_evaded, 1);
    // Refilled on the next tick, not this one.
    assert_eq!(s.hazards.len(), TRASH_LIMIT - 1);
    assert!(s.hazards.front().unwrap().x > first.x);
}

// ── evaluate_end ──────────────────────────────────────────────────────────────

#[test]
fn running_session_has_no_outcome() {
    let s = fresh_session(&mut seeded_rng());
    assert_eq!(evaluate_end(&s), None);
}

#[test]
fn both_dead_is_no_winner() {
    let mut s = fresh_session(&mut seeded_rng());
    s.players[0].status = FishStatus::Dead;
    assert_eq!(evaluate_end(&s), None);
    s.players[1].status = FishStatus::Dead;
    assert_eq!(evaluate_end(&s), Some(Outcome::NoWinner));
}

#[test]
fn single_player_reaching_max_wins() {
    let mut s = fresh_session(&mut seeded_rng());
    s.players[0].trash_evaded = MAX_SCORE;
    s.players[1].trash_evaded = MAX_SCORE - 1;
    assert_eq!(evaluate_end(&s), Some(Outcome::PlayerOne));

    s.players[0].trash_evaded = 4;
    s.players[1].trash_evaded = MAX_SCORE;
    assert_eq!(evaluate_end(&s), Some(Outcome::PlayerTwo));
}

#[test]
fn both_reaching_max_share_the_win() {
    let mut s = fresh_session(&mut seeded_rng());
    s.players[0].trash_evaded = MAX_SCORE;
    s.players[1].trash_evaded = MAX_SCORE;
    assert_eq!(evaluate_end(&s), Some(Outcome::Both));
}

#[test]
fn survivor_can_still_win_alone() {
    let mut s = fresh_session(&mut seeded_rng());
    s.players[0].status = FishStatus::Dead;
    s.players[1].trash_evaded = MAX_SCORE;
    assert_eq!(evaluate_end(&s), Some(Outcome::PlayerTwo));
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_advances_camera_once() {
    let mut rng = seeded_rng();
    let assets = assets();
    let mut s = fresh_session(&mut rng);
    let mut frame = Frame::new();

    assert_eq!(tick(&mut s, &mut frame, &assets, None, &mut rng), SessionStatus::Running);
    assert_eq!(s.camera.offset(), 1);
    tick(&mut s, &mut frame, &assets, None, &mut rng);
    assert_eq!(s.camera.offset(), 2);
}

#[test]
fn tick_applies_input() {
    let mut rng = seeded_rng();
    let assets = assets();
    let mut s = fresh_session(&mut rng);
    let mut frame = Frame::new();

    let up = InputSymbol::from_char('w');
    tick(&mut s, &mut frame, &assets, up, &mut rng);
    assert_eq!((s.players[0].x, s.players[0].y), (P1_START.0, P1_START.1 - 1));
    assert_eq!((s.players[1].x, s.players[1].y), P2_START);
}

#[test]
fn tick_paints_fish_shark_and_floor() {
    let mut rng = seeded_rng();
    let assets = assets();
    let mut s = fresh_session(&mut rng);
    let mut frame = Frame::new();
    tick(&mut s, &mut frame, &assets, None, &mut rng);

    let row = frame.scene.row_string(P1_START.1 as usize);
    assert_eq!(&row[P1_START.0 as usize..P1_START.0 as usize + 7], "><)))o>");
    // Floor everywhere except where scenery art reaches down onto it.
    let mut expected = vec![FLOOR_GLYPH; SCREEN_WIDTH as usize];
    for decoration in s.decorations.iter() {
        let glyph = assets.glyph(AssetKind::Decoration(decoration.kind));
        let art_row = (FLOOR_ROW - decoration.y) as usize;
        if art_row >= glyph.height() {
            continue;
        }
        for c in 0..glyph.width() {
            let col = decoration.x + c as i32;
            let ch = glyph.get(c, art_row);
            if ch != ' ' && (0..SCREEN_WIDTH).contains(&col) {
                expected[col as usize] = ch;
            }
        }
    }
    let floor = frame.scene.row_string(FLOOR_ROW as usize);
    assert_eq!(floor, expected.into_iter().collect::<String>());
    let shark_rows = (SHARK_ROW as usize..SHARK_ROW as usize + 8)
        .map(|r| frame.scene.row_string(r))
        .collect::<String>();
    assert!(shark_rows.chars().any(|c| c != ' '));
}

#[test]
fn tick_after_end_is_noop() {
    let mut rng = seeded_rng();
    let assets = assets();
    let mut s = fresh_session(&mut rng);
    let mut frame = Frame::new();
    s.status = SessionStatus::Ended(Outcome::PlayerOne);

    let status = tick(&mut s, &mut frame, &assets, InputSymbol::from_char('d'), &mut rng);
    assert_eq!(status, SessionStatus::Ended(Outcome::PlayerOne));
    assert_eq!(s.camera.offset(), 0);
    assert!(s.hazards.is_empty());
    assert_eq!(s.players[0].x, P1_START.0);
}

#[test]
fn idle_session_ends_and_stays_ended() {
    let mut rng = seeded_rng();
    let assets = assets();
    let mut s = fresh_session(&mut rng);
    let mut frame = Frame::new();

    let mut outcome = None;
    for _ in 0..5_000 {
        if let SessionStatus::Ended(o) = tick(&mut s, &mut frame, &assets, None, &mut rng) {
            outcome = Some(o);
            break;
        }
    }
    let outcome = outcome.expect("an idle session must end");
    assert_eq!(evaluate_end(&s), Some(outcome));

    let offset = s.camera.offset();
    assert_eq!(
        tick(&mut s, &mut frame, &assets, None, &mut rng),
        SessionStatus::Ended(outcome)
    );
    assert_eq!(s.camera.offset(), offset);
}

#[test]
fn scenery_is_painted_over_the_floor() {
    let mut rng = seeded_rng();
    let assets = assets();
    let mut s = fresh_session(&mut rng);
    let mut frame = Frame::new();
    s.decorations.push(Decoration {
        x: 60,
        y: SCENERY_ROW,
        kind: DecorationKind::Rock,
    });
    tick(&mut s, &mut frame, &assets, None, &mut rng);

    // The rock's bottom row, ` /____..._._\`, sits on the floor line.
    assert_eq!(frame.scene.get(60, FLOOR_ROW), FLOOR_GLYPH);
    assert_eq!(frame.scene.get(61, FLOOR_ROW), '/');
    assert_eq!(frame.scene.get(62, FLOOR_ROW), '_');
    assert_eq!(frame.scene.get(88, FLOOR_ROW), '\\');
}

// ── guest encounter ───────────────────────────────────────────────────────────

#[test]
fn guest_passage_levels_up_once() {
    let mut rng = seeded_rng();
    let assets = assets();
    let mut s = fresh_session(&mut rng);
    let mut frame = Frame::new();
    s.guest.x = -500;

    tick(&mut s, &mut frame, &assets, None, &mut rng);
    assert!(s.guest_passed);
    assert!(s.leveled_up);
    assert_eq!(s.encyclopedia_level, 1);

    tick(&mut s, &mut frame, &assets, None, &mut rng);
    assert_eq!(s.encyclopedia_level, 1);
    assert_eq!(s.records().encyclopedia_level, 1);
}

#[test]
fn guest_counts_on_the_tick_its_tail_leaves() {
    let mut rng = seeded_rng();
    let assets = assets();
    let mut s = fresh_session(&mut rng);
    let mut frame = Frame::new();
    // Tail two columns right of the left edge.
    s.guest.x = 2 - assets.width_of(AssetKind::Guest(s.guest.kind));

    tick(&mut s, &mut frame, &assets, None, &mut rng);
    assert!(!s.guest_passed);
    tick(&mut s, &mut frame, &assets, None, &mut rng);
    assert!(!s.guest_passed);
    assert_eq!(s.encyclopedia_level, 0);

    tick(&mut s, &mut frame, &assets, None, &mut rng);
    assert!(s.guest_passed);
    assert!(s.leveled_up);
    assert_eq!(s.encyclopedia_level, 1);
}

#[test]
fn guest_on_screen_does_not_count() {
    let mut rng = seeded_rng();
    let assets = assets();
    let mut s = fresh_session(&mut rng);
    let mut frame = Frame::new();
    s.guest.x = 10;

    tick(&mut s, &mut frame, &assets, None, &mut rng);
    assert!(!s.guest_passed);
    assert_eq!(s.encyclopedia_level, 0);
}

#[test]
fn encyclopedia_level_is_capped() {
    let mut rng = seeded_rng();
    let assets = assets();
    let records = Records {
        encyclopedia_level: MAX_ENCYCLOPEDIA_LEVEL,
        ..Records::default()
    };
    let mut s = init_session(&records, &mut rng);
    let mut frame = Frame::new();
    s.guest.x = -500;

    tick(&mut s, &mut frame, &assets, None, &mut rng);
    assert!(s.guest_passed);
    assert!(!s.leveled_up);
    assert_eq!(s.encyclopedia_level, MAX_ENCYCLOPEDIA_LEVEL);
}

// ── header ────────────────────────────────────────────────────────────────────

#[test]
fn scores_are_zero_padded() {
    assert_eq!(format_score(0), "00");
    assert_eq!(format_score(7), "07");
    assert_eq!(format_score(10), "10");
}

#[test]
fn header_shows_scores_and_species() {
    let records = Records {
        p1_best: 4,
        p2_best: 12,
        encyclopedia_level: 2,
    };
    let mut s = init_session(&records, &mut seeded_rng());
    s.players[0].trash_evaded = 3;

    let header = header_for(&s);
    let line = &header.lines[1];
    assert_eq!(&line[10..19], "P1 SCORE:");
    assert_eq!(&line[20..22], "03");
    assert_eq!(&line[29..31], "04");
    assert_eq!(&line[130..132], "00");
    assert_eq!(&line[139..141], "12");
    assert!(line.contains("LVL 2 ENCYCLOPEDIA"));
    assert!(line.contains("FOUND TURTLE DOLPHIN"));
    assert!(header.lines[0].chars().all(|c| c == '-'));
    assert_eq!(header.lines[0].len(), SCREEN_WIDTH as usize);
}

#[test]
fn found_species_follows_level() {
    assert_eq!(found_species(0), "");
    assert_eq!(found_species(1), "TURTLE");
    assert_eq!(found_species(3), "TURTLE DOLPHIN WHALE");
    assert_eq!(found_species(9), "TURTLE DOLPHIN WHALE");
}
