//! All game entity types: pure data, no simulation logic.

use crate::camera::Camera;
use crate::pool::ObjectPool;
use crate::records::Records;

// ── Screen geometry ───────────────────────────────────────────────────────────

/// Terminal columns the game is laid out for.
pub const SCREEN_WIDTH: i32 = 150;
/// Terminal rows the game is laid out for (header included).
pub const SCREEN_ROWS: i32 = 50;
/// Rows above the scene reserved for the score header.
pub const HEADER_ROWS: usize = 3;
/// Rows of the scene buffer.
pub const SCENE_ROWS: i32 = SCREEN_ROWS - HEADER_ROWS as i32;

// ── Scene layout (scene-buffer rows) ──────────────────────────────────────────

/// First and last rows the fish may rest in; they are nudged back otherwise.
pub const PLAYFIELD_TOP: i32 = 13;
pub const PLAYFIELD_BOTTOM: i32 = 31;
/// Top row of the shark glyph.
pub const SHARK_ROW: i32 = 19;
/// Row holding the `~` sea-floor line.
pub const FLOOR_ROW: i32 = 38;
pub const FLOOR_GLYPH: char = '~';
/// Top row of every decoration.
pub const SCENERY_ROW: i32 = 31;
/// Top row of the guest.
pub const GUEST_ROW: i32 = 0;

// ── Game rules ────────────────────────────────────────────────────────────────

pub const TRASH_LIMIT: usize = 10;
pub const SCENERY_LIMIT: usize = 10;
/// Trash evaded by one player that ends the session.
pub const MAX_SCORE: u32 = 10;
/// Ticks a fish stays dazed after a collision.
pub const DAZED_TICKS: u32 = 5;
/// Highest encyclopedia level; one species is unlocked per level.
pub const MAX_ENCYCLOPEDIA_LEVEL: u32 = 3;

// ── Object kinds ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HazardKind {
    Can,
    Bag,
    Bottle,
}

impl HazardKind {
    pub const ALL: [HazardKind; 3] = [HazardKind::Can, HazardKind::Bag, HazardKind::Bottle];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    Coral,
    Reef,
    Bush,
    Rock,
    Weed1,
    Weed2,
    Weed3,
    Starfish,
}

impl DecorationKind {
    pub const ALL: [DecorationKind; 8] = [
        DecorationKind::Coral,
        DecorationKind::Reef,
        DecorationKind::Bush,
        DecorationKind::Rock,
        DecorationKind::Weed1,
        DecorationKind::Weed2,
        DecorationKind::Weed3,
        DecorationKind::Starfish,
    ];
}

/// Endangered species, in the order they are unlocked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GuestKind {
    Turtle,
    Dolphin,
    Whale,
}

impl GuestKind {
    pub const ALL: [GuestKind; 3] = [GuestKind::Turtle, GuestKind::Dolphin, GuestKind::Whale];

    pub fn name(self) -> &'static str {
        match self {
            GuestKind::Turtle => "TURTLE",
            GuestKind::Dolphin => "DOLPHIN",
            GuestKind::Whale => "WHALE",
        }
    }
}

// ── Scrolling objects ─────────────────────────────────────────────────────────

/// Top-left corner of a scrolling object.  `x` is a world column; it is only
/// ever converted to a screen column while painting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameObject<K> {
    pub x: i32,
    pub y: i32,
    pub kind: K,
}

pub type Hazard = GameObject<HazardKind>;
pub type Decoration = GameObject<DecorationKind>;
pub type Guest = GameObject<GuestKind>;

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Processing order within a tick.
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// `(dx, dy)` of a one-cell step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// One directional keystroke, already bound to the player it steers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputSymbol {
    pub player: PlayerId,
    pub direction: Direction,
}

impl InputSymbol {
    /// `WASD` steers player one, `IJKL` player two (either case).
    /// Anything else is no request for this tick.
    pub fn from_char(c: char) -> Option<InputSymbol> {
        let (player, direction) = match c.to_ascii_lowercase() {
            'w' => (PlayerId::One, Direction::Up),
            'a' => (PlayerId::One, Direction::Left),
            's' => (PlayerId::One, Direction::Down),
            'd' => (PlayerId::One, Direction::Right),
            'i' => (PlayerId::Two, Direction::Up),
            'j' => (PlayerId::Two, Direction::Left),
            'k' => (PlayerId::Two, Direction::Down),
            'l' => (PlayerId::Two, Direction::Right),
            _ => return None,
        };
        Some(InputSymbol { player, direction })
    }
}

// ── Players ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FishStatus {
    Free,
    /// `ticks` dazed ticks already served.
    Dazed { ticks: u32 },
    /// Eaten.  Terminal.
    Dead,
}

/// A fish.  Unlike scrolling objects its `x` is a screen column: the fish
/// swim along with the camera and only fall back when they stop keeping up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub status: FishStatus,
    /// Session score.
    pub trash_evaded: u32,
    /// Persisted best score; only ever rises.
    pub best: u32,
}

impl Player {
    pub fn new(x: i32, y: i32, best: u32) -> Player {
        Player {
            x,
            y,
            status: FishStatus::Free,
            trash_evaded: 0,
            best,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status != FishStatus::Dead
    }

    pub fn is_dazed(&self) -> bool {
        matches!(self.status, FishStatus::Dazed { .. })
    }

    /// Alive and able to take input.
    pub fn is_free(&self) -> bool {
        self.status == FishStatus::Free
    }

    /// Ticks left before a dazed fish recovers; zero otherwise.
    pub fn dazed_ticks_remaining(&self) -> u32 {
        match self.status {
            FishStatus::Dazed { ticks } => DAZED_TICKS - ticks,
            _ => 0,
        }
    }

    /// A free fish becomes dazed; an already dazed or dead fish is unchanged.
    pub fn daze(&mut self) {
        if self.status == FishStatus::Free {
            self.status = FishStatus::Dazed { ticks: 0 };
        }
    }

    /// One piece of trash got past the shark.  Only living fish score.
    pub fn credit_evaded(&mut self) {
        if !self.is_alive() {
            return;
        }
        self.trash_evaded += 1;
        if self.trash_evaded > self.best {
            self.best = self.trash_evaded;
        }
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Both fish were eaten.
    NoWinner,
    PlayerOne,
    PlayerTwo,
    Both,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Ended(Outcome),
}

/// Everything one game owns.  The tick driver is the only writer.
#[derive(Clone, Debug)]
pub struct Session {
    pub camera: Camera,
    pub hazards: ObjectPool<HazardKind>,
    pub decorations: ObjectPool<DecorationKind>,
    pub players: [Player; 2],
    pub guest: Guest,
    /// Set once, when the guest has swum fully off the left edge.
    pub guest_passed: bool,
    pub encyclopedia_level: u32,
    /// The guest raised the encyclopedia level this session.
    pub leveled_up: bool,
    pub status: SessionStatus,
}

impl Session {
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// What the persistence layer stores at session end.
    pub fn records(&self) -> Records {
        Records {
            p1_best: self.players[0].best,
            p2_best: self.players[1].best,
            encyclopedia_level: self.encyclopedia_level,
        }
    }
}
