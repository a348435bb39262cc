//! Glyph rectangles for everything that gets painted into the scene.
//!
//! Art is plain text, one file per object kind.  The built-in set is compiled
//! into the binary; `AssetSet::load_dir` reads a replacement set from disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::entities::{DecorationKind, GuestKind, HazardKind, PLAYFIELD_TOP};
use crate::pool::HAZARD_GAP;

/// Glyph cells holding this character are not painted over what lies below.
pub const TRANSPARENT: char = ' ';

/// Column of the fish glyph that shows the eye.
pub const FISH_EYE_COLUMN: usize = 5;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to read art asset {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("art asset {name} is empty")]
    Empty { name: &'static str },
    #[error("no art supplied for {name}")]
    MissingKind { name: &'static str },
    #[error("trash art {name} is {width} columns wide; it must be narrower than {limit}")]
    HazardTooWide {
        name: &'static str,
        width: usize,
        limit: usize,
    },
    #[error("guest art {name} is {height} rows tall; it must fit above row {limit}")]
    GuestTooTall {
        name: &'static str,
        height: usize,
        limit: usize,
    },
    #[error("fish art must be one row of more than {min} columns, got {width}x{height}")]
    BadFish {
        width: usize,
        height: usize,
        min: usize,
    },
}

// ── Glyph ─────────────────────────────────────────────────────────────────────

/// A rectangular character grid.  Ragged source lines are padded with
/// `TRANSPARENT` to the widest line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Glyph {
    /// `None` when the text holds no characters at all.
    pub fn parse(text: &str) -> Option<Glyph> {
        let lines: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.trim_end_matches('\r').chars().collect())
            .collect();
        let width = lines.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return None;
        }
        let height = lines.len();
        let mut cells = Vec::with_capacity(width * height);
        for line in &lines {
            cells.extend(line.iter().copied());
            cells.extend(std::iter::repeat(TRANSPARENT).take(width - line.len()));
        }
        Some(Glyph {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, col: usize, row: usize) -> char {
        self.cells[row * self.width + col]
    }
}

// ── Asset kinds ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Fish,
    Shark,
    Hazard(HazardKind),
    Decoration(DecorationKind),
    Guest(GuestKind),
}

impl AssetKind {
    pub const ALL: [AssetKind; 16] = [
        AssetKind::Fish,
        AssetKind::Shark,
        AssetKind::Hazard(HazardKind::Can),
        AssetKind::Hazard(HazardKind::Bag),
        AssetKind::Hazard(HazardKind::Bottle),
        AssetKind::Guest(GuestKind::Turtle),
        AssetKind::Guest(GuestKind::Dolphin),
        AssetKind::Guest(GuestKind::Whale),
        AssetKind::Decoration(DecorationKind::Coral),
        AssetKind::Decoration(DecorationKind::Reef),
        AssetKind::Decoration(DecorationKind::Bush),
        AssetKind::Decoration(DecorationKind::Rock),
        AssetKind::Decoration(DecorationKind::Weed1),
        AssetKind::Decoration(DecorationKind::Weed2),
        AssetKind::Decoration(DecorationKind::Weed3),
        AssetKind::Decoration(DecorationKind::Starfish),
    ];

    pub fn name(self) -> &'static str {
        match self {
            AssetKind::Fish => "fish",
            AssetKind::Shark => "shark",
            AssetKind::Hazard(HazardKind::Can) => "can",
            AssetKind::Hazard(HazardKind::Bag) => "bag",
            AssetKind::Hazard(HazardKind::Bottle) => "bottle",
            AssetKind::Guest(GuestKind::Turtle) => "turtle",
            AssetKind::Guest(GuestKind::Dolphin) => "dolphin",
            AssetKind::Guest(GuestKind::Whale) => "whale",
            AssetKind::Decoration(DecorationKind::Coral) => "coral",
            AssetKind::Decoration(DecorationKind::Reef) => "reef",
            AssetKind::Decoration(DecorationKind::Bush) => "bush",
            AssetKind::Decoration(DecorationKind::Rock) => "rock",
            AssetKind::Decoration(DecorationKind::Weed1) => "weed1",
            AssetKind::Decoration(DecorationKind::Weed2) => "weed2",
            AssetKind::Decoration(DecorationKind::Weed3) => "weed3",
            AssetKind::Decoration(DecorationKind::Starfish) => "starfish",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.txt", self.name())
    }

    fn builtin_art(self) -> &'static str {
        match self {
            AssetKind::Fish => include_str!("../assets/fish.txt"),
            AssetKind::Shark => include_str!("../assets/shark.txt"),
            AssetKind::Hazard(HazardKind::Can) => include_str!("../assets/can.txt"),
            AssetKind::Hazard(HazardKind::Bag) => include_str!("../assets/bag.txt"),
            AssetKind::Hazard(HazardKind::Bottle) => include_str!("../assets/bottle.txt"),
            AssetKind::Guest(GuestKind::Turtle) => include_str!("../assets/turtle.txt"),
            AssetKind::Guest(GuestKind::Dolphin) => include_str!("../assets/dolphin.txt"),
            AssetKind::Guest(GuestKind::Whale) => include_str!("../assets/whale.txt"),
            AssetKind::Decoration(DecorationKind::Coral) => include_str!("../assets/coral.txt"),
            AssetKind::Decoration(DecorationKind::Reef) => include_str!("../assets/reef.txt"),
            AssetKind::Decoration(DecorationKind::Bush) => include_str!("../assets/bush.txt"),
            AssetKind::Decoration(DecorationKind::Rock) => include_str!("../assets/rock.txt"),
            AssetKind::Decoration(DecorationKind::Weed1) => include_str!("../assets/weed1.txt"),
            AssetKind::Decoration(DecorationKind::Weed2) => include_str!("../assets/weed2.txt"),
            AssetKind::Decoration(DecorationKind::Weed3) => include_str!("../assets/weed3.txt"),
            AssetKind::Decoration(DecorationKind::Starfish) => {
                include_str!("../assets/starfish.txt")
            }
        }
    }
}

// ── Provider ──────────────────────────────────────────────────────────────────

/// Anything that can hand out a glyph for every `AssetKind`.
pub trait GlyphSource {
    fn glyph(&self, kind: AssetKind) -> &Glyph;

    fn width_of(&self, kind: AssetKind) -> i32 {
        self.glyph(kind).width() as i32
    }

    /// Screen column where the shark's mouth ends; fish left of it are eaten.
    fn shark_width(&self) -> i32 {
        self.width_of(AssetKind::Shark)
    }

    fn fish_width(&self) -> i32 {
        self.width_of(AssetKind::Fish)
    }
}

#[derive(Clone, Debug)]
pub struct AssetSet {
    glyphs: HashMap<AssetKind, Glyph>,
}

impl AssetSet {
    /// The art shipped with the game.
    pub fn builtin() -> Result<AssetSet, AssetError> {
        AssetSet::from_texts(AssetKind::ALL.iter().map(|&kind| (kind, kind.builtin_art())))
    }

    /// Reads `<name>.txt` for every kind from `dir`.  Any missing file is fatal.
    pub fn load_dir(dir: &Path) -> Result<AssetSet, AssetError> {
        let mut texts = Vec::with_capacity(AssetKind::ALL.len());
        for kind in AssetKind::ALL {
            let path = dir.join(kind.file_name());
            let text = std::fs::read_to_string(&path)
                .map_err(|source| AssetError::Unreadable { path, source })?;
            texts.push((kind, text));
        }
        log::info!("loaded {} art assets from {}", texts.len(), dir.display());
        AssetSet::from_texts(texts.iter().map(|(kind, text)| (*kind, text.as_str())))
    }

    pub fn from_texts<'a>(
        texts: impl IntoIterator<Item = (AssetKind, &'a str)>,
    ) -> Result<AssetSet, AssetError> {
        let mut glyphs = HashMap::new();
        for (kind, text) in texts {
            let glyph = Glyph::parse(text).ok_or(AssetError::Empty { name: kind.name() })?;
            glyphs.insert(kind, glyph);
        }
        let set = AssetSet { glyphs };
        set.validate()?;
        Ok(set)
    }

    /// Checks the shape rules the collision scheme relies on: trash never
    /// overlaps, the guest stays above the fish and the fish is one row.
    fn validate(&self) -> Result<(), AssetError> {
        for kind in AssetKind::ALL {
            let Some(glyph) = self.glyphs.get(&kind) else {
                return Err(AssetError::MissingKind { name: kind.name() });
            };
            match kind {
                AssetKind::Hazard(_) if glyph.width() >= HAZARD_GAP.start as usize => {
                    return Err(AssetError::HazardTooWide {
                        name: kind.name(),
                        width: glyph.width(),
                        limit: HAZARD_GAP.start as usize,
                    });
                }
                AssetKind::Guest(_) if glyph.height() > PLAYFIELD_TOP as usize => {
                    return Err(AssetError::GuestTooTall {
                        name: kind.name(),
                        height: glyph.height(),
                        limit: PLAYFIELD_TOP as usize,
                    });
                }
                AssetKind::Fish if glyph.height() != 1 || glyph.width() <= FISH_EYE_COLUMN => {
                    return Err(AssetError::BadFish {
                        width: glyph.width(),
                        height: glyph.height(),
                        min: FISH_EYE_COLUMN,
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl GlyphSource for AssetSet {
    fn glyph(&self, kind: AssetKind) -> &Glyph {
        // Every kind is present: `validate` runs on construction.
        &self.glyphs[&kind]
    }
}
