//! Persisted player records and the encyclopedia file.
//!
//! Records are JSON in `records.json`; the encyclopedia is rewritten as plain
//! text in `encyclopedia.txt` whenever records are saved.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{GuestKind, MAX_ENCYCLOPEDIA_LEVEL};

pub const RECORDS_FILE: &str = "records.json";
pub const ENCYCLOPEDIA_FILE: &str = "encyclopedia.txt";

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("failed to read records {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("records file {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to save {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Records {
    pub p1_best: u32,
    pub p2_best: u32,
    pub encyclopedia_level: u32,
}

/// Where records live on disk.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> RecordStore {
        RecordStore { dir: dir.into() }
    }

    pub fn records_path(&self) -> PathBuf {
        self.dir.join(RECORDS_FILE)
    }

    pub fn encyclopedia_path(&self) -> PathBuf {
        self.dir.join(ENCYCLOPEDIA_FILE)
    }

    /// A store that has never been saved to reads as all zeroes.
    pub fn load(&self) -> Result<Records, RecordsError> {
        let path = self.records_path();
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no records at {}, starting fresh", path.display());
                return Ok(Records::default());
            }
            Err(source) => return Err(RecordsError::Read { path, source }),
        };
        let records =
            serde_json::from_str(&json).map_err(|source| RecordsError::Parse { path, source })?;
        log::info!("loaded records {:?}", records);
        Ok(records)
    }

    pub fn save(&self, records: &Records) -> Result<(), RecordsError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| RecordsError::Write {
            path: self.dir.clone(),
            source,
        })?;
        let json = serde_json::to_string_pretty(records)?;
        write_file(&self.records_path(), &json)?;
        write_file(
            &self.encyclopedia_path(),
            &encyclopedia_text(records.encyclopedia_level),
        )?;
        log::info!("saved records {:?}", records);
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), RecordsError> {
    std::fs::write(path, contents).map_err(|source| RecordsError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// ── Encyclopedia ──────────────────────────────────────────────────────────────

pub fn species_entry(kind: GuestKind) -> &'static str {
    match kind {
        GuestKind::Turtle => {
            "Sea turtles have roamed the oceans for over 100 million years. Six of \
             the seven species are threatened, and many die after swallowing plastic \
             bags they mistake for jellyfish."
        }
        GuestKind::Dolphin => {
            "Dolphins hunt with sound, reading the echoes of their own clicks. Coastal \
             species get tangled in lost fishing gear, and some number only a few \
             dozen animals."
        }
        GuestKind::Whale => {
            "The blue whale is the largest animal known to have ever lived. Hunting \
             nearly wiped it out; today ship strikes and ocean noise keep its \
             numbers low."
        }
    }
}

/// The encyclopedia as unlocked at `level`: one entry per species found.
pub fn encyclopedia_text(level: u32) -> String {
    let found = level.min(MAX_ENCYCLOPEDIA_LEVEL) as usize;
    let mut text = format!(
        "ENCYCLOPEDIA - {} OF {} SPECIES FOUND\n",
        found,
        GuestKind::ALL.len()
    );
    for kind in GuestKind::ALL.iter().take(found) {
        text.push('\n');
        text.push_str(kind.name());
        text.push('\n');
        text.push_str(species_entry(*kind));
        text.push('\n');
    }
    for _ in found..GuestKind::ALL.len() {
        text.push_str("\n??????\nKeep swimming to find this species.\n");
    }
    text
}
