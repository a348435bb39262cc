//! The per-tick character buffer.
//!
//! The scene is both the frame that gets displayed and the surface collision
//! queries read from.  `Scene::lay_hazards` is the only way to obtain a
//! `HazardLayer`, so a collision query can never run against a buffer that
//! lacks this tick's trash or already holds anything else.

use crate::assets::{AssetKind, Glyph, GlyphSource, TRANSPARENT};
use crate::camera::Camera;
use crate::entities::HazardKind;
use crate::pool::ObjectPool;

pub const BLANK: char = ' ';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    width: usize,
    rows: usize,
    cells: Vec<char>,
}

impl Scene {
    pub fn new(width: usize, rows: usize) -> Scene {
        Scene {
            width,
            rows,
            cells: vec![BLANK; width * rows],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.rows {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    /// Cells outside the buffer read as blank.
    pub fn get(&self, col: i32, row: i32) -> char {
        self.index(col, row).map_or(BLANK, |i| self.cells[i])
    }

    /// Writes outside the buffer are dropped.
    pub fn put(&mut self, col: i32, row: i32, ch: char) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = ch;
        }
    }

    pub fn row_string(&self, row: usize) -> String {
        self.cells[row * self.width..(row + 1) * self.width].iter().collect()
    }

    /// Paints `glyph` with its top-left corner at (`col`, `row`).  Cells left
    /// of `min_col` are skipped, as are transparent cells unless `opaque`.
    pub fn blit(&mut self, glyph: &Glyph, col: i32, row: i32, min_col: i32, opaque: bool) {
        for r in 0..glyph.height() {
            for c in 0..glyph.width() {
                let x = col + c as i32;
                if x < min_col {
                    continue;
                }
                let ch = glyph.get(c, r);
                if !opaque && ch == TRANSPARENT {
                    continue;
                }
                self.put(x, row + r as i32, ch);
            }
        }
    }

    /// Clears the buffer and paints this tick's trash, right of the shark.
    pub fn lay_hazards<'a>(
        &'a mut self,
        hazards: &ObjectPool<HazardKind>,
        camera: &Camera,
        assets: &impl GlyphSource,
    ) -> HazardLayer<'a> {
        self.clear();
        let shark_edge = assets.shark_width();
        for hazard in hazards.iter() {
            let col = camera.to_screen_x(hazard.x);
            // Sorted pool: everything after this is off screen too.
            if col >= self.width as i32 {
                break;
            }
            let glyph = assets.glyph(AssetKind::Hazard(hazard.kind));
            self.blit(glyph, col, hazard.y, shark_edge, false);
        }
        HazardLayer { scene: &*self }
    }
}

/// A scene holding nothing but this tick's trash.
#[derive(Clone, Copy, Debug)]
pub struct HazardLayer<'a> {
    scene: &'a Scene,
}

impl HazardLayer<'_> {
    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        self.scene.get(col, row) != BLANK
    }
}
