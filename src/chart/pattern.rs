use super::Rgba;
use serde::Serialize;

const TILE_SIZE: usize = 10;
const STROKE_WIDTH: f64 = 4.0;

/// A repeating square tile of diagonal strokes, used to fill drilldown bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HatchPattern {
    pub color: Rgba,
    pub size: usize,
    #[serde(skip)]
    tile: Vec<bool>,
}

impl HatchPattern {
    /// Two parallel strokes running top-left to bottom-right. Their ends sit
    /// half a stroke outside the tile so the seams line up when repeated.
    pub fn diagonal(color: Rgba) -> Self {
        let size = TILE_SIZE as f64;
        let offset = STROKE_WIDTH / 2.0;
        let strokes = [
            (
                (size / 2.0 - offset, -offset),
                (size + offset, size / 2.0 + offset),
            ),
            (
                (-offset, size / 2.0 - offset),
                (size / 2.0 + offset, size + offset),
            ),
        ];

        let mut tile = vec![false; TILE_SIZE * TILE_SIZE];
        for y in 0..TILE_SIZE {
            for x in 0..TILE_SIZE {
                let centre = (x as f64 + 0.5, y as f64 + 0.5);
                tile[y * TILE_SIZE + x] = strokes
                    .iter()
                    .any(|&(from, to)| distance_to_segment(centre, from, to) <= offset);
            }
        }

        Self {
            color,
            size: TILE_SIZE,
            tile,
        }
    }

    /// Coordinates wrap, so any position on an unbounded plane can be sampled.
    pub fn is_inked(&self, x: i64, y: i64) -> bool {
        let size = self.size as i64;
        let x = x.rem_euclid(size) as usize;
        let y = y.rem_euclid(size) as usize;
        self.tile[y * self.size + x]
    }
}

fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return ((p.0 - a.0).powi(2) + (p.1 - a.1).powi(2)).sqrt();
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0);
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}
