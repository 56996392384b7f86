use serde::{Deserialize, Serialize};

use crate::types::{PieceInstance, PlacedPiece};

/// Remainder strips narrower than this are dropped rather than tracked
/// as free space.
const MIN_REMAINDER: f64 = 0.1;

/// Unused space within a sheet.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FreeRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl FreeRect {
    pub fn area(&self) -> f64 {
        self.w * self.h
    }
}

enum Fit {
    No,
    Normal,
    Rotated,
}

/// One stock board and the pieces committed to it. `pieces` is in
/// placement order; the free-rectangle list and the kerf allowance are
/// working state, not part of the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub id: u32,
    pub pieces: Vec<PlacedPiece>,
    #[serde(skip)]
    pub(crate) free_rects: Vec<FreeRect>,
    #[serde(skip)]
    kerf: f64,
}

impl Sheet {
    /// An empty sheet starts with a single free rectangle covering the
    /// whole surface. `kerf` is already in sheet units.
    pub(crate) fn new(id: u32, width: f64, height: f64, kerf: f64) -> Self {
        Self {
            id,
            pieces: Vec::new(),
            free_rects: vec![FreeRect {
                x: 0.0,
                y: 0.0,
                w: width,
                h: height,
            }],
            kerf,
        }
    }

    /// Attempts to fit one piece into the smallest free rectangle that
    /// accepts it, preferring the supplied orientation over the rotated
    /// one. Returns false when no rectangle admits the piece either way.
    pub(crate) fn try_place(&mut self, piece: &PieceInstance) -> bool {
        // Smallest rectangle first, so large free spans survive for the
        // pieces still to come. Re-sorted on every attempt because the
        // split below appends out of order.
        self.free_rects
            .sort_by(|a, b| a.area().total_cmp(&b.area()));

        for i in 0..self.free_rects.len() {
            let rect = self.free_rects[i];
            let (w, h) = match self.fit(piece.w, piece.h, &rect) {
                Fit::Normal => (piece.w, piece.h),
                Fit::Rotated => (piece.h, piece.w),
                Fit::No => continue,
            };

            self.pieces.push(PlacedPiece {
                id: piece.id,
                label: piece.label.clone(),
                color: piece.color.clone(),
                short_code: piece.short_code.clone(),
                x: rect.x,
                y: rect.y,
                w,
                h,
                original_dim1: piece.w,
                original_dim2: piece.h,
            });

            // Order-preserving removal keeps equal-area ties stable
            // across the re-sort above.
            self.free_rects.remove(i);
            self.split(&rect, w, h);
            return true;
        }
        false
    }

    fn fit(&self, w: f64, h: f64, rect: &FreeRect) -> Fit {
        let w_kerf = w + self.kerf;
        let h_kerf = h + self.kerf;
        if w_kerf <= rect.w && h_kerf <= rect.h {
            Fit::Normal
        } else if h_kerf <= rect.w && w_kerf <= rect.h {
            Fit::Rotated
        } else {
            Fit::No
        }
    }

    /// Splits the consumed rectangle into a strip right of the piece
    /// (only as tall as the piece) and a strip below it spanning the
    /// full rectangle width, each separated by the kerf allowance. The
    /// full-width below strip is the historical split this tool has
    /// always produced; downstream layouts depend on it, so it stays.
    fn split(&mut self, rect: &FreeRect, placed_w: f64, placed_h: f64) {
        let remain_w = rect.w - placed_w - self.kerf;
        let remain_h = rect.h - placed_h - self.kerf;

        if remain_w > MIN_REMAINDER {
            self.free_rects.push(FreeRect {
                x: rect.x + placed_w + self.kerf,
                y: rect.y,
                w: remain_w,
                h: placed_h,
            });
        }
        if remain_h > MIN_REMAINDER {
            self.free_rects.push(FreeRect {
                x: rect.x,
                y: rect.y + placed_h + self.kerf,
                w: rect.w,
                h: remain_h,
            });
        }
    }
}
