use thiserror::Error;

use crate::sheet::Sheet;
use crate::types::{PieceInstance, PieceSpec};

/// Kerf is supplied in millimetres while every other dimension is in
/// centimetres; placement works in centimetres throughout.
const KERF_SCALE: f64 = 10.0;

#[derive(Debug, Error)]
pub enum PackError {
    /// The piece cannot fit the sheet in either orientation, kerf
    /// included. Caught before any placement work begins.
    #[error("piece {label} ({dim1:.1}x{dim2:.1}) does not fit the sheet")]
    PieceTooLarge {
        label: String,
        dim1: f64,
        dim2: f64,
    },
    /// A piece that passed validation was still rejected by a fresh
    /// sheet. Signals broken placement math, not bad input.
    #[error("could not place piece {label}")]
    Unplaceable { label: String },
}

/// Greedy cutting-stock packer: pieces sorted by descending area are
/// placed first-fit across sheets, each sheet choosing the smallest
/// free rectangle that accepts the piece. Deterministic for a given
/// input order; makes no optimality claim.
pub struct Packer {
    sheet_w: f64,
    sheet_h: f64,
    kerf: f64,
    specs: Vec<PieceSpec>,
}

impl Packer {
    /// `kerf` is the saw blade width in millimetres; sheet dimensions
    /// share the piece unit (centimetres).
    pub fn new(specs: Vec<PieceSpec>, sheet_w: f64, sheet_h: f64, kerf: f64) -> Self {
        Self {
            sheet_w,
            sheet_h,
            kerf: kerf / KERF_SCALE,
            specs,
        }
    }

    /// Runs the whole packing: validation, expansion, placement. Either
    /// every requested piece ends up on a sheet or an error is returned
    /// and no sheets at all.
    pub fn pack(&self) -> Result<Vec<Sheet>, PackError> {
        let pieces = self.expand()?;

        let mut sheets: Vec<Sheet> = Vec::new();
        for piece in &pieces {
            if sheets.iter_mut().any(|s| s.try_place(piece)) {
                continue;
            }
            let id = sheets.len() as u32 + 1;
            let mut sheet = Sheet::new(id, self.sheet_w, self.sheet_h, self.kerf);
            if !sheet.try_place(piece) {
                return Err(PackError::Unplaceable {
                    label: piece.label.clone(),
                });
            }
            sheets.push(sheet);
        }
        Ok(sheets)
    }

    /// Expands quantities into individual instances with sequential ids
    /// spanning the whole run, sorted largest-area first. Every spec is
    /// checked against the sheet before any instance is created,
    /// including quantity-0 specs.
    fn expand(&self) -> Result<Vec<PieceInstance>, PackError> {
        let mut pieces = Vec::new();
        let mut next_id = 1u32;

        for spec in &self.specs {
            self.check_fits(spec)?;
            for _ in 0..spec.quantity {
                pieces.push(PieceInstance {
                    id: next_id,
                    w: spec.dim1,
                    h: spec.dim2,
                    area: spec.dim1 * spec.dim2,
                    label: spec.label.clone(),
                    color: spec.color.clone(),
                    short_code: spec.short_code.clone(),
                });
                next_id += 1;
            }
        }

        // Stable, so equal areas keep their expansion order.
        pieces.sort_by(|a, b| b.area.total_cmp(&a.area));
        Ok(pieces)
    }

    fn check_fits(&self, spec: &PieceSpec) -> Result<(), PackError> {
        let w = spec.dim1 + self.kerf;
        let h = spec.dim2 + self.kerf;
        let fits = (w <= self.sheet_h && h <= self.sheet_w)
            || (w <= self.sheet_w && h <= self.sheet_h);
        if fits {
            Ok(())
        } else {
            Err(PackError::PieceTooLarge {
                label: spec.label.clone(),
                dim1: spec.dim1,
                dim2: spec.dim2,
            })
        }
    }
}
