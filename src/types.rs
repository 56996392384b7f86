use serde::{Deserialize, Serialize};

/// A piece type requested by the caller: two planar dimensions and a
/// quantity. The dimensions carry no orientation; the packer may swap
/// them when placing. `color` and `short_code` are opaque display
/// metadata, passed through unchanged to every placed piece.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieceSpec {
    pub label: String,
    pub quantity: u32,
    pub dim1: f64,
    pub dim2: f64,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub short_code: String,
}

/// One physical occurrence of a spec, produced by quantity expansion.
/// Dimensions stay as supplied; rotation is decided at placement time.
#[derive(Debug, Clone)]
pub(crate) struct PieceInstance {
    pub id: u32,
    pub w: f64,
    pub h: f64,
    pub area: f64,
    pub label: String,
    pub color: String,
    pub short_code: String,
}

/// A piece committed to a position on a sheet. `w`/`h` are the occupied
/// rectangle and may be swapped relative to `original_dim1`/
/// `original_dim2`, which always repeat the spec's dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub id: u32,
    pub label: String,
    pub color: String,
    pub short_code: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub original_dim1: f64,
    pub original_dim2: f64,
}

impl PlacedPiece {
    /// True when the piece was turned 90 degrees to fit. Placement only
    /// swaps the dimensions when the supplied orientation does not fit,
    /// so square pieces are never reported rotated.
    pub fn is_rotated(&self) -> bool {
        self.w != self.original_dim1 || self.h != self.original_dim2
    }
}

impl std::fmt::Display for PlacedPiece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:.1}x{:.1}", self.label, self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(w: f64, h: f64, d1: f64, d2: f64) -> PlacedPiece {
        PlacedPiece {
            id: 1,
            label: "Side".to_string(),
            color: String::new(),
            short_code: "S".to_string(),
            x: 0.0,
            y: 0.0,
            w,
            h,
            original_dim1: d1,
            original_dim2: d2,
        }
    }

    #[test]
    fn test_rotation_detected_from_dims() {
        assert!(!placed(180.0, 89.0, 180.0, 89.0).is_rotated());
        assert!(placed(89.0, 180.0, 180.0, 89.0).is_rotated());
    }

    #[test]
    fn test_square_never_rotated() {
        assert!(!placed(60.0, 60.0, 60.0, 60.0).is_rotated());
    }

    #[test]
    fn test_display_one_decimal() {
        let p = placed(43.5, 180.0, 43.5, 180.0);
        assert_eq!(p.to_string(), "Side 43.5x180.0");
    }
}
