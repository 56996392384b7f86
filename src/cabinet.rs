use thiserror::Error;

use crate::types::PieceSpec;

/// Derived pieces with a dimension at or below this are dropped from
/// the cut list.
const MIN_PIECE_DIM: f64 = 0.1;

#[derive(Debug, Error, PartialEq)]
pub enum CabinetError {
    #[error("cabinet width too small for the selected board thickness")]
    WidthTooSmall,
    #[error("cabinet height too small for the selected board thickness")]
    HeightTooSmall,
    #[error("door width too small, increase width or reduce gap/thickness")]
    DoorsTooNarrow,
}

/// A two-door cabinet: outer dimensions in centimetres, board
/// thickness in millimetres. `frame_width` adds an internal face frame
/// (two uprights, two rails, one center stile) of that member width.
#[derive(Debug, Clone)]
pub struct Cabinet {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub thickness: f64,
    pub door_gap: f64,
    pub frame_width: Option<f64>,
}

struct Panel {
    label: &'static str,
    short_code: &'static str,
    color: &'static str,
    quantity: u32,
    dim1: f64,
    dim2: f64,
}

impl Cabinet {
    /// Expands the cabinet into its panel cut list. The doors share the
    /// front opening minus the configured gap; the back panel sits
    /// between the two side panels.
    pub fn pieces(&self) -> Result<Vec<PieceSpec>, CabinetError> {
        let t = self.thickness / 10.0;

        if self.width <= 2.0 * t {
            return Err(CabinetError::WidthTooSmall);
        }
        if self.height <= 2.0 * t {
            return Err(CabinetError::HeightTooSmall);
        }

        let inner_width = self.width - 2.0 * t;
        let door_width = (inner_width - self.door_gap) / 2.0;
        if door_width <= MIN_PIECE_DIM {
            return Err(CabinetError::DoorsTooNarrow);
        }

        let mut panels = vec![
            Panel {
                label: "Bottom",
                short_code: "B",
                color: "#dc3545",
                quantity: 1,
                dim1: self.width,
                dim2: self.depth,
            },
            Panel {
                label: "Top",
                short_code: "T",
                color: "#fd7e14",
                quantity: 1,
                dim1: self.width,
                dim2: self.depth,
            },
            Panel {
                label: "Side",
                short_code: "S",
                color: "#ffc107",
                quantity: 2,
                dim1: self.height,
                dim2: self.depth,
            },
            Panel {
                label: "Door",
                short_code: "D",
                color: "#6f42c1",
                quantity: 2,
                dim1: self.height,
                dim2: door_width,
            },
            Panel {
                label: "Back",
                short_code: "BK",
                color: "#0d6efd",
                quantity: 1,
                dim1: self.height,
                dim2: inner_width,
            },
        ];

        if let Some(fw) = self.frame_width
            && fw > 0.0
        {
            let frame_height = self.height - 2.0 * t;
            panels.push(Panel {
                label: "Frame Side",
                short_code: "FS",
                color: "#20c997",
                quantity: 2,
                dim1: frame_height,
                dim2: fw,
            });
            panels.push(Panel {
                label: "Frame Top",
                short_code: "FT",
                color: "#20c997",
                quantity: 1,
                dim1: inner_width - 2.0 * fw,
                dim2: fw,
            });
            panels.push(Panel {
                label: "Frame Bottom",
                short_code: "FB",
                color: "#20c997",
                quantity: 1,
                dim1: inner_width - 2.0 * fw,
                dim2: fw,
            });
            panels.push(Panel {
                label: "Center Stile",
                short_code: "CS",
                color: "#20c997",
                quantity: 1,
                dim1: frame_height - 2.0 * fw,
                dim2: fw,
            });
        }

        Ok(panels
            .into_iter()
            .filter(|p| p.dim1 > MIN_PIECE_DIM && p.dim2 > MIN_PIECE_DIM)
            .map(|p| PieceSpec {
                label: p.label.to_string(),
                quantity: p.quantity,
                dim1: p.dim1,
                dim2: p.dim2,
                color: p.color.to_string(),
                short_code: p.short_code.to_string(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packer::Packer;

    fn cabinet() -> Cabinet {
        Cabinet {
            width: 89.0,
            depth: 89.0,
            height: 180.0,
            thickness: 9.0,
            door_gap: 0.2,
            frame_width: Some(3.0),
        }
    }

    fn find<'a>(specs: &'a [PieceSpec], label: &str) -> &'a PieceSpec {
        specs
            .iter()
            .find(|s| s.label == label)
            .unwrap_or_else(|| panic!("missing piece {label}"))
    }

    #[test]
    fn test_basic_panels() {
        let specs = cabinet().pieces().unwrap();

        let bottom = find(&specs, "Bottom");
        assert_eq!((bottom.dim1, bottom.dim2, bottom.quantity), (89.0, 89.0, 1));

        let side = find(&specs, "Side");
        assert_eq!((side.dim1, side.dim2, side.quantity), (180.0, 89.0, 2));

        // (89 - 2*0.9 - 0.2) / 2
        let door = find(&specs, "Door");
        assert_eq!(door.quantity, 2);
        assert!((door.dim2 - 43.5).abs() < 1e-9);

        let back = find(&specs, "Back");
        assert!((back.dim2 - 87.2).abs() < 1e-9);
    }

    #[test]
    fn test_frame_panels() {
        let specs = cabinet().pieces().unwrap();

        let frame_side = find(&specs, "Frame Side");
        assert_eq!(frame_side.quantity, 2);
        assert!((frame_side.dim1 - 178.2).abs() < 1e-9);
        assert_eq!(frame_side.dim2, 3.0);

        let rail = find(&specs, "Frame Top");
        assert!((rail.dim1 - 81.2).abs() < 1e-9);

        let stile = find(&specs, "Center Stile");
        assert!((stile.dim1 - 172.2).abs() < 1e-9);

        assert!(specs.iter().all(|s| {
            !s.label.starts_with("Frame") && s.label != "Center Stile"
                || s.color == "#20c997"
        }));
    }

    #[test]
    fn test_no_frame() {
        let mut cab = cabinet();
        cab.frame_width = None;
        let specs = cab.pieces().unwrap();
        assert_eq!(specs.len(), 5);
        assert!(specs.iter().all(|s| !s.label.starts_with("Frame")));
    }

    #[test]
    fn test_width_too_small() {
        let mut cab = cabinet();
        cab.width = 1.5;
        cab.thickness = 9.0;
        assert_eq!(cab.pieces().unwrap_err(), CabinetError::WidthTooSmall);
    }

    #[test]
    fn test_height_too_small() {
        let mut cab = cabinet();
        cab.height = 1.0;
        assert_eq!(cab.pieces().unwrap_err(), CabinetError::HeightTooSmall);
    }

    #[test]
    fn test_doors_too_narrow() {
        let mut cab = cabinet();
        cab.door_gap = 88.0;
        assert_eq!(cab.pieces().unwrap_err(), CabinetError::DoorsTooNarrow);
    }

    #[test]
    fn test_degenerate_frame_pieces_filtered() {
        // Rails would be 87.2 - 2*43.6 = 0 wide, so only the frame
        // uprights survive the filter.
        let mut cab = cabinet();
        cab.frame_width = Some(43.6);
        let specs = cab.pieces().unwrap();
        assert!(specs.iter().any(|s| s.label == "Frame Side"));
        assert!(specs.iter().all(|s| s.label != "Frame Top"));
        assert!(specs.iter().all(|s| s.label != "Frame Bottom"));
    }

    #[test]
    fn test_cut_list_packs_end_to_end() {
        let specs = cabinet().pieces().unwrap();
        let total: u32 = specs.iter().map(|s| s.quantity).sum();
        let sheets = Packer::new(specs, 244.0, 122.0, 3.0).pack().unwrap();
        let placed: usize = sheets.iter().map(|s| s.pieces.len()).sum();
        assert_eq!(placed as u32, total);
    }
}
