use serde::{Deserialize, Serialize};

use crate::sheet::Sheet;

/// Aggregate material usage for a packing result. All areas are in the
/// sheet unit squared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutSummary {
    pub sheet_count: usize,
    pub total_price: f64,
    pub pieces_area: f64,
    pub sheets_area: f64,
    pub waste_area: f64,
    /// Share of the purchased sheet area covered by pieces, clamped to
    /// 0..=100 and rounded to one decimal.
    pub efficiency: f64,
}

pub fn summarize(sheets: &[Sheet], sheet_w: f64, sheet_h: f64, price_per_sheet: f64) -> CutSummary {
    let sheet_count = sheets.len();
    let sheets_area = sheet_count as f64 * sheet_w * sheet_h;
    let pieces_area: f64 = sheets
        .iter()
        .flat_map(|s| &s.pieces)
        .map(|p| p.original_dim1 * p.original_dim2)
        .sum();

    let efficiency = if sheets_area == 0.0 {
        0.0
    } else {
        ((pieces_area / sheets_area * 100.0).clamp(0.0, 100.0) * 10.0).round() / 10.0
    };

    CutSummary {
        sheet_count,
        total_price: sheet_count as f64 * price_per_sheet,
        pieces_area,
        sheets_area,
        waste_area: sheets_area - pieces_area,
        efficiency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packer::Packer;
    use crate::types::PieceSpec;

    fn spec(label: &str, dim1: f64, dim2: f64, quantity: u32) -> PieceSpec {
        PieceSpec {
            label: label.to_string(),
            quantity,
            dim1,
            dim2,
            color: String::new(),
            short_code: String::new(),
        }
    }

    #[test]
    fn test_single_sheet_summary() {
        let sheets = Packer::new(vec![spec("A", 122.0, 61.0, 1)], 244.0, 122.0, 0.0)
            .pack()
            .unwrap();
        let summary = summarize(&sheets, 244.0, 122.0, 35000.0);

        assert_eq!(summary.sheet_count, 1);
        assert_eq!(summary.total_price, 35000.0);
        assert_eq!(summary.pieces_area, 122.0 * 61.0);
        assert_eq!(summary.sheets_area, 244.0 * 122.0);
        assert_eq!(summary.waste_area, summary.sheets_area - summary.pieces_area);
        // 7442 / 29768 = 25.0%
        assert_eq!(summary.efficiency, 25.0);
    }

    #[test]
    fn test_rotation_does_not_change_piece_area() {
        // 100x240 is placed rotated; the summary still charges the
        // original dimensions.
        let sheets = Packer::new(vec![spec("R", 100.0, 240.0, 1)], 244.0, 122.0, 3.0)
            .pack()
            .unwrap();
        let summary = summarize(&sheets, 244.0, 122.0, 0.0);
        assert_eq!(summary.pieces_area, 24000.0);
    }

    #[test]
    fn test_empty_result() {
        let summary = summarize(&[], 244.0, 122.0, 35000.0);
        assert_eq!(summary.sheet_count, 0);
        assert_eq!(summary.total_price, 0.0);
        assert_eq!(summary.sheets_area, 0.0);
        assert_eq!(summary.efficiency, 0.0);
    }

    #[test]
    fn test_efficiency_one_decimal() {
        let sheets = Packer::new(vec![spec("A", 100.0, 100.0, 1)], 244.0, 122.0, 0.0)
            .pack()
            .unwrap();
        let summary = summarize(&sheets, 244.0, 122.0, 0.0);
        // 10000 / 29768 = 33.593... -> 33.6
        assert_eq!(summary.efficiency, 33.6);
    }
}
