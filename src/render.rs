use crate::sheet::Sheet;

const MAX_COLS: f64 = 80.0;
const MAX_ROWS: f64 = 40.0;

/// Draws one sheet as a character grid: the sheet border, a box per
/// placed piece, and a short-code+id label centered in boxes with room
/// for it.
pub fn render_sheet(sheet: &Sheet, sheet_w: f64, sheet_h: f64) -> String {
    let scale = f64::min(MAX_COLS / sheet_w, MAX_ROWS / sheet_h);
    let grid_w = (sheet_w * scale).round() as usize;
    let grid_h = (sheet_h * scale).round() as usize;

    if grid_w == 0 || grid_h == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; grid_w + 1]; grid_h + 1];
    draw_box(&mut grid, 0, 0, grid_w, grid_h);

    for p in &sheet.pieces {
        let sx = (p.x * scale).round() as usize;
        let sy = (p.y * scale).round() as usize;
        let sw = (p.w * scale).round() as usize;
        let sh = (p.h * scale).round() as usize;

        if sw == 0 || sh == 0 {
            continue;
        }

        draw_box(&mut grid, sx, sy, sw, sh);

        let label = if p.short_code.is_empty() {
            p.id.to_string()
        } else {
            format!("{}{}", p.short_code, p.id)
        };
        let chars: Vec<char> = label.chars().collect();

        if sw > 2 && sh > 0 {
            let cx = sx + sw / 2;
            let cy = sy + sh / 2;
            let start_x = cx.saturating_sub(chars.len() / 2);

            for (i, &ch) in chars.iter().enumerate() {
                let x = start_x + i;
                if x > sx && x < sx + sw && cy > sy && cy < sy + sh {
                    grid[cy][x] = ch;
                }
            }
        }
    }

    let mut out = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn draw_box(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    let rows = grid.len();
    let cols = if rows > 0 { grid[0].len() } else { return };

    let merge = |cell: char, edge: char| -> char {
        // Crossing edges become junctions.
        let crossing = match edge {
            '-' => cell == '|',
            '|' => cell == '-',
            _ => false,
        };
        if crossing || cell == '+' { '+' } else { edge }
    };

    for i in x..=x + w {
        if i >= cols {
            continue;
        }
        if y < rows {
            grid[y][i] = merge(grid[y][i], '-');
        }
        if y + h < rows {
            grid[y + h][i] = merge(grid[y + h][i], '-');
        }
    }

    for j in y..=y + h {
        if j >= rows {
            continue;
        }
        if x < cols {
            grid[j][x] = merge(grid[j][x], '|');
        }
        if x + w < cols {
            grid[j][x + w] = merge(grid[j][x + w], '|');
        }
    }

    for &cx in &[x, x + w] {
        for &cy in &[y, y + h] {
            if cy < rows && cx < cols {
                grid[cy][cx] = '+';
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packer::Packer;
    use crate::types::PieceSpec;

    fn pack_one(label: &str, code: &str, dim1: f64, dim2: f64) -> Sheet {
        let spec = PieceSpec {
            label: label.to_string(),
            quantity: 1,
            dim1,
            dim2,
            color: String::new(),
            short_code: code.to_string(),
        };
        Packer::new(vec![spec], 244.0, 122.0, 0.0)
            .pack()
            .unwrap()
            .remove(0)
    }

    #[test]
    fn test_render_full_sheet_piece() {
        let sheet = pack_one("Back", "BK", 244.0, 122.0);
        let out = render_sheet(&sheet, 244.0, 122.0);
        assert!(out.contains('+'));
        assert!(out.contains('-'));
        assert!(out.contains('|'));
        assert!(out.contains("BK1"));
    }

    #[test]
    fn test_render_labels_by_id() {
        let sheet = pack_one("Door", "", 200.0, 100.0);
        let out = render_sheet(&sheet, 244.0, 122.0);
        assert!(out.contains('1'));
    }

    #[test]
    fn test_render_empty_sheet_keeps_border() {
        let empty: Sheet = serde_json::from_str(r#"{"id":1,"pieces":[]}"#).unwrap();
        let out = render_sheet(&empty, 244.0, 122.0);
        assert!(out.contains('+'));
    }
}
