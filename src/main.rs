use clap::{Parser, Subcommand};

use cabinet_cut::cabinet::Cabinet;
use cabinet_cut::packer::Packer;
use cabinet_cut::render;
use cabinet_cut::summary::summarize;
use cabinet_cut::types::PieceSpec;

#[derive(Parser)]
#[command(
    name = "cabinet_cut",
    about = "Panel cutting layout calculator for cabinet builds"
)]
struct Cli {
    /// Sheet dimensions in cm (WxH, e.g. 244x122)
    #[arg(long, default_value = "244x122")]
    sheet: String,

    /// Blade kerf width in mm
    #[arg(long, default_value_t = 3.0)]
    kerf: f64,

    /// Price per sheet
    #[arg(long, default_value_t = 0.0)]
    price: f64,

    /// Show ASCII layout of each sheet
    #[arg(long)]
    layout: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pack an explicit piece list
    Pack {
        /// Pieces as LABEL:D1xD2:qty (e.g. Door:180x43.5:2)
        #[arg(num_args = 1..)]
        pieces: Vec<String>,
    },
    /// Derive the panel list for a two-door cabinet, then pack it
    Cabinet {
        /// Outer width in cm
        #[arg(long)]
        width: f64,

        /// Outer depth in cm
        #[arg(long)]
        depth: f64,

        /// Outer height in cm
        #[arg(long)]
        height: f64,

        /// Board thickness in mm
        #[arg(long, default_value_t = 9.0)]
        thickness: f64,

        /// Gap between the two doors in cm
        #[arg(long, default_value_t = 0.2)]
        door_gap: f64,

        /// Face frame member width in cm; omit for no frame
        #[arg(long)]
        frame_width: Option<f64>,
    },
}

fn parse_dimensions(s: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("invalid dimensions '{}', expected WxH", s));
    }
    let w = parts[0]
        .parse::<f64>()
        .map_err(|_| format!("invalid width in '{}'", s))?;
    let h = parts[1]
        .parse::<f64>()
        .map_err(|_| format!("invalid height in '{}'", s))?;
    if !(w > 0.0) || !(h > 0.0) {
        return Err(format!("dimensions must be positive in '{}'", s));
    }
    Ok((w, h))
}

fn parse_piece(s: &str) -> Result<PieceSpec, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("invalid piece '{}', expected LABEL:D1xD2:qty", s));
    }
    let (dim1, dim2) = parse_dimensions(parts[1])?;
    let quantity = parts[2]
        .parse::<u32>()
        .map_err(|_| format!("invalid quantity in '{}'", s))?;
    Ok(PieceSpec {
        label: parts[0].to_string(),
        quantity,
        dim1,
        dim2,
        color: String::new(),
        short_code: parts[0].chars().take(1).collect(),
    })
}

fn main() {
    let cli = Cli::parse();

    let (sheet_w, sheet_h) = parse_dimensions(&cli.sheet).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let specs: Vec<PieceSpec> = match &cli.command {
        Command::Pack { pieces } => pieces
            .iter()
            .map(|p| parse_piece(p))
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }),
        Command::Cabinet {
            width,
            depth,
            height,
            thickness,
            door_gap,
            frame_width,
        } => {
            let cabinet = Cabinet {
                width: *width,
                depth: *depth,
                height: *height,
                thickness: *thickness,
                door_gap: *door_gap,
                frame_width: *frame_width,
            };
            let specs = cabinet.pieces().unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            println!("Cut list:");
            for s in &specs {
                println!("  {} {:.1}x{:.1} x{}", s.label, s.dim1, s.dim2, s.quantity);
            }
            println!();
            specs
        }
    };

    let sheets = Packer::new(specs, sheet_w, sheet_h, cli.kerf)
        .pack()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    for sheet in &sheets {
        println!("Sheet {}:", sheet.id);
        for p in &sheet.pieces {
            let rot = if p.is_rotated() { " [rotated]" } else { "" };
            println!("  {} @ ({:.1}, {:.1}){}", p, p.x, p.y, rot);
        }
        if cli.layout {
            print!("{}", render::render_sheet(sheet, sheet_w, sheet_h));
        }
        println!();
    }

    let summary = summarize(&sheets, sheet_w, sheet_h, cli.price);
    println!(
        "Summary: {} sheet{} used, {:.1}% efficiency, {:.1} cm2 waste, total {:.2}",
        summary.sheet_count,
        if summary.sheet_count == 1 { "" } else { "s" },
        summary.efficiency,
        summary.waste_area,
        summary.total_price,
    );
}
