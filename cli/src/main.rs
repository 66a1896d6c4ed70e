use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use anyhow::{Context, Result};

use modelstore_backend::db::DbManager;
use modelstore_backend::db::model_models::{CircularTorus, NewCircularTorus};
use modelstore_backend::mesh::{circular_torus_mesh, TorusEnds, DEFAULT_DEFLECTION};
use modelstore_backend::types::{color_components, Point};
use modelstore_backend::{get_create_model_db_path, model_db_exists};

/// Parses a point argument given as "X,Y,Z".
fn parse_point(s: &str) -> Result<Point, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("Expected X,Y,Z but got: {}", s));
    }
    let mut coords = [0.0f64; 3];
    for (i, part) in parts.iter().enumerate() {
        coords[i] = part
            .trim()
            .parse()
            .map_err(|e| format!("Invalid coordinate '{}': {}", part, e))?;
    }
    Ok(Point::new(coords[0], coords[1], coords[2]))
}

/// Parses a color argument, either decimal or hex with a 0x prefix.
fn parse_color(s: &str) -> Result<i32, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        i32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex color '{}': {}", s, e))
    } else {
        s.parse().map_err(|e| format!("Invalid color '{}': {}", s, e))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Model store CLI", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Optional path to the model store directory.
    /// If not provided, the MODELSTORE_DIR environment variable will be used.
    #[arg(long, global = true, value_name = "DIRECTORY_PATH", env = "MODELSTORE_DIR")]
    modelstore_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the model database if missing and bring its schema up to date
    Init,

    /// Insert a circular torus record
    #[command(arg_required_else_help = true)]
    AddTorus {
        /// Torus center in model space
        #[arg(long, value_name = "X,Y,Z", value_parser = parse_point)]
        center: Point,

        /// Start point of the swept angle
        #[arg(long, value_name = "X,Y,Z", value_parser = parse_point)]
        start_pnt: Point,

        /// Axis direction of the torus' defining circle
        #[arg(long, value_name = "X,Y,Z", value_parser = parse_point)]
        normal: Point,

        /// Tube radius at the start of the sweep
        #[arg(long)]
        start_radius: f64,

        /// Tube radius at the end of the sweep
        #[arg(long)]
        end_radius: f64,

        /// Sweep angle in radians
        #[arg(long)]
        angle: f64,

        /// Encoded display color, decimal or hex (e.g. 0xFF0000)
        #[arg(long, value_parser = parse_color, default_value = "0")]
        color: i32,
    },

    /// List stored records
    List {
        /// Print the records as a JSON array
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print one record's fields
    #[command(arg_required_else_help = true)]
    Show {
        #[arg(value_name = "ID")]
        id: i32,
    },

    /// Delete a record
    #[command(arg_required_else_help = true)]
    Remove {
        #[arg(value_name = "ID")]
        id: i32,
    },

    /// Build the display mesh for a record and write it as Wavefront OBJ
    #[command(arg_required_else_help = true)]
    Tessellate {
        #[arg(value_name = "ID")]
        id: i32,

        /// Output OBJ file path
        #[arg(long, value_name = "FILE_PATH")]
        out: PathBuf,

        /// Chord deflection tolerance
        #[arg(long, default_value_t = DEFAULT_DEFLECTION)]
        deflection: f64,

        /// Leave the start cross-section of a partial sweep open
        #[arg(long, default_value_t = false)]
        no_start_cap: bool,

        /// Leave the end cross-section of a partial sweep open
        #[arg(long, default_value_t = false)]
        no_end_cap: bool,
    },
}

fn print_torus(torus: &CircularTorus) {
    let (r, g, b) = color_components(torus.color);
    println!("circular_torus id={}", torus.id);
    println!("  center:       ({}, {}, {})", torus.center_x, torus.center_y, torus.center_z);
    println!("  start_pnt:    ({}, {}, {})", torus.start_pnt_x, torus.start_pnt_y, torus.start_pnt_z);
    println!("  normal:       ({}, {}, {})", torus.normal_x, torus.normal_y, torus.normal_z);
    println!("  start_radius: {}", torus.start_radius);
    println!("  end_radius:   {}", torus.end_radius);
    println!("  angle:        {}", torus.angle);
    println!("  color:        #{:02X}{:02X}{:02X}", r, g, b);
}

fn cmd_init() -> Result<()> {
    let existed = model_db_exists();
    // Opening the manager creates the database and runs pending migrations.
    let _dbm = DbManager::new()?;
    let db_path = get_create_model_db_path()
        .map_err(|e| anyhow::anyhow!("Failed to resolve model db path: {}", e))?;
    if existed {
        println!("Model database up to date: {}", db_path.display());
    } else {
        println!("Created model database: {}", db_path.display());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_add_torus(
    center: Point,
    start_pnt: Point,
    normal: Point,
    start_radius: f64,
    end_radius: f64,
    angle: f64,
    color: i32,
) -> Result<()> {
    let dbm = DbManager::new()?;
    let new_torus =
        NewCircularTorus::from_parts(center, start_pnt, normal, start_radius, end_radius, angle, color);
    let torus = dbm.model.insert_circular_torus(&new_torus)?;
    println!("Inserted circular_torus id={}", torus.id);
    Ok(())
}

fn cmd_list(json: bool) -> Result<()> {
    let dbm = DbManager::new()?;
    if json {
        println!("{}", dbm.model.get_circular_toruses_json());
        return Ok(());
    }
    let items = dbm.model.get_circular_toruses();
    for torus in &items {
        println!(
            "{}: start_radius={} end_radius={} angle={} color=0x{:06X}",
            torus.id, torus.start_radius, torus.end_radius, torus.angle, torus.color
        );
    }
    println!("{} record(s)", items.len());
    Ok(())
}

fn cmd_show(id: i32) -> Result<()> {
    let dbm = DbManager::new()?;
    match dbm.model.get_circular_torus(id) {
        Some(torus) => {
            print_torus(&torus);
            Ok(())
        }
        None => anyhow::bail!("No circular_torus record with id {}", id),
    }
}

fn cmd_remove(id: i32) -> Result<()> {
    let dbm = DbManager::new()?;
    if dbm.model.delete_circular_torus(id)? {
        println!("Removed circular_torus id={}", id);
        Ok(())
    } else {
        anyhow::bail!("No circular_torus record with id {}", id)
    }
}

fn cmd_tessellate(
    id: i32,
    out: &PathBuf,
    deflection: f64,
    no_start_cap: bool,
    no_end_cap: bool,
) -> Result<()> {
    let dbm = DbManager::new()?;
    let torus = dbm
        .model
        .get_circular_torus(id)
        .ok_or_else(|| anyhow::anyhow!("No circular_torus record with id {}", id))?;

    let ends = TorusEnds {
        start: !no_start_cap,
        end: !no_end_cap,
    };
    let mesh = circular_torus_mesh(&torus, deflection, ends)
        .with_context(|| format!("Can't tessellate circular_torus id={}", id))?;

    let file = File::create(out)
        .with_context(|| format!("Can't create output file: {}", out.display()))?;
    let mut writer = BufWriter::new(file);
    mesh.write_obj(&mut writer)
        .with_context(|| format!("Failed to write OBJ: {}", out.display()))?;

    println!(
        "Wrote {} vertices, {} triangles to {}",
        mesh.vertices.len(),
        mesh.triangles.len(),
        out.display()
    );
    Ok(())
}

fn main() {
    // Attempt to load a .env file. This might define MODELSTORE_DIR if it's
    // not already in the environment. Clap will pick it up via env.
    dotenv().ok();

    let cli = Cli::parse();

    // A directory given with --modelstore-dir overrides the environment for
    // everything downstream (db path, log file location).
    if let Some(dir) = &cli.modelstore_dir {
        unsafe { env::set_var("MODELSTORE_DIR", dir); }
    }

    let command_result = match cli.command {
        Commands::Init => cmd_init(),

        Commands::AddTorus {
            center,
            start_pnt,
            normal,
            start_radius,
            end_radius,
            angle,
            color,
        } => cmd_add_torus(center, start_pnt, normal, start_radius, end_radius, angle, color),

        Commands::List { json } => cmd_list(json),

        Commands::Show { id } => cmd_show(id),

        Commands::Remove { id } => cmd_remove(id),

        Commands::Tessellate {
            id,
            out,
            deflection,
            no_start_cap,
            no_end_cap,
        } => cmd_tessellate(id, &out, deflection, no_start_cap, no_end_cap),
    };

    if let Err(e) = command_result {
        eprintln!("Error executing command: {}", e);
        exit(1);
    }
}
