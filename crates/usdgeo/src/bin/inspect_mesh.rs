//! Inspect what the reader extracts from one prim of a JSON scene.
//!
//! Prints the UV sets the stage offers, whether the prim passes the path
//! filter, the extraction summary and any diagnostics. Exits non-zero when
//! the extracted record is invalid.
//!
//! Run: `cargo run -p usdgeo --features test-tools --bin inspect_mesh -- <scene.json> <prim-path> [--uv NAME] [--frames 1,2,3] [--model PATH]`
//!
//! Set `RUST_LOG=usdgeo_extract=debug` for per-stage tracing.

use std::env;
use std::fs;

use tracing_subscriber::EnvFilter;
use usdgeo::scene::{MemoryStage, MeshAttribute, Prim};
use usdgeo::{ExtractRequest, GeoReader};

struct Args {
    scene: String,
    prim: String,
    uv_set: String,
    frames: Vec<i32>,
    model: Option<String>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!(
                "Usage: inspect_mesh <scene.json> <prim-path> [--uv NAME] [--frames 1,2,3] [--model PATH]"
            );
            std::process::exit(2);
        }
    };

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    }
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args, String> {
    let scene = raw.next().ok_or("Missing scene path")?;
    let prim = raw.next().ok_or("Missing prim path")?;
    let mut args = Args {
        scene,
        prim,
        uv_set: String::new(),
        frames: vec![1],
        model: None,
    };

    while let Some(flag) = raw.next() {
        let value = raw.next().ok_or_else(|| format!("Missing value for {flag}"))?;
        match flag.as_str() {
            "--uv" => args.uv_set = value,
            "--frames" => {
                args.frames = value
                    .split(',')
                    .filter(|s| !s.is_empty())
                    .map(|s| s.trim().parse::<i32>().map_err(|e| format!("Bad frame '{s}': {e}")))
                    .collect::<Result<_, _>>()?;
            }
            "--model" => args.model = Some(value),
            _ => return Err(format!("Unknown flag {flag}")),
        }
    }
    Ok(args)
}

fn run(args: &Args) -> Result<bool, String> {
    let json = fs::read_to_string(&args.scene)
        .map_err(|e| format!("Failed to read {}: {e}", args.scene))?;
    let stage: MemoryStage =
        serde_json::from_str(&json).map_err(|e| format!("Failed to parse {}: {e}", args.scene))?;
    if stage.is_empty() {
        return Err(format!("{} defines no prims", args.scene));
    }
    println!("Loaded {} prims from {}", stage.len(), args.scene);

    let prim = stage
        .prim(&args.prim)
        .ok_or_else(|| format!("No prim at {}", args.prim))?;
    let model = match &args.model {
        Some(path) => stage
            .prim(path)
            .ok_or_else(|| format!("No model prim at {path}"))?,
        None => prim,
    };

    let reader = GeoReader::from_env();

    println!("=== UV sets ===");
    let uv_sets = reader.uv_sets(stage.prims());
    if uv_sets.is_empty() {
        println!("(none)");
    }
    for (name, count) in &uv_sets {
        println!("{name}: {count}");
    }

    println!("\n=== {} ({}) ===", prim.path(), prim.type_name());
    println!("eligible: {}", reader.is_valid_node(&prim));
    for attr in MeshAttribute::ALL {
        let samples = prim.time_sample_count(attr);
        if samples > 0 {
            println!("{attr}: {samples} time samples");
        }
    }

    let request = ExtractRequest::new(args.frames.clone())
        .with_uv_set(args.uv_set.as_str())
        .keep_centered(args.model.is_some());
    let mut log = Vec::new();
    let mesh = reader.read_mesh(&prim, &model, &request, &mut log);

    println!("faces: {}", mesh.face_counts().len());
    println!("face-vertices: {}", mesh.vertex_indices().len());
    for frame in mesh.frames() {
        let points = mesh.vertices(frame).map_or(0, |v| v.len() / 3);
        println!("frame {frame}: {points} points");
    }
    println!("normals: {}", mesh.normals().len() / 3);
    println!("uvs: {}", mesh.uvs().len() / 2);
    let subdiv = mesh.subdivision();
    if subdiv.is_subdiv_mesh {
        println!(
            "subdivision: {} (boundary {}, face-varying {})",
            subdiv.scheme_name(),
            subdiv.interpolate_boundary.code(),
            subdiv.face_varying_linear_interpolation.code()
        );
    }

    for entry in &log {
        println!("diagnostic: {entry}");
    }

    let valid = mesh.is_valid();
    println!("valid: {valid}");
    Ok(valid)
}
