use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polyedit::prelude::*;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Headless driver for the polygon fixture editor")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate a level of random polygon fixtures
    Random {
        #[arg(long, default_value_t = 10)]
        count: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        out: String,
    },
    /// Summarize a level file
    Info {
        #[arg(long)]
        input: String,
    },
    /// Recenter every polygon onto its vertex centroid, in place
    Recenter {
        #[arg(long)]
        input: String,
        /// Output path; defaults to overwriting the input
        #[arg(long)]
        out: Option<String>,
    },
    /// Store a level file in a snapshot directory under a UTC timestamp key
    Snapshot {
        #[arg(long)]
        input: String,
        #[arg(long)]
        dir: String,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Random { count, seed, out } => random(count, seed, out),
        Action::Info { input } => info(input),
        Action::Recenter { input, out } => recenter(input, out),
        Action::Snapshot { input, dir } => snapshot(input, dir),
    }
}

fn load_session(input: &str) -> Result<EditorSession> {
    let data = std::fs::read_to_string(input).with_context(|| format!("reading {input}"))?;
    let mut session = EditorSession::new();
    session
        .load_json(&data)
        .with_context(|| format!("parsing {input}"))?;
    Ok(session)
}

fn write_level(session: &EditorSession, out: &str) -> Result<()> {
    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out_path, session.to_json()?)?;
    Ok(())
}

fn random(count: usize, seed: u64, out: String) -> Result<()> {
    tracing::info!(count, seed, out, "random");
    let mut session = EditorSession::new();
    for index in 0..count as u64 {
        let poly = draw_fixture_radial(RadialCfg::default(), ReplayToken { seed, index });
        let mut shape = Shape::new(ShapeKind::Polygon(poly));
        shape.transform.position = Vec2::new(
            (index % 5) as f64 * 160.0,
            (index / 5) as f64 * 160.0,
        );
        session.add_shape(shape);
    }
    write_level(&session, &out)?;
    Ok(())
}

fn info(input: String) -> Result<()> {
    let session = load_session(&input)?;
    let mut polygons = 0usize;
    let mut vertices = 0usize;
    let mut others = 0usize;
    for shape in session.shapes() {
        match shape.as_polygon() {
            Some(p) => {
                polygons += 1;
                vertices += p.vertex_count();
            }
            None => others += 1,
        }
    }
    let summary = serde_json::json!({
        "shapes": session.shapes().len(),
        "polygons": polygons,
        "polygon_vertices": vertices,
        "other_shapes": others,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn recenter(input: String, out: Option<String>) -> Result<()> {
    let out = out.unwrap_or_else(|| input.clone());
    tracing::info!(input, out, "recenter");
    let mut session = load_session(&input)?;
    let mut recentered = 0usize;
    for id in 0..session.shapes().len() {
        if session.recenter(id) {
            recentered += 1;
        }
    }
    tracing::info!(recentered, "polygons recentered");
    write_level(&session, &out)?;
    Ok(())
}

fn snapshot(input: String, dir: String) -> Result<()> {
    let session = load_session(&input)?;
    let mut store = FileStore::new(&dir).with_context(|| format!("opening store {dir}"))?;
    let key = chrono::Utc::now().format("%Y%m%dT%H%M%S").to_string();
    session
        .save_snapshot(&mut store, &key)
        .with_context(|| format!("saving snapshot {key}"))?;
    println!("{key}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_level_creates_parent_dirs_and_round_trips() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested/level.json");
        let mut session = EditorSession::new();
        let poly = draw_fixture_radial(RadialCfg::default(), ReplayToken { seed: 1, index: 0 });
        session.add_shape(Shape::new(ShapeKind::Polygon(poly)));
        write_level(&session, out.to_str().unwrap()).unwrap();

        let back = load_session(out.to_str().unwrap()).unwrap();
        assert_eq!(back.shapes(), session.shapes());
    }

    #[test]
    fn load_session_reports_malformed_input() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not a level").unwrap();
        assert!(load_session(path.to_str().unwrap()).is_err());
    }
}
