use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::fmt::SubscriberBuilder;
use trackshape::hull::{build_convex_hull_with, HullStrategy};
use trackshape::ident::{generate_id, set_generator, RandomIdGenerator};
use trackshape::metrics::{shape_summary_with, ShapeSummary};
use trackshape::ShapeCfg;

mod input;
mod provenance;

use input::{read_trajectory, Columns};
use provenance::Payload;

#[derive(Parser)]
#[command(name = "trackshape")]
#[command(about = "Shape descriptors for geographic trajectories")]
struct Cmd {
    /// Optional run tag; propagated to outputs and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Compute area, eccentricity, aspect ratio and radius of gyration
    Metrics {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
        #[arg(long, default_value = "lon")]
        lon_col: String,
        #[arg(long, default_value = "lat")]
        lat_col: String,
        /// Sphere radius in km (mean Earth radius if omitted)
        #[arg(long)]
        radius_km: Option<f64>,
    },
    /// Write the convex hull vertices and the strategy used
    Hull {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
        #[arg(long, default_value = "lon")]
        lon_col: String,
        #[arg(long, default_value = "lat")]
        lat_col: String,
    },
    /// Print identifiers from the identifier service
    Id {
        #[arg(long, default_value_t = 1)]
        count: usize,
        /// Install a seeded generator first (reproducible ids)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Metrics {
            input,
            out,
            lon_col,
            lat_col,
            radius_km,
        } => {
            let cols = Columns {
                lon: &lon_col,
                lat: &lat_col,
            };
            metrics(&input, &out, &cols, radius_km, cmd.tag)
        }
        Action::Hull {
            input,
            out,
            lon_col,
            lat_col,
        } => {
            let cols = Columns {
                lon: &lon_col,
                lat: &lat_col,
            };
            hull(&input, &out, &cols, cmd.tag)
        }
        Action::Id { count, seed } => ids(count, seed),
        Action::Report => report(cmd.tag),
    }
}

#[derive(Serialize)]
struct SummaryOut {
    points: usize,
    centroid: [f64; 2],
    hull_vertices: usize,
    strategy: String,
    area_km2: f64,
    eccentricity: f64,
    aspect_ratio: f64,
    radius_of_gyration_km: f64,
}

impl From<&ShapeSummary> for SummaryOut {
    fn from(s: &ShapeSummary) -> Self {
        Self {
            points: s.points,
            centroid: [s.centroid.lon(), s.centroid.lat()],
            hull_vertices: s.hull_vertices,
            strategy: strategy_name(s.strategy),
            area_km2: s.area_km2,
            eccentricity: s.eccentricity,
            aspect_ratio: s.aspect_ratio,
            radius_of_gyration_km: s.radius_of_gyration_km,
        }
    }
}

#[derive(Serialize)]
struct HullOut {
    strategy: String,
    /// `[lon, lat]` in CCW order; a pole-enclosing hull ends with the pole.
    vertices: Vec<[f64; 2]>,
}

fn strategy_name(s: HullStrategy) -> String {
    match s {
        HullStrategy::Standard => "standard".into(),
        HullStrategy::PoleEnclosing(pole) => format!("pole_enclosing_{pole:?}").to_lowercase(),
    }
}

fn shape_cfg(radius_km: Option<f64>) -> Result<ShapeCfg> {
    let mut cfg = ShapeCfg::default();
    if let Some(r) = radius_km {
        cfg.earth_radius_km = r;
    }
    cfg.validate().context("--radius-km")?;
    Ok(cfg)
}

fn metrics(input: &str, out: &str, cols: &Columns<'_>, radius_km: Option<f64>, tag: Option<String>) -> Result<()> {
    tracing::info!(input, out, tag = ?tag, "metrics");
    let cfg = shape_cfg(radius_km)?;
    let t = read_trajectory(input, cols)?;
    let summary = shape_summary_with(&t, &cfg).with_context(|| format!("shape metrics of {input}"))?;
    write_json(out, &SummaryOut::from(&summary))?;
    let params = serde_json::json!({
        "input": input,
        "lon_col": cols.lon,
        "lat_col": cols.lat,
        "earth_radius_km": cfg.earth_radius_km,
    });
    provenance::write_sidecar(out, Payload::new(params).with_tag(tag))?;
    Ok(())
}

fn hull(input: &str, out: &str, cols: &Columns<'_>, tag: Option<String>) -> Result<()> {
    tracing::info!(input, out, tag = ?tag, "hull");
    let t = read_trajectory(input, cols)?;
    let h = build_convex_hull_with(t.points(), &ShapeCfg::default())
        .with_context(|| format!("convex hull of {input}"))?;
    let doc = HullOut {
        strategy: strategy_name(h.strategy()),
        vertices: h.vertices().iter().map(|p| [p.lon(), p.lat()]).collect(),
    };
    write_json(out, &doc)?;
    let params = serde_json::json!({
        "input": input,
        "lon_col": cols.lon,
        "lat_col": cols.lat,
    });
    provenance::write_sidecar(out, Payload::new(params).with_tag(tag))?;
    Ok(())
}

fn ids(count: usize, seed: Option<u64>) -> Result<()> {
    if let Some(seed) = seed {
        set_generator(Arc::new(RandomIdGenerator::seeded(seed)));
    }
    for _ in 0..count {
        println!("{}", generate_id());
    }
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let doc = provenance::document(&Payload::new(serde_json::json!({})).with_tag(tag), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn write_json<T: Serialize>(out: &str, value: &T) -> Result<()> {
    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out_path, serde_json::to_vec_pretty(value)?).with_context(|| format!("writing {out}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn metrics_writes_summary_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("track.csv");
        fs::write(&input, "lon,lat\n10,10\n11,10\n11,11\n10,11\n10.5,10.5\n").unwrap();
        let out = dir.path().join("out/shape.json");
        let cols = Columns {
            lon: "lon",
            lat: "lat",
        };
        metrics(input.to_str().unwrap(), out.to_str().unwrap(), &cols, None, None).unwrap();

        let parsed: Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(parsed["points"], 5);
        assert_eq!(parsed["hull_vertices"], 4);
        assert_eq!(parsed["strategy"], "standard");
        assert!(parsed["area_km2"].as_f64().unwrap() > 10_000.0);
        assert!(dir.path().join("out/shape.provenance.json").exists());
    }

    #[test]
    fn metrics_rejects_bad_radius_before_reading() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("shape.json");
        let cols = Columns {
            lon: "lon",
            lat: "lat",
        };
        for radius in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = metrics("missing.csv", out.to_str().unwrap(), &cols, Some(radius), None)
                .unwrap_err();
            assert!(format!("{err:#}").contains("radius"), "{err:#}");
        }
        assert!(!out.exists());
    }

    #[test]
    fn hull_reports_pole_strategy() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("polar.csv");
        fs::write(&input, "lon,lat\n0,85\n120,85\n-120,85\n").unwrap();
        let out = dir.path().join("hull.json");
        let cols = Columns {
            lon: "lon",
            lat: "lat",
        };
        hull(input.to_str().unwrap(), out.to_str().unwrap(), &cols, Some("t".into())).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(parsed["strategy"], "pole_enclosing_north");
        assert_eq!(parsed["vertices"].as_array().unwrap().len(), 4);
        assert_eq!(parsed["vertices"][3][1], 90.0);
    }
}
