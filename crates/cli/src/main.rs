use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hullstep::api::{
    general_position, same_vertex_set, Algorithm, AlgorithmKind, BfpEngine, Driver, EngineCfg,
    Point, PointsCfg,
};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod points;
mod provenance;
mod report;

use report::{CompareReport, CompareRow, RunReport};

#[derive(Parser)]
#[command(name = "hullstep")]
#[command(about = "Step through planar convex-hull algorithms")]
struct Cmd {
    /// Log every engine step
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Drive one algorithm over a point file and write a JSON report
    Run {
        #[arg(long)]
        algo: AlgorithmKind,
        /// Points as .json ([[x, y], ...]), .csv or .parquet (columns x, y)
        #[arg(long)]
        input: PathBuf,
        /// Strip count for the bfp sampler
        #[arg(long, value_parser = parse_strips)]
        strips: Option<NonZeroUsize>,
        /// Report path; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
        /// Stop after this many steps even if the engine is not done
        #[arg(long)]
        max_steps: Option<usize>,
    },
    /// Write a seeded point set in general position
    Generate {
        #[arg(long)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Check every hull-producing algorithm against the naive engine
    Compare {
        #[arg(long)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Run {
            algo,
            input,
            strips,
            out,
            max_steps,
        } => run(algo, &input, strips, out.as_deref(), max_steps),
        Action::Generate { count, seed, out } => generate(count, seed, &out),
        Action::Compare { count, seed } => {
            let report = compare(count, seed)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

fn parse_strips(s: &str) -> std::result::Result<NonZeroUsize, String> {
    let k: NonZeroUsize = s.parse().map_err(|e| format!("{e}"))?;
    if k > BfpEngine::MAX_STRIPS {
        return Err(format!("at most {} strips", BfpEngine::MAX_STRIPS));
    }
    Ok(k)
}

fn run(
    algo: AlgorithmKind,
    input: &Path,
    strips: Option<NonZeroUsize>,
    out: Option<&Path>,
    max_steps: Option<usize>,
) -> Result<()> {
    tracing::info!(%algo, input = %input.display(), "run");
    let pts = points::load(input)?;
    let mut cfg = EngineCfg::default();
    if let Some(k) = strips {
        cfg.strips = k;
    }
    let report = drive(algo, pts, cfg, max_steps)?;
    let json = serde_json::to_vec_pretty(&report)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            provenance::write_sidecar(
                path,
                "run",
                serde_json::json!({
                    "algo": algo.name(),
                    "input": input.to_string_lossy(),
                    "strips": cfg.strips.get(),
                    "max_steps": max_steps,
                }),
            )?;
        }
        None => println!("{}", String::from_utf8_lossy(&json)),
    }
    Ok(())
}

/// Step the engine one unit at a time, recording each state label.
fn drive(
    algo: AlgorithmKind,
    pts: Vec<Point>,
    cfg: EngineCfg,
    max_steps: Option<usize>,
) -> Result<RunReport> {
    let mut driver = Driver::with_points(algo, cfg, pts);
    let mut states = vec![driver.engine().state_label()];
    let mut steps = 0usize;
    while !driver.engine().is_done() && max_steps.map_or(true, |m| steps < m) {
        driver
            .step()
            .with_context(|| format!("{algo} failed at step {}", steps + 1))?;
        steps += 1;
        let label = driver.engine().state_label();
        tracing::debug!(step = steps, state = label, "step");
        states.push(label);
    }
    if !driver.engine().is_done() {
        tracing::warn!(steps, "stopped before the engine finished");
    }
    tracing::info!(%algo, steps, "run finished");
    Ok(RunReport::new(driver.engine(), steps, states))
}

fn generate(count: usize, seed: u64, out: &Path) -> Result<()> {
    let pts = general_position(PointsCfg::with_count(count), seed)
        .with_context(|| format!("could not place {count} points in general position"))?;
    points::save(out, &pts)?;
    provenance::write_sidecar(
        out,
        "generate",
        serde_json::json!({ "count": count, "seed": seed }),
    )?;
    Ok(())
}

fn compare(count: usize, seed: u64) -> Result<CompareReport> {
    let pts = general_position(PointsCfg::with_count(count), seed)
        .with_context(|| format!("could not place {count} points in general position"))?;
    let mut oracle = Algorithm::new(AlgorithmKind::Naive, pts.clone(), EngineCfg::default());
    oracle.finish().context("naive oracle failed")?;
    let truth = oracle.hull().unwrap_or_default().to_vec();

    let mut rows = Vec::new();
    for kind in AlgorithmKind::ALL.into_iter().filter(|k| k.produces_hull()) {
        let report = drive(kind, pts.clone(), EngineCfg::default(), None)?;
        let hull: Vec<Point> = report
            .hull
            .unwrap_or_default()
            .into_iter()
            .map(|[x, y]| Point::new(x, y))
            .collect();
        let matches = same_vertex_set(&hull, &truth);
        if !matches {
            tracing::warn!(%kind, "hull differs from naive");
        }
        rows.push(CompareRow {
            algorithm: kind.to_string(),
            steps: report.steps,
            hull_size: hull.len(),
            matches,
        });
    }
    Ok(CompareReport {
        count,
        seed,
        oracle_hull_size: truth.len(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn run_writes_report_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("square.json");
        std::fs::write(&input, "[[0,0],[4,0],[4,4],[0,4],[2,2]]").unwrap();
        let out = dir.path().join("out/report.json");
        run(AlgorithmKind::Naive, &input, None, Some(&out), None).unwrap();

        let doc: Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["algorithm"], "naive");
        assert_eq!(doc["done"], true);
        assert_eq!(doc["hull"].as_array().unwrap().len(), 4);
        assert_eq!(doc["states"][0], "check-segment");
        assert!(dir.path().join("out/report.provenance.json").exists());
    }

    #[test]
    fn max_steps_stops_early() {
        let pts = general_position(PointsCfg::with_count(8), 1).unwrap();
        let report = drive(AlgorithmKind::DivideAndConquer, pts, EngineCfg::default(), Some(3)).unwrap();
        assert_eq!(report.steps, 3);
        assert!(!report.done);
        assert_eq!(report.states.len(), 4);
    }

    #[test]
    fn insufficient_points_is_an_error() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(1.0, 2.0)];
        let err = drive(AlgorithmKind::Torch, pts, EngineCfg::default(), None).unwrap_err();
        assert!(format!("{err:#}").contains("needs at least 3 points"));
    }

    #[test]
    fn bfp_report_carries_sample() {
        let pts = general_position(PointsCfg::with_count(12), 9).unwrap();
        let cfg = EngineCfg {
            strips: NonZeroUsize::new(3).unwrap(),
        };
        let report = drive(AlgorithmKind::Bfp, pts, cfg, None).unwrap();
        assert!(report.done);
        assert!(report.sample.unwrap().len() <= 8);
        assert!(report.sample_hull.is_some());
    }

    #[test]
    fn pruned_report_lists_survivors() {
        let pts = general_position(PointsCfg::with_count(20), 4).unwrap();
        let report = drive(
            AlgorithmKind::TorchAklToussaint,
            pts,
            EngineCfg::default(),
            None,
        )
        .unwrap();
        assert!(report.done);
        let survivors = report.survivors.unwrap();
        let hull = report.hull.unwrap();
        assert!(survivors.len() <= 20);
        assert!(hull.iter().all(|v| survivors.contains(v)));
    }

    #[test]
    fn compare_agrees_on_generated_points() {
        let report = compare(15, 3).unwrap();
        assert_eq!(report.rows.len(), 9);
        assert!(report.rows.iter().all(|r| r.matches), "{report:?}");
    }

    #[test]
    fn strip_flag_is_bounded() {
        assert_eq!(parse_strips("8").unwrap().get(), 8);
        assert!(parse_strips("0").is_err());
        assert!(parse_strips("18446744073709551615").is_err());
        assert!(Cmd::try_parse_from([
            "hullstep", "run", "--algo", "bfp", "--input", "p.json", "--strips", "99999999"
        ])
        .is_err());
    }

    #[test]
    fn generate_writes_points_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("pts.json");
        generate(6, 11, &out).unwrap();
        assert_eq!(points::load(&out).unwrap().len(), 6);
        assert!(dir.path().join("pts.provenance.json").exists());
    }
}
