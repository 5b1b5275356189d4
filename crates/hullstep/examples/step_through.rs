//! Step an engine by hand and print what a renderer would draw.
//!
//! Usage:
//!   cargo run -p hullstep --example step_through -- akl-toussaint-path 12
//!
//! Arguments: algorithm name (default `naive`), point count (default 10).

use hullstep::api::{general_position, Algorithm, AlgorithmKind, Driver, EngineCfg, PointsCfg};

fn main() {
    let kind = match std::env::args().nth(1).map(|s| s.parse::<AlgorithmKind>()) {
        None => AlgorithmKind::Naive,
        Some(Ok(kind)) => kind,
        Some(Err(e)) => {
            eprintln!("{e}");
            return;
        }
    };
    let count = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);
    let Some(points) = general_position(PointsCfg::with_count(count), 7) else {
        eprintln!("could not place {count} points");
        return;
    };

    let mut driver = Driver::with_points(kind, EngineCfg::default(), points);
    let mut steps = 0;
    while !driver.engine().is_done() {
        if let Err(e) = driver.step() {
            eprintln!("step {steps}: {e}");
            return;
        }
        steps += 1;
        println!("{steps:4}  {}", driver.engine().state_label());
    }

    match driver.engine() {
        Algorithm::DivideAndConquerTangent(e) => println!("tangent: {:?}", e.tangent()),
        Algorithm::TorchSouthWest(e) => println!("south-west chain: {} points", e.chain().len()),
        Algorithm::Bfp(e) => println!(
            "sample {} -> approximate hull {} vs hull {}",
            e.sample().len(),
            e.sample_hull().len(),
            e.hull().len()
        ),
        other => {
            if let Some(hull) = other.hull() {
                println!("hull ({} vertices):", hull.len());
                for p in hull {
                    println!("  ({:.3}, {:.3})", p.x, p.y);
                }
            }
        }
    }
}
