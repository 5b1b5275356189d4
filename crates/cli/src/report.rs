//! JSON reports written by `run` and printed by `compare`.

use hullstep::api::{Algorithm, Point};
use serde::Serialize;

type Xy = [f64; 2];

fn xy(points: &[Point]) -> Vec<Xy> {
    points.iter().map(|p| [p.x, p.y]).collect()
}

/// Outcome of driving one engine over a point file.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub algorithm: String,
    pub points: usize,
    pub steps: usize,
    pub done: bool,
    /// State label after every step, in order.
    pub states: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hull: Option<Vec<Xy>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tangent: Option<[Xy; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<Vec<Xy>>,
    /// Points left after the Akl–Toussaint kill zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub survivors: Option<Vec<Xy>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<Vec<Xy>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_hull: Option<Vec<Xy>>,
}

impl RunReport {
    pub fn new(engine: &Algorithm, steps: usize, states: Vec<&'static str>) -> Self {
        let mut report = Self {
            algorithm: engine.kind().to_string(),
            points: engine.points().len(),
            steps,
            done: engine.is_done(),
            states,
            hull: engine.hull().map(xy),
            tangent: None,
            chain: None,
            survivors: None,
            sample: None,
            sample_hull: None,
        };
        match engine {
            Algorithm::DivideAndConquerTangent(e) => {
                report.tangent = e.tangent().map(|(a, b)| [[a.x, a.y], [b.x, b.y]]);
            }
            Algorithm::TorchSouthWest(e) => report.chain = Some(xy(e.chain())),
            Algorithm::AklToussaint(e) => report.survivors = Some(xy(e.survivors())),
            Algorithm::AklToussaintPath(e) => report.survivors = Some(xy(e.survivors())),
            Algorithm::DivideAndConquerAklToussaint(e) => {
                report.survivors = Some(xy(e.survivors()))
            }
            Algorithm::TorchAklToussaint(e) => report.survivors = Some(xy(e.survivors())),
            Algorithm::Bfp(e) => {
                report.sample = Some(xy(e.sample()));
                report.sample_hull = Some(xy(e.sample_hull()));
            }
            _ => {}
        }
        report
    }
}

/// One engine checked against the naive oracle.
#[derive(Debug, Serialize)]
pub struct CompareRow {
    pub algorithm: String,
    pub steps: usize,
    pub hull_size: usize,
    pub matches: bool,
}

#[derive(Debug, Serialize)]
pub struct CompareReport {
    pub count: usize,
    pub seed: u64,
    pub oracle_hull_size: usize,
    pub rows: Vec<CompareRow>,
}
