//! Point-set files: JSON `[[x, y], ...]`, CSV with `x,y` columns, or Parquet.
//!
//! The format follows the file extension. Tabular formats go through polars;
//! any numeric column type is accepted and cast to `f64`.

use anyhow::{bail, Context, Result};
use hullstep::api::Point;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Json,
    Csv,
    Parquet,
}

fn format_of(path: &Path) -> Result<Format> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => Ok(Format::Json),
        Some("csv") => Ok(Format::Csv),
        Some("parquet") => Ok(Format::Parquet),
        _ => bail!(
            "unsupported point file {} (expected .json, .csv or .parquet)",
            path.display()
        ),
    }
}

pub fn load(path: &Path) -> Result<Vec<Point>> {
    let points = match format_of(path)? {
        Format::Json => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let pairs: Vec<[f64; 2]> = serde_json::from_str(&text)
                .with_context(|| format!("parsing {} as [[x, y], ...]", path.display()))?;
            pairs.into_iter().map(|[x, y]| Point::new(x, y)).collect()
        }
        Format::Csv => {
            let lf = LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(100))
                .finish()?;
            from_frame(lf)?
        }
        Format::Parquet => {
            let lf = LazyFrame::scan_parquet(path, ScanArgsParquet::default())?;
            from_frame(lf)?
        }
    };
    tracing::info!(path = %path.display(), points = points.len(), "points loaded");
    Ok(points)
}

fn from_frame(lf: LazyFrame) -> Result<Vec<Point>> {
    let df = lf
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()?;
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    xs.into_iter()
        .zip(ys)
        .enumerate()
        .map(|(row, pair)| match pair {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => bail!("row {row}: missing x or y"),
        })
        .collect()
}

pub fn save(path: &Path, points: &[Point]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    match format_of(path)? {
        Format::Json => {
            let pairs: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
            std::fs::write(path, serde_json::to_vec_pretty(&pairs)?)?;
        }
        Format::Csv => {
            let mut df = frame(points)?;
            let mut file = File::create(path)?;
            CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
        }
        Format::Parquet => {
            let mut df = frame(points)?;
            let file = File::create(path)?;
            ParquetWriter::new(file).finish(&mut df)?;
        }
    }
    tracing::info!(path = %path.display(), points = points.len(), "points written");
    Ok(())
}

fn frame(points: &[Point]) -> Result<DataFrame> {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    Ok(df!("x" => xs, "y" => ys)?)
}
