use anyhow::{anyhow, bail, Context, Result};
use polars::prelude::*;
use std::path::Path;
use trackshape::{GeoPoint, Trajectory};

/// Column names holding longitude and latitude (degrees).
pub struct Columns<'a> {
    pub lon: &'a str,
    pub lat: &'a str,
}

/// Read a trajectory from a CSV or Parquet file, in row order.
pub fn read_trajectory(input: &str, cols: &Columns<'_>) -> Result<Trajectory> {
    let lf = scan(input)?;
    let df = lf
        .select([
            col(cols.lon).cast(DataType::Float64),
            col(cols.lat).cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading columns {}/{} from {input}", cols.lon, cols.lat))?;
    let lon = df.column(cols.lon)?.f64()?;
    let lat = df.column(cols.lat)?.f64()?;
    let points = lon
        .into_iter()
        .zip(lat.into_iter())
        .enumerate()
        .map(|(row, (x, y))| match (x, y) {
            (Some(x), Some(y)) => Ok(GeoPoint::new(x, y)),
            _ => Err(anyhow!("row {row}: missing coordinate")),
        })
        .collect::<Result<Vec<_>>>()?;
    tracing::info!(rows = points.len(), input, "read trajectory");
    Ok(Trajectory::new(points))
}

fn scan(input: &str) -> Result<LazyFrame> {
    let ext = Path::new(input)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("csv") => Ok(LazyCsvReader::new(input)
            .with_infer_schema_length(Some(100))
            .finish()?),
        Some("parquet") | Some("pq") => Ok(LazyFrame::scan_parquet(input, ScanArgsParquet::default())?),
        _ => bail!("unsupported input {input}: expected .csv or .parquet"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const COLS: Columns<'static> = Columns {
        lon: "lon",
        lat: "lat",
    };

    #[test]
    fn reads_csv_in_row_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("track.csv");
        fs::write(&path, "t,lon,lat\n0,179.5,10\n1,-179.5,10.5\n2,180,11\n").unwrap();
        let t = read_trajectory(path.to_str().unwrap(), &COLS).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.points()[0], GeoPoint::new(179.5, 10.0));
        assert_eq!(t.points()[1], GeoPoint::new(-179.5, 10.5));
    }

    #[test]
    fn missing_values_are_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gap.csv");
        fs::write(&path, "lon,lat\n1.0,2.0\n,3.0\n").unwrap();
        let err = read_trajectory(path.to_str().unwrap(), &COLS).unwrap_err();
        assert!(err.to_string().contains("row 1"), "{err}");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(read_trajectory("points.txt", &COLS).is_err());
    }
}
