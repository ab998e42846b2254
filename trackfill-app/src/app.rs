//! Run configuration and the read, fill, write pipeline.

use crate::errors::AppError;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use trackfill_core::{
    DEFAULT_GAP_WARN_THRESHOLD, DEFAULT_MAX_GAP, GapFiller, ReconstructionStats,
};
use trackfill_data::{
    WriteOptions, load_observations_from_csv, staging_file, write_observations_to_csv,
};

/// Logging configuration.
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// What a run did, as written to the summary file.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(flatten)]
    pub stats: ReconstructionStats,
}

/// Output path used when none is given: `<stem>_interpolated.csv` beside the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_interpolated.csv", stem))
}

/// Builder for configuring and running one gap-filling pass.
pub struct RunConfig {
    input: PathBuf,
    output: Option<PathBuf>,
    write_options: WriteOptions,
    summary_path: Option<PathBuf>,
    logging: LoggingConfig,
    gap_warn_threshold: u64,
    max_gap: u64,
}

impl RunConfig {
    /// Create a config reading from `input` with default settings.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            write_options: WriteOptions::default(),
            summary_path: None,
            logging: LoggingConfig::default(),
            gap_warn_threshold: DEFAULT_GAP_WARN_THRESHOLD,
            max_gap: DEFAULT_MAX_GAP,
        }
    }

    /// Set the output CSV path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Set how boxes are encoded in the output.
    pub fn with_write_options(mut self, options: WriteOptions) -> Self {
        self.write_options = options;
        self
    }

    /// Write a JSON summary of the run to `path`.
    pub fn with_summary_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.summary_path = Some(path.into());
        self
    }

    /// Set logging configuration.
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging = config;
        self
    }

    /// Warn about gaps longer than `frames`.
    pub fn with_gap_warn_threshold(mut self, frames: u64) -> Self {
        self.gap_warn_threshold = frames;
        self
    }

    /// Fail instead of filling more than `frames` consecutive missing frames.
    pub fn with_max_gap(mut self, frames: u64) -> Self {
        self.max_gap = frames;
        self
    }

    /// Resolved output path.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }

    /// Install the global tracing subscriber. Call at most once per process.
    pub fn init_logging(&self) {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&self.logging.level)),
            )
            .with_target(false)
            .init();
    }

    /// Read the input, fill every track and write the result.
    ///
    /// Nothing is written unless the whole input parses and reconstructs.
    /// The summary is staged before the table is written and renamed into
    /// place after it, so an unwritable summary path leaves no table behind.
    pub fn run(&self) -> Result<RunSummary, AppError> {
        let output = self.output_path();
        info!(
            "Filling gaps: {} -> {}",
            self.input.display(),
            output.display()
        );

        let observations = load_observations_from_csv(&self.input)?;
        let reconstruction = GapFiller::new()
            .with_gap_warn_threshold(self.gap_warn_threshold)
            .with_max_gap(self.max_gap)
            .fill(&observations)?;

        let summary = RunSummary {
            input: self.input.clone(),
            output,
            stats: reconstruction.stats,
        };
        let staged_summary = match &self.summary_path {
            Some(path) => {
                let mut staged = staging_file(path)?;
                staged.write_all(serde_json::to_string_pretty(&summary)?.as_bytes())?;
                Some((staged, path))
            }
            None => None,
        };

        write_observations_to_csv(
            &summary.output,
            &reconstruction.observations,
            self.write_options,
        )?;

        if let Some((staged, path)) = staged_summary {
            staged.persist(path).map_err(|e| e.error)?;
            info!("Summary written to {}", path.display());
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use trackfill_data::read_observations;

    const INPUT: &str = "\
frame_nmr,car_id,car_bbox,license_plate_bbox,license_plate_bbox_score,license_number,license_number_score
1,5.0,[0.0 0.0 10.0 10.0],[2.0 2.0 4.0 4.0],0.91,AB12CDE,0.66
4,5.0,[30.0 0.0 40.0 10.0],[8.0 2.0 10.0 4.0],0.88,AB12CDE,0.71
2,9.0,[100.0 100.0 150.0 150.0],[110.0 140.0 130.0 148.0],0.5,XY34ZZZ,0.3
";

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("data/test.csv")),
            PathBuf::from("data/test_interpolated.csv")
        );
        assert_eq!(
            default_output_path(Path::new("run")),
            PathBuf::from("run_interpolated.csv")
        );
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("test.csv");
        fs::write(&input, INPUT).unwrap();
        let summary_path = dir.path().join("summary.json");

        let config = RunConfig::new(&input).with_summary_path(&summary_path);
        let summary = config.run().unwrap();

        assert_eq!(summary.output, dir.path().join("test_interpolated.csv"));
        assert_eq!(summary.stats.objects, 2);
        assert_eq!(summary.stats.observed, 3);
        assert_eq!(summary.stats.synthesized, 2);

        let written = fs::read_to_string(&summary.output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines[0],
            "frame_nmr,car_id,car_bbox,license_plate_bbox,license_plate_bbox_score,license_number,license_number_score"
        );
        assert_eq!(lines[1], "1,5,0.0 0.0 10.0 10.0,2.0 2.0 4.0 4.0,0.91,AB12CDE,0.66");
        assert_eq!(lines[2], "2,5,10.0 0.0 20.0 10.0,4.0 2.0 6.0 4.0,0,0,0");
        assert_eq!(lines[3], "3,5,20.0 0.0 30.0 10.0,6.0 2.0 8.0 4.0,0,0,0");
        assert_eq!(lines[4], "4,5,30.0 0.0 40.0 10.0,8.0 2.0 10.0 4.0,0.88,AB12CDE,0.71");
        assert_eq!(
            lines[5],
            "2,9,100.0 100.0 150.0 150.0,110.0 140.0 130.0 148.0,0.5,XY34ZZZ,0.3"
        );

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&summary_path).unwrap()).unwrap();
        assert_eq!(json["synthesized"], 2);
        assert_eq!(json["gaps"], 1);
        assert_eq!(json["longest_gap"], 2);

        // input, table and summary; no staging files left over
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn test_run_bracketed_output_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, INPUT).unwrap();

        RunConfig::new(&input)
            .with_output(&output)
            .with_write_options(WriteOptions {
                bracketed_boxes: true,
            })
            .run()
            .unwrap();

        let text = fs::read_to_string(&output).unwrap();
        let back = read_observations(text.as_bytes()).unwrap();
        assert_eq!(back.len(), 5);
        assert!(back[1].plate.is_sentinel());
        assert_eq!(back[0].plate.number, "AB12CDE");
    }

    #[test]
    fn test_duplicate_frame_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("dup.csv");
        let output = dir.path().join("dup_out.csv");
        fs::write(
            &input,
            "frame_nmr,car_id,car_bbox,license_plate_bbox\n\
             3,1,[0 0 1 1],[0 0 1 1]\n\
             3,1.0,[0 0 2 2],[0 0 1 1]\n",
        )
        .unwrap();

        let err = RunConfig::new(&input).with_output(&output).run().unwrap_err();
        assert!(matches!(err, AppError::Reconstruct(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_unwritable_summary_writes_no_table() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, INPUT).unwrap();

        let err = RunConfig::new(&input)
            .with_output(&output)
            .with_summary_path(dir.path().join("no-such-dir").join("summary.json"))
            .run()
            .unwrap_err();
        assert!(matches!(err, AppError::IoError(_)));
        assert!(!output.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_gap_over_limit_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, INPUT).unwrap();

        let err = RunConfig::new(&input)
            .with_output(&output)
            .with_max_gap(1)
            .run()
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Reconstruct(trackfill_core::ReconstructError::GapTooLarge { .. })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_is_data_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RunConfig::new(dir.path().join("nope.csv")).run().unwrap_err();
        assert!(matches!(err, AppError::Data(_)));
    }
}
