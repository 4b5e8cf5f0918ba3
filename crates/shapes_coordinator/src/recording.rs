//! Output-frame recording state — spec §6.4/§4.9: `outNNNNN.{png|tif}`,
//! written once the current frame has converged and recording is active.

use std::path::PathBuf;

/// Which output format `RecordFrame` writes, inferred from the file
/// extension it hands the backend (spec §6.4: PNG or TIFF).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutputFormat {
    Png,
    Tiff,
}

impl OutputFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Tiff => "tif",
        }
    }
}

/// Recording configuration: when to start, where to write, and which
/// backend's output texture to record.
#[derive(Clone, Debug)]
pub struct RecordingConfig {
    pub enabled: bool,
    pub start_frame: u64,
    pub backend_output_id: i32,
    pub directory: PathBuf,
    pub format: OutputFormat,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        RecordingConfig {
            enabled: false,
            start_frame: 0,
            backend_output_id: 0,
            directory: PathBuf::from("."),
            format: OutputFormat::Png,
        }
    }
}

impl RecordingConfig {
    /// `outNNNNN.{png|tif}` — five-digit zero-padded frame number.
    #[must_use]
    pub fn output_path(&self, frame_number: u64) -> PathBuf {
        self.directory.join(format!("out{frame_number:05}.{}", self.format.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_zero_pads_to_five_digits() {
        let cfg = RecordingConfig { directory: PathBuf::from("/tmp"), ..RecordingConfig::default() };
        assert_eq!(cfg.output_path(7), PathBuf::from("/tmp/out00007.png"));
    }

    #[test]
    fn tiff_format_uses_tif_extension() {
        let cfg =
            RecordingConfig { directory: PathBuf::from("/tmp"), format: OutputFormat::Tiff, ..RecordingConfig::default() };
        assert_eq!(cfg.output_path(1), PathBuf::from("/tmp/out00001.tif"));
    }

    #[test]
    fn large_frame_numbers_are_not_truncated() {
        let cfg = RecordingConfig { directory: PathBuf::from("/tmp"), ..RecordingConfig::default() };
        assert_eq!(cfg.output_path(123_456), PathBuf::from("/tmp/out123456.png"));
    }
}
