use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::inspection::{
    batch::find_images,
    common::error::{InspectionError, Result},
    config::InspectionConfig,
    engine::{InspectionOutcome, Inspector},
    overlay::{OverlayConfig, OverlayWriter, TiffOverlayWriter, paint_overlay},
    raster::{FrameReader, ImageFrameReader, Raster, RgbFrame},
};

/// Outcome of one file from a folder run.
#[derive(Debug)]
pub struct ImageInspection {
    pub path: PathBuf,
    pub result: Result<InspectionOutcome>,
}

pub struct InspectionPipeline<R: FrameReader, W: OverlayWriter> {
    reader: R,
    writer: W,
    inspector: Inspector,
    overlay: OverlayConfig,
}

impl InspectionPipeline<ImageFrameReader, TiffOverlayWriter> {
    pub fn new(config: InspectionConfig) -> Self {
        Self {
            reader: ImageFrameReader,
            writer: TiffOverlayWriter,
            inspector: Inspector::new(config),
            overlay: OverlayConfig::default(),
        }
    }
}

impl<R: FrameReader, W: OverlayWriter> InspectionPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: InspectionConfig) -> Self {
        Self {
            reader,
            writer,
            inspector: Inspector::new(config),
            overlay: OverlayConfig::default(),
        }
    }

    pub fn with_overlay_config(mut self, overlay: OverlayConfig) -> Self {
        self.overlay = overlay;
        self
    }

    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(InspectionError::InvalidDimensions(width, height));
        }
        Ok(())
    }

    /// Runs the engine on an already decoded frame.
    pub fn inspect<F: Raster + Sync + ?Sized>(&self, frame: &F) -> Result<InspectionOutcome> {
        {
            let _span = tracing::info_span!("validate_dimensions",
                width = frame.width(),
                height = frame.height()
            ).entered();
            self.validate_dimensions(frame.width(), frame.height())?;
        }
        self.inspector.inspect(frame)
    }

    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn inspect_bytes(&self, input_data: &[u8]) -> Result<InspectionOutcome> {
        let frame = self.decode(input_data)?;
        self.inspect(&frame)
    }

    /// Decodes, inspects and writes the annotated overlay to `output`.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn inspect_bytes_with_overlay(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
    ) -> Result<InspectionOutcome> {
        let frame = self.decode(input_data)?;
        let outcome = self.inspect(&frame)?;
        self.annotate(&frame, &outcome, output)?;
        Ok(outcome)
    }

    fn decode(&self, input_data: &[u8]) -> Result<RgbFrame> {
        let _span = tracing::info_span!("decode_frame").entered();
        self.reader.read_frame(input_data)
    }

    pub fn annotate(
        &self,
        frame: &RgbFrame,
        outcome: &InspectionOutcome,
        output: &mut dyn Write,
    ) -> Result<()> {
        let _span = tracing::info_span!("write_overlay").entered();
        let canvas = paint_overlay(frame, outcome, self.overlay.outline_width)?;
        self.writer.write_overlay(&canvas, output, &self.overlay)
    }

    #[instrument(skip(self, input_path, overlay_path))]
    pub fn inspect_file<P: AsRef<Path>>(
        &self,
        input_path: P,
        overlay_path: Option<&Path>,
    ) -> Result<InspectionOutcome> {
        let input_path = input_path.as_ref();
        info!(input = %input_path.display(), "Inspecting file");

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                InspectionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let Some(overlay_path) = overlay_path else {
            return self.inspect_bytes(&input_data);
        };

        // The file is only created once there is a finished overlay to put in it.
        let mut encoded = Vec::new();
        let outcome = self.inspect_bytes_with_overlay(&input_data, &mut encoded)?;

        {
            let _span = tracing::info_span!("write_output_file", size = encoded.len()).entered();
            std::fs::write(overlay_path, &encoded).map_err(|e| {
                InspectionError::OutputWriteError(format!("{}: {}", overlay_path.display(), e))
            })?;
        }

        Ok(outcome)
    }

    /// Inspects every image directly inside `dir`. A file that fails is recorded
    /// and the run continues; only an unreadable folder fails the whole call.
    /// An empty result means no images were found.
    #[instrument(skip(self, dir, overlay_dir))]
    pub fn inspect_folder<P: AsRef<Path>>(
        &self,
        dir: P,
        overlay_dir: Option<&Path>,
    ) -> Result<Vec<ImageInspection>> {
        let images = find_images(dir.as_ref())?;
        if images.is_empty() {
            warn!(dir = %dir.as_ref().display(), "No images found");
            return Ok(Vec::new());
        }

        if let Some(overlay_dir) = overlay_dir {
            std::fs::create_dir_all(overlay_dir).map_err(|e| {
                InspectionError::OutputWriteError(format!("{}: {}", overlay_dir.display(), e))
            })?;
        }

        let inspections = images
            .into_iter()
            .map(|path| {
                let overlay_path = overlay_dir.map(|d| overlay_file_for(d, &path));
                let result = self.inspect_file(&path, overlay_path.as_deref());
                if let Err(e) = &result {
                    warn!(file = %path.display(), "Inspection failed: {}", e);
                }
                ImageInspection { path, result }
            })
            .collect();

        Ok(inspections)
    }

    pub fn config(&self) -> &InspectionConfig {
        self.inspector.config()
    }

    /// Replaces the configuration and rebuilds the decision tables.
    pub fn set_config(&mut self, config: InspectionConfig) {
        self.inspector = Inspector::new(config);
    }

    pub fn overlay_config(&self) -> &OverlayConfig {
        &self.overlay
    }
}

/// `<overlay_dir>/<input file name>.tiff`. The input extension is kept so
/// `a.png` and `a.jpg` get separate overlays.
pub fn overlay_file_for(overlay_dir: &Path, input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "overlay".to_string());
    overlay_dir.join(format!("{name}.tiff"))
}
