use super::config::AssemblerConfig;
use super::context::AssemblyContext;
use super::orchestrator::Assembler;
use crate::error::AssemblyError;
use crate::export::RetainExportSink;
use estimate_resource::FilesystemResourceProvider;
use estimate_traits::{ExportSink, ResourceProvider};
use std::path::Path;
use std::sync::Arc;

/// A builder for creating an [`Assembler`].
///
/// Without further configuration the assembler reads `file://` references
/// from the local filesystem, writes into the system temp directory and
/// leaves the finished file there.
#[derive(Debug, Default)]
pub struct AssemblerBuilder {
    config: AssemblerConfig,
    resource_provider: Option<Arc<dyn ResourceProvider>>,
    export_sink: Option<Arc<dyn ExportSink>>,
}

impl AssemblerBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the whole layout configuration.
    pub fn with_config(mut self, config: AssemblerConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the layout configuration from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, AssemblyError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AssemblyError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        self.config = AssemblerConfig::from_json(&json)?;
        Ok(self)
    }

    pub fn with_resource_provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.resource_provider = Some(provider);
        self
    }

    pub fn with_export_sink(mut self, sink: Arc<dyn ExportSink>) -> Self {
        self.export_sink = Some(sink);
        self
    }

    /// Directory the generated PDFs are written to.
    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.config.output_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Validates the configuration and creates the `Assembler`.
    pub fn build(self) -> Result<Assembler, AssemblyError> {
        self.config.validate()?;

        let resource_provider = self
            .resource_provider
            .unwrap_or_else(|| Arc::new(FilesystemResourceProvider::unconfined(".")));
        let export_sink = self
            .export_sink
            .unwrap_or_else(|| Arc::new(RetainExportSink));

        log::debug!(
            "Building assembler with resource provider '{}' and export sink '{}'",
            resource_provider.name(),
            export_sink.name()
        );

        Ok(Assembler::new(AssemblyContext {
            config: Arc::new(self.config),
            resource_provider,
            export_sink,
        }))
    }
}
