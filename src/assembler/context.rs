use super::config::AssemblerConfig;
use estimate_traits::{ExportSink, ResourceProvider};
use std::sync::Arc;

/// The shared, read-only collaborators of an assembler.
///
/// Built once by the `AssemblerBuilder` and cloned into every blocking task
/// that needs to load content or hand off a file.
#[derive(Clone, Debug)]
pub struct AssemblyContext {
    pub config: Arc<AssemblerConfig>,
    pub resource_provider: Arc<dyn ResourceProvider>,
    pub export_sink: Arc<dyn ExportSink>,
}
