pub mod config;
pub mod endpoint;
pub mod events;
pub mod orchestrator;
pub mod progress;
pub mod result;
pub mod selector;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, Config,
    ConfigError, EndpointConfig, OutputConfig, ProgressConfig,
};
pub use endpoint::{
    EndpointError, ExtractionEndpoint, HttpExtractionEndpoint, ServiceHealth, UploadPart,
    UploadRequest,
};
pub use events::{EventBroadcaster, UploadEvent};
pub use orchestrator::{
    CycleOutcome, CyclePhase, CycleReport, OutcomeKind, StatusKind, StatusMessage,
    UploadOrchestrator, UploadView,
};
pub use progress::{ProgressSimulator, ProgressState, ProgressTicker};
pub use result::{ResultError, ResultResource};
pub use selector::{filter_pdfs, is_pdf, scan_directory, CandidateFile, FileContent, FileSelector};
