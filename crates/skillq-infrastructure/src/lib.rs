pub mod config_service;
pub mod image_encoder;
pub mod logging;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::image_encoder::FileImageEncoder;
pub use crate::logging::{
    DiagnosticEvent, DiagnosticLayer, LoggingGuard, LoggingOptions, init_logging,
};
pub use crate::paths::SkillqPaths;
