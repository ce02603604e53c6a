//! Fragment stream processing: calibration, classification and building.

mod builder;
mod classifier;
mod config;
mod options;
mod pipeline;
mod report;
mod resolver;
mod sections;

pub use builder::{DocumentBuilder, Transition};
pub use classifier::{classify_style, title_page_style, Classification, DropReason, FragmentClassifier};
pub use config::{CalibrationConfig, ConfigFile, FamilyConfig, MUST_OVERRIDE};
pub use options::{BuildOptions, BulletExitPolicy, PageSelection, ParagraphPolicy};
pub use pipeline::build_document;
pub use report::{BuildReport, BuildStats, ClassifiedFragment, Conversion, Diagnostic, DiagnosticKind};
pub use resolver::{Calibration, PositionTable, StyleResolver, StyleTable};
pub use sections::SectionCounter;
