pub mod ports;
pub mod report_use_case;
pub mod resolve_use_case;

pub use report_use_case::{ReportSettings, ReportUseCase, SubjectOutcome, SubjectRun};
pub use resolve_use_case::{Resolution, ResolveUseCase};
