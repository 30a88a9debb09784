pub mod analysis;
pub mod normalize;
pub mod session;

pub use analysis::{AnalysisResult, Theme};
pub use normalize::{extract_analysis, normalize_result, strip_code_fences};
pub use session::{Submission, TriageSession};
