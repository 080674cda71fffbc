mod report;
mod view;

// Re-export public types
pub use report::{generate_report, report_filename, report_filename_today, share_summary};
pub use view::{
    class_color, render, ConfidenceTier, PredictionListState, RankedPrediction, ResultView,
    DEFAULT_CLASS_COLOR,
};
