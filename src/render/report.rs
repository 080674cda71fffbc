//! Downloadable plain-text report and the short share summary.
//!
//! The report format is deterministic and independent of any view layer:
//! the same result (modulo the timestamp arguments) always yields the same
//! text, and the class ordering mirrors the response ordering exactly.

use chrono::{Local, NaiveDate};

use crate::clients::PredictionResult;

/// Filename of the downloadable report artifact
pub fn report_filename(date: NaiveDate) -> String {
    format!("land_classification_report_{}.txt", date.format("%Y-%m-%d"))
}

/// Filename dated today (local time)
pub fn report_filename_today() -> String {
    report_filename(Local::now().date_naive())
}

/// Build the full text report
///
/// `generated_at` is a preformatted timestamp; keeping it a parameter keeps
/// the function pure.
pub fn generate_report(
    result: &PredictionResult,
    generated_at: &str,
    processing_secs: f64,
) -> String {
    let mut report = String::new();

    report.push_str("SATELLITE LAND CLASSIFICATION REPORT\n");
    report.push_str(&format!("Generated: {}\n", generated_at));
    report.push_str(&format!(
        "Processing Time: {:.2} seconds\n\n",
        processing_secs
    ));

    report.push_str("PRIMARY CLASSIFICATION\n");
    report.push_str(&format!("Class: {}\n", result.predicted_class));
    report.push_str(&format!(
        "Confidence: {:.2}%\n",
        result.confidence * 100.0
    ));
    report.push_str(&format!("Description: {}\n\n", result.description));

    report.push_str("ALL CLASSIFICATIONS\n");
    for (index, prediction) in result.all_predictions.iter().enumerate() {
        report.push_str(&format!(
            "{}. {}: {:.2}%\n",
            index + 1,
            prediction.label,
            prediction.probability * 100.0
        ));
    }

    report.push_str(
        "\n---\nGenerated by Satellite Land Classification System\nPowered by VGG16 Neural Network",
    );

    report
}

/// Short text block for the share action
pub fn share_summary(result: &PredictionResult) -> String {
    format!(
        "Land Classification Results:\n\n\
         Primary Classification: {}\n\
         Confidence: {:.1}%\n\
         Description: {}\n\n\
         Analyzed with Satellite Land Classification AI",
        result.predicted_class,
        result.confidence * 100.0,
        result.description
    )
}
