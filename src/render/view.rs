use base64::Engine;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::clients::{ClassPrediction, PredictionResult};

/// Fixed display colors for the ten known land-cover classes
const LAND_TYPE_COLORS: [(&str, &str); 10] = [
    ("Annual Crop", "#10b981"),
    ("Forest", "#059669"),
    ("Herbaceous Vegetation", "#84cc16"),
    ("Highway", "#6b7280"),
    ("Industrial", "#f59e0b"),
    ("Pasture", "#22c55e"),
    ("Permanent Crop", "#16a34a"),
    ("Residential", "#3b82f6"),
    ("River", "#06b6d4"),
    ("Sea Lake", "#0891b2"),
];

/// Neutral fallback for labels outside the known set. The server owns the
/// class list, so an unrecognized label must still render.
pub const DEFAULT_CLASS_COLOR: &str = "#6b7280";

/// Display color for a class label
pub fn class_color(label: &str) -> &'static str {
    LAND_TYPE_COLORS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_CLASS_COLOR)
}

/// Coarse confidence level used only for display styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "camelCase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// 0.8 and 0.6 are inclusive lower bounds
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            ConfidenceTier::High
        } else if confidence >= 0.6 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    /// Badge background for the tier
    pub fn badge_gradient(self) -> &'static str {
        match self {
            ConfidenceTier::High => "linear-gradient(135deg, #10b981, #34d399)",
            ConfidenceTier::Medium => "linear-gradient(135deg, #f59e0b, #fbbf24)",
            ConfidenceTier::Low => "linear-gradient(135deg, #ef4444, #f87171)",
        }
    }
}

/// Expand/collapse state of the full prediction list.
/// Collapsed after every fresh render; toggled by explicit user action only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PredictionListState {
    #[default]
    Collapsed,
    Expanded,
}

impl PredictionListState {
    pub fn toggle(&mut self) {
        *self = match self {
            PredictionListState::Collapsed => PredictionListState::Expanded,
            PredictionListState::Expanded => PredictionListState::Collapsed,
        };
    }
}

/// One styled entry of the ranked class list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPrediction {
    pub label: String,
    pub description: String,
    pub probability: f64,
    /// Probability as a one-decimal percentage string, e.g. "91.0"
    pub percent: String,
    pub color: String,
    /// Flags the top-ranked entry (always index 0)
    pub top: bool,
}

/// Everything a frontend needs to display one classification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub predicted_class: String,
    pub description: String,
    pub confidence: f64,
    /// Confidence as a one-decimal percentage string, e.g. "95.0"
    pub confidence_percent: String,
    pub tier: ConfidenceTier,
    pub badge_gradient: String,
    /// Displayable `data:image/png;base64,...` URI of the analyzed image,
    /// or None when the response bytes were not valid base64
    pub image_data_uri: Option<String>,
    pub predictions: Vec<RankedPrediction>,
    pub list: PredictionListState,
}

/// Derive the styled view from a prediction response
pub fn render(result: &PredictionResult) -> ResultView {
    let tier = ConfidenceTier::from_confidence(result.confidence);

    let predictions = result
        .all_predictions
        .iter()
        .enumerate()
        .map(|(index, prediction)| rank_prediction(index, prediction))
        .collect();

    ResultView {
        predicted_class: result.predicted_class.clone(),
        description: result.description.clone(),
        confidence: result.confidence,
        confidence_percent: format!("{:.1}", result.confidence * 100.0),
        tier,
        badge_gradient: tier.badge_gradient().to_string(),
        image_data_uri: image_data_uri(&result.image),
        predictions,
        list: PredictionListState::Collapsed,
    }
}

fn rank_prediction(index: usize, prediction: &ClassPrediction) -> RankedPrediction {
    RankedPrediction {
        label: prediction.label.clone(),
        description: prediction.description.clone(),
        probability: prediction.probability,
        percent: format!("{:.1}", prediction.probability * 100.0),
        color: class_color(&prediction.label).to_string(),
        top: index == 0,
    }
}

fn image_data_uri(encoded: &str) -> Option<String> {
    match base64::engine::general_purpose::STANDARD.decode(encoded) {
        Ok(_) => Some(format!("data:image/png;base64,{}", encoded)),
        Err(e) => {
            warn!("Response image is not valid base64: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(predictions: Vec<(&str, f64)>, confidence: f64) -> PredictionResult {
        let all_predictions = predictions
            .into_iter()
            .map(|(label, probability)| ClassPrediction {
                label: label.to_string(),
                probability,
                description: format!("{} description", label),
            })
            .collect::<Vec<_>>();

        PredictionResult {
            image: "aW1hZ2U=".to_string(),
            predicted_class: all_predictions[0].label.clone(),
            confidence,
            description: all_predictions[0].description.clone(),
            all_predictions,
        }
    }

    #[test]
    fn test_confidence_tier_boundaries() {
        let cases = [
            (0.95, ConfidenceTier::High),
            (0.8, ConfidenceTier::High),
            (0.79, ConfidenceTier::Medium),
            (0.65, ConfidenceTier::Medium),
            (0.6, ConfidenceTier::Medium),
            (0.59, ConfidenceTier::Low),
            (0.3, ConfidenceTier::Low),
            (0.0, ConfidenceTier::Low),
        ];

        for (confidence, expected) in cases {
            assert_eq!(
                ConfidenceTier::from_confidence(confidence),
                expected,
                "confidence {}",
                confidence
            );
        }
    }

    #[test]
    fn test_known_class_colors_and_default_fallback() {
        assert_eq!(class_color("Forest"), "#059669");
        assert_eq!(class_color("Sea Lake"), "#0891b2");
        assert_eq!(class_color("Volcano"), DEFAULT_CLASS_COLOR);
        assert_eq!(class_color(""), DEFAULT_CLASS_COLOR);
    }

    #[test]
    fn test_render_marks_top_entry_and_preserves_order() {
        let result = result_with(
            vec![("Forest", 0.7), ("Pasture", 0.2), ("River", 0.1)],
            0.7,
        );
        let view = render(&result);

        assert!(view.predictions[0].top);
        assert!(!view.predictions[1].top);
        assert!(!view.predictions[2].top);

        let labels: Vec<&str> = view.predictions.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Forest", "Pasture", "River"]);
    }

    #[test]
    fn test_render_survives_unknown_label() {
        let result = result_with(vec![("Glacier", 0.9), ("Forest", 0.1)], 0.9);
        let view = render(&result);

        assert_eq!(view.predictions[0].color, DEFAULT_CLASS_COLOR);
        assert_eq!(view.predictions[1].color, "#059669");
    }

    #[test]
    fn test_render_starts_collapsed_and_toggles() {
        let result = result_with(vec![("Forest", 0.9)], 0.9);
        let mut view = render(&result);
        assert_eq!(view.list, PredictionListState::Collapsed);

        view.list.toggle();
        assert_eq!(view.list, PredictionListState::Expanded);
        view.list.toggle();
        assert_eq!(view.list, PredictionListState::Collapsed);
    }

    #[test]
    fn test_invalid_image_payload_degrades_to_no_image() {
        let mut result = result_with(vec![("Forest", 0.9)], 0.9);
        result.image = "!!not-base64!!".to_string();

        let view = render(&result);
        assert_eq!(view.image_data_uri, None);
        assert_eq!(view.predicted_class, "Forest");
    }

    #[test]
    fn test_percent_strings_have_one_decimal() {
        let result = result_with(vec![("Forest", 0.914)], 0.914);
        let view = render(&result);

        assert_eq!(view.confidence_percent, "91.4");
        assert_eq!(view.predictions[0].percent, "91.4");
    }
}
