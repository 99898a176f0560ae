/// Sentiment classifier - annotates message text with a polarity label and
/// confidence score.
///
/// The classifier delegates to a remote inference endpoint when one is
/// configured and falls back to a keyword heuristic on any failure
/// (no configuration, connectivity, timeout, non-2xx, malformed payload,
/// empty candidate list). By contract `classify` never fails: callers always
/// get a usable pair. A single attempt is made per request, no retries.
use crate::config::SentimentConfig;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Closed set of sentiment polarities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    /// Anything outside the closed set resolves to `Neutral`.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "positive" => SentimentLabel::Positive,
            "negative" => SentimentLabel::Negative,
            "neutral" => SentimentLabel::Neutral,
            _ => SentimentLabel::Neutral,
        }
    }
}

/// Classification outcome. The score is the classifier-reported confidence;
/// the remote path may omit it, the fallback never does.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: Option<f64>,
}

#[derive(Serialize)]
struct InferenceRequest {
    data: Vec<String>,
}

#[derive(Deserialize)]
struct InferenceResponse {
    data: Option<Vec<InferenceCandidate>>,
}

#[derive(Deserialize)]
struct InferenceCandidate {
    label: Option<String>,
    score: Option<f64>,
}

pub struct SentimentClassifier {
    client: HttpClient,
    config: SentimentConfig,
}

impl SentimentClassifier {
    pub fn new(config: SentimentConfig) -> Self {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Classify a piece of text. Never fails: any problem on the remote path
    /// degrades to the keyword fallback (logged at warn, not surfaced).
    pub async fn classify(&self, text: &str) -> Sentiment {
        let url = match self.config.endpoint_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => return self.fallback(text),
        };

        match self.classify_remote(url, text).await {
            Ok(sentiment) => sentiment,
            Err(err) => {
                warn!(error = %err, "remote classification failed, using fallback");
                crate::metrics::CLASSIFIER_FALLBACKS.inc();
                self.fallback(text)
            }
        }
    }

    /// Single best-effort call to the inference endpoint. The request is a
    /// single-element batch; the first returned candidate wins.
    async fn classify_remote(&self, url: &str, text: &str) -> anyhow::Result<Sentiment> {
        let request = InferenceRequest {
            data: vec![text.to_string()],
        };

        let response = self
            .client
            .post(url.trim_end_matches('/'))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("inference endpoint returned {}", response.status());
        }

        let body: InferenceResponse = response.json().await?;
        let candidate = body
            .data
            .and_then(|mut candidates| {
                if candidates.is_empty() {
                    None
                } else {
                    Some(candidates.remove(0))
                }
            })
            .ok_or_else(|| anyhow::anyhow!("inference response contained no candidates"))?;

        Ok(self.resolve_candidate(candidate))
    }

    /// Map a raw candidate into the closed label set. Positional labels
    /// (`LABEL_<n>`) index into the configured class order; anything else is
    /// lower-cased, with unrecognized values treated as neutral. The score
    /// passes through unchanged.
    fn resolve_candidate(&self, candidate: InferenceCandidate) -> Sentiment {
        let raw = candidate.label.unwrap_or_else(|| "neutral".to_string());
        Sentiment {
            label: self.normalize_label(&raw),
            score: candidate.score,
        }
    }

    fn normalize_label(&self, raw: &str) -> SentimentLabel {
        let lowered = raw.to_lowercase();
        if let Some(index) = lowered.strip_prefix("label_") {
            return match index.parse::<usize>() {
                Ok(i) if i < self.config.label_classes.len() => {
                    SentimentLabel::from_str(&self.config.label_classes[i])
                }
                _ => SentimentLabel::Neutral,
            };
        }
        SentimentLabel::from_str(&lowered)
    }

    /// Keyword heuristic used when the remote path is unavailable. Marker
    /// lists come from configuration so they can be swapped per deployment
    /// locale.
    fn fallback(&self, text: &str) -> Sentiment {
        let lowered = text.to_lowercase();
        if self
            .config
            .positive_markers
            .iter()
            .any(|marker| lowered.contains(marker.as_str()))
        {
            return Sentiment {
                label: SentimentLabel::Positive,
                score: Some(0.90),
            };
        }
        if self
            .config
            .negative_markers
            .iter()
            .any(|marker| lowered.contains(marker.as_str()))
        {
            return Sentiment {
                label: SentimentLabel::Negative,
                score: Some(0.85),
            };
        }
        Sentiment {
            label: SentimentLabel::Neutral,
            score: Some(0.50),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> SentimentClassifier {
        SentimentClassifier::new(SentimentConfig::default())
    }

    #[tokio::test]
    async fn fallback_is_deterministic_without_endpoint() {
        let classifier = classifier();

        let positive = classifier.classify("harika bir gün").await;
        assert_eq!(positive.label, SentimentLabel::Positive);
        assert_eq!(positive.score, Some(0.90));

        let negative = classifier.classify("çok kötü").await;
        assert_eq!(negative.label, SentimentLabel::Negative);
        assert_eq!(negative.score, Some(0.85));

        let neutral = classifier.classify("bugün salı").await;
        assert_eq!(neutral.label, SentimentLabel::Neutral);
        assert_eq!(neutral.score, Some(0.50));
    }

    #[tokio::test]
    async fn fallback_markers_match_case_insensitively() {
        let result = classifier().classify("HARIKA").await;
        assert_eq!(result.label, SentimentLabel::Positive);
    }

    #[tokio::test]
    async fn unreachable_endpoint_degrades_to_fallback() {
        let config = SentimentConfig {
            endpoint_url: Some("http://127.0.0.1:1/predict".to_string()),
            timeout_secs: 1,
            ..SentimentConfig::default()
        };
        let classifier = SentimentClassifier::new(config);

        let result = classifier.classify("harika bir gün").await;
        assert_eq!(result.label, SentimentLabel::Positive);
        assert_eq!(result.score, Some(0.90));
    }

    #[test]
    fn positional_labels_map_through_class_order() {
        let classifier = classifier();
        let resolved = classifier.resolve_candidate(InferenceCandidate {
            label: Some("LABEL_2".to_string()),
            score: Some(0.7),
        });
        assert_eq!(resolved.label, SentimentLabel::Positive);
        assert_eq!(resolved.score, Some(0.7));
    }

    #[test]
    fn out_of_range_positional_label_is_neutral() {
        let classifier = classifier();
        assert_eq!(classifier.normalize_label("LABEL_9"), SentimentLabel::Neutral);
        assert_eq!(classifier.normalize_label("label_x"), SentimentLabel::Neutral);
    }

    #[test]
    fn unrecognized_labels_are_neutral() {
        let classifier = classifier();
        assert_eq!(classifier.normalize_label("joyful"), SentimentLabel::Neutral);
        assert_eq!(classifier.normalize_label("NEGATIVE"), SentimentLabel::Negative);
    }

    #[test]
    fn missing_label_resolves_to_neutral_with_score_passthrough() {
        let classifier = classifier();
        let resolved = classifier.resolve_candidate(InferenceCandidate {
            label: None,
            score: None,
        });
        assert_eq!(resolved.label, SentimentLabel::Neutral);
        assert_eq!(resolved.score, None);
    }

    #[test]
    fn simulated_remote_payload_parses_to_first_candidate() {
        let body: InferenceResponse =
            serde_json::from_str(r#"{"data": [{"label": "LABEL_2", "score": 0.7}]}"#).unwrap();
        let candidate = body.data.unwrap().remove(0);
        let resolved = classifier().resolve_candidate(candidate);
        assert_eq!(resolved.label, SentimentLabel::Positive);
        assert_eq!(resolved.score, Some(0.7));
    }
}
