//! Hosted-inference backends for the model scorer and the entailment probe.
//!
//! Requests follow the Hugging Face inference API shape: `POST
//! {endpoint}/{model}` with `{"inputs": ...}`, answered by a (possibly
//! nested) list of `{"label", "score"}` objects. Calls are blocking; the
//! pipeline runs one analysis at a time.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::capability::{Classification, EntailmentModel, Relation, SentimentClassifier};
use crate::config::ModelConfig;
use crate::error::CapabilityError;
use crate::types::review::{Label, PolarityBreakdown};

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    token: Option<String>,
}

impl InferenceClient {
    pub fn from_config(config: &ModelConfig) -> Result<Self, CapabilityError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let token = std::env::var(&config.token_env).ok().filter(|t| !t.trim().is_empty());
        if token.is_none() {
            warn!(env = %config.token_env, "no inference token set, sending anonymous requests");
        }
        Ok(InferenceClient { http, endpoint: config.endpoint.trim_end_matches('/').to_string(), token })
    }

    fn infer(&self, model: &str, inputs: Value) -> Result<Vec<LabelScore>, CapabilityError> {
        let url = format!("{}/{}", self.endpoint, model);
        debug!(%url, "inference request");
        let mut request = self.http.post(&url).json(&json!({ "inputs": inputs }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CapabilityError::Status { status: status.as_u16(), body });
        }
        let value: Value = response.json()?;
        parse_label_scores(&value)
    }
}

/// Accepts `[[{..}, ..]]`, `[{..}, ..]` or a single `{..}`; an `{"error": ..}`
/// body (model still loading, quota) means the capability is unavailable.
pub fn parse_label_scores(value: &Value) -> Result<Vec<LabelScore>, CapabilityError> {
    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Err(CapabilityError::Unavailable(message.to_string()));
    }
    let items = match value {
        Value::Array(outer) => match outer.first() {
            Some(Value::Array(inner)) => inner.clone(),
            _ => outer.clone(),
        },
        Value::Object(_) => vec![value.clone()],
        other => return Err(CapabilityError::Response(format!("expected label scores, got {}", other))),
    };
    items
        .into_iter()
        .map(|item| {
            serde_json::from_value::<LabelScore>(item)
                .map_err(|e| CapabilityError::Response(format!("malformed label score: {}", e)))
        })
        .collect()
}

/// Sums the scores per normalised label and renormalises them into a
/// distribution; the best label wins with its share.
pub fn classification_from_scores(scores: &[LabelScore]) -> Result<Classification, CapabilityError> {
    let mut totals = [(Label::Positive, 0.0_f32), (Label::Neutral, 0.0), (Label::Negative, 0.0)];
    for entry in scores {
        let label = Label::from_model_label(&entry.label);
        if let Some(slot) = totals.iter_mut().find(|(l, _)| *l == label) {
            slot.1 += entry.score.max(0.0);
        }
    }
    let sum: f32 = totals.iter().map(|(_, s)| s).sum();
    if sum <= 0.0 {
        return Err(CapabilityError::Response("classifier returned no usable scores".to_string()));
    }
    let mut best = totals[0];
    for candidate in &totals[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    Ok(Classification {
        label: best.0,
        confidence: best.1 / sum,
        probabilities: PolarityBreakdown::from_shares(totals[0].1, totals[1].1, totals[2].1),
    })
}

/// Contradiction only counts above `contradiction_threshold`; otherwise the
/// stronger of entailment and neutral wins.
pub fn relation_from_scores(scores: &[LabelScore], contradiction_threshold: f32) -> Result<Relation, CapabilityError> {
    let (mut entailment, mut neutral, mut contradiction) = (0.0_f32, 0.0_f32, 0.0_f32);
    let mut recognised = false;
    for entry in scores {
        match Relation::from_model_label(&entry.label) {
            Some(Relation::Entailment) => entailment = entailment.max(entry.score),
            Some(Relation::Neutral) => neutral = neutral.max(entry.score),
            Some(Relation::Contradiction) => contradiction = contradiction.max(entry.score),
            None => continue,
        }
        recognised = true;
    }
    if !recognised {
        return Err(CapabilityError::Response("entailment model returned no NLI labels".to_string()));
    }
    if contradiction > contradiction_threshold {
        Ok(Relation::Contradiction)
    } else if entailment > neutral {
        Ok(Relation::Entailment)
    } else {
        Ok(Relation::Neutral)
    }
}

pub struct RemoteClassifier {
    client: InferenceClient,
    model: String,
}

impl RemoteClassifier {
    pub fn new(client: InferenceClient, model: impl Into<String>) -> Self {
        RemoteClassifier { client, model: model.into() }
    }
}

impl SentimentClassifier for RemoteClassifier {
    fn classify(&self, text: &str) -> Result<(Label, f32), CapabilityError> {
        let full = self.classify_full(text)?;
        Ok((full.label, full.confidence))
    }

    fn classify_full(&self, text: &str) -> Result<Classification, CapabilityError> {
        if text.trim().is_empty() {
            return Err(CapabilityError::EmptyInput);
        }
        let scores = self.client.infer(&self.model, json!(text))?;
        classification_from_scores(&scores)
    }
}

pub struct RemoteEntailment {
    client: InferenceClient,
    model: String,
    contradiction_threshold: f32,
}

impl RemoteEntailment {
    pub fn new(client: InferenceClient, model: impl Into<String>, contradiction_threshold: f32) -> Self {
        RemoteEntailment { client, model: model.into(), contradiction_threshold }
    }
}

impl EntailmentModel for RemoteEntailment {
    fn entails(&self, premise: &str, hypothesis: &str) -> Result<Relation, CapabilityError> {
        if premise.trim().is_empty() {
            return Err(CapabilityError::EmptyInput);
        }
        let scores = self.client.infer(&self.model, json!({ "text": premise, "text_pair": hypothesis }))?;
        relation_from_scores(&scores, self.contradiction_threshold)
    }
}
