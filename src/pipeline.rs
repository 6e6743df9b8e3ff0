//! One evaluation per input change: profile → features → probability → tier,
//! plus the impact heuristic and the tier's retention playbook.

use crate::config::ChurnConfig;
use crate::error::{ChurnError, Result};
use crate::features::FeatureEncoder;
use crate::impact::{impacts, FeatureImpact};
use crate::logging::{RejectedLine, StructuredLogger};
use crate::model::Predictor;
use crate::profile::{CustomerProfile, OutOfRangePolicy, ProfileInput};
use crate::retention::{playbook, RetentionPlaybook};
use crate::risk::{RiskAssessment, RiskEngine, RiskTier};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct ChurnReport {
    pub evaluation_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub customer_id: String,
    pub assessment: RiskAssessment,
    /// Heuristic factor scores, descending by signed value
    pub impacts: Vec<FeatureImpact>,
    /// One line per factor, descending by magnitude
    pub key_factors: Vec<String>,
    pub playbook: &'static RetentionPlaybook,
}

/// Line counts from one [`ChurnPipeline::run_lines`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub evaluated: u64,
    pub rejected: u64,
}

pub struct ChurnPipeline {
    encoder: FeatureEncoder,
    predictor: Predictor,
    risk: RiskEngine,
}

impl ChurnPipeline {
    pub fn new(predictor: Predictor, risk: RiskEngine) -> Self {
        Self {
            encoder: FeatureEncoder::new(predictor.schema().clone()),
            predictor,
            risk,
        }
    }

    /// Validate config and load the model artifacts; fails fast on any mismatch.
    pub fn from_config(config: &ChurnConfig) -> Result<Self> {
        config.validate()?;
        let predictor = Predictor::load(&config.model)?;
        let risk = RiskEngine::new(config.risk.clone())?;
        Ok(Self::new(predictor, risk))
    }

    pub fn evaluate(&self, profile: &CustomerProfile) -> Result<ChurnReport> {
        let features = self.encoder.encode(profile)?;
        let probability = self.predictor.predict(&features)?;
        let assessment = self.risk.assess(probability);
        let factor_scores = impacts(profile);

        if assessment.tier == RiskTier::Low {
            debug!(customer_id = %profile.customer_id, probability, "churn assessment");
        } else {
            info!(
                customer_id = %profile.customer_id,
                probability,
                tier = assessment.tier.as_str(),
                "churn assessment"
            );
        }

        Ok(ChurnReport {
            evaluation_id: Uuid::new_v4(),
            evaluated_at: Utc::now(),
            customer_id: profile.customer_id.clone(),
            playbook: playbook(assessment.tier),
            assessment,
            impacts: factor_scores.by_value(),
            key_factors: factor_scores.narrative(),
        })
    }

    /// Parse, validate and evaluate one JSON line. The customer id is returned
    /// whenever the line parsed, so rejections can still name the customer.
    pub fn evaluate_line(
        &self,
        line: &str,
        policy: OutOfRangePolicy,
    ) -> (Option<String>, Result<ChurnReport>) {
        let input: ProfileInput = match serde_json::from_str(line) {
            Ok(input) => input,
            Err(e) => return (None, Err(e.into())),
        };
        let result = input
            .validate(policy)
            .and_then(|profile| self.evaluate(&profile));
        (Some(input.customer_id), result)
    }

    /// Evaluate newline-delimited profiles until EOF, writing one report or
    /// rejection line per non-blank input line. Only I/O failures end the run.
    pub fn run_lines(
        &self,
        mut reader: impl BufRead,
        mut writer: impl Write,
        policy: OutOfRangePolicy,
    ) -> io::Result<RunStats> {
        let mut stats = RunStats::default();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let (customer_id, result) = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.evaluate_line(line, policy),
                Err(e) => (None, Err(ChurnError::invalid("line", format!("not valid UTF-8: {e}")))),
            };
            match result {
                Ok(report) => {
                    StructuredLogger::emit_json(&report, &mut writer)?;
                    stats.evaluated += 1;
                }
                Err(e) => {
                    warn!(customer_id = customer_id.as_deref().unwrap_or_default(), error = %e, "input rejected");
                    let error = e.to_string();
                    let rejected = RejectedLine {
                        ts: Utc::now().to_rfc3339(),
                        customer_id: customer_id.as_deref(),
                        error: &error,
                    };
                    StructuredLogger::emit_json(&rejected, &mut writer)?;
                    stats.rejected += 1;
                }
            }
            writer.flush()?;
        }
        Ok(stats)
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }
}
