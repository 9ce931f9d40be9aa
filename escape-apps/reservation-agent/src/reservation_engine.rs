//!  Escape Reservation Agent
//!
//!  Copyright (C) 2026  Mamy Ratsimbazafy
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! # Reservation Engine
//!
//! Effectful (time, network) orchestration of one reservation attempt:
//! eligibility check, priming GET, form POST, classification.
//! Every path ends in a [`SubmissionOutcome`].

use std::sync::Arc;

use anyhow::{Context, Result};
use escape_submission_gate::{GateError, SubmissionGate};
use wreq::header::CONTENT_TYPE;
use wreq::redirect::Policy;
use wreq_util::Emulation;

use crate::adapter::{FORM_CONTENT_TYPE, ReservationAdapter};
use crate::config::EngineConfig;
use crate::earth_escape_adapter::EarthEscapeAdapter;
use crate::error::SubmissionError;
use crate::outcome::SubmissionOutcome;
use crate::reservation_request::ReservationRequest;
use crate::response_classifier::classify;
use crate::session::SessionContext;
use crate::zero_world_adapter::ZeroWorldAdapter;

#[derive(Clone)]
pub struct ReservationEngine {
    client: Arc<wreq::Client>,
    gate: SubmissionGate,
    zero_world: ZeroWorldAdapter,
    earth_escape: EarthEscapeAdapter,
    max_error_body_chars: usize,
}

impl ReservationEngine {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        // No cookie store: every attempt carries its own session explicitly.
        let client = wreq::Client::builder()
            .emulation(Emulation::Safari18_5)
            .redirect(Policy::none())
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .context("Failed to build HTTP client")?;

        let mut gate = SubmissionGate::with_concurrency_limit(config.max_concurrent_submissions)
            .deadline(config.submission_timeout());
        if let Some(per_second) = config.submissions_per_second {
            gate = gate.qps(per_second);
        }

        Ok(Self {
            client: Arc::new(client),
            gate,
            zero_world: ZeroWorldAdapter::new(config.zero_world_base_url.clone()),
            earth_escape: EarthEscapeAdapter::new(config.earth_escape_base_url.clone()),
            max_error_body_chars: config.max_error_body_chars,
        })
    }

    pub fn zero_world(&self) -> &ZeroWorldAdapter {
        &self.zero_world
    }

    pub fn earth_escape(&self) -> &EarthEscapeAdapter {
        &self.earth_escape
    }

    /// Stop accepting submissions; attempts already admitted finish normally.
    pub fn shutdown(&self) {
        self.gate.close();
    }

    /// Attempt one reservation. Never fails: every error becomes a `Failure`.
    pub async fn submit(&self, request: &ReservationRequest) -> SubmissionOutcome {
        let target = request.target();
        let overall_start = std::time::Instant::now();
        tracing::info!("Submitting {} reservation", target);

        let attempt = async {
            match request {
                ReservationRequest::ZeroWorld(r) => self.run_attempt(&self.zero_world, r).await,
                ReservationRequest::EarthEscape(r) => {
                    self.run_attempt(&self.earth_escape, r).await
                }
            }
        };

        let outcome = match self.gate.run(attempt).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => SubmissionOutcome::from_error(&err),
            Err(GateError::DeadlineExceeded(limit)) => {
                SubmissionOutcome::from_error(&SubmissionError::Timeout(limit))
            }
            Err(GateError::Closed) => SubmissionOutcome::from_error(&SubmissionError::GateClosed),
        };

        match &outcome {
            SubmissionOutcome::Success { .. } => {
                tracing::info!("{} reservation booked in {:?}", target, overall_start.elapsed())
            }
            SubmissionOutcome::Failure { message, kind } => tracing::warn!(
                "{} reservation failed ({}) after {:?}: {}",
                target,
                kind,
                overall_start.elapsed(),
                message
            ),
        }
        outcome
    }

    async fn run_attempt<A: ReservationAdapter>(
        &self,
        adapter: &A,
        request: &A::Request,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        adapter.check_eligibility(request)?;

        let session = SessionContext::acquire(&self.client, &adapter.listing_url(request)).await?;
        let form = adapter.build_form(request, &session);

        tracing::info!("Posting {} form to {}", adapter.target(), form.url);
        tracing::debug!("[post] headers: {:?}", form.headers);

        let http_start = std::time::Instant::now();
        let mut post = self
            .client
            .post(&form.url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE);
        for (name, value) in &form.headers {
            post = post.header(*name, value.as_str());
        }
        let response = post.body(form.encode_body()).send().await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(
            "[post] HTTP {} {} in {:?}: {} bytes",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown"),
            http_start.elapsed(),
            body.len()
        );

        let accepted = adapter.classify_success(status.as_u16());
        Ok(classify(accepted, &body, self.max_error_body_chars))
    }
}
