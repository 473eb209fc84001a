use dns_repeater_application::events::ResolutionEvent;
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

/// Turns resolution events into structured log records.
///
/// Runs as its own task so the resolution path only pays for a channel send.
#[derive(Debug, Default)]
pub struct ResolutionEventLogger {
    processed: u64,
}

impl ResolutionEventLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(
        mut self,
        mut rx: mpsc::UnboundedReceiver<ResolutionEvent>,
    ) -> tokio::task::JoinHandle<u64> {
        tokio::spawn(async move {
            debug!("ResolutionEventLogger: starting consumer");

            while let Some(event) = rx.recv().await {
                self.record(&event);
            }

            debug!(
                total_events = self.processed,
                "ResolutionEventLogger: consumer shutting down"
            );
            self.processed
        })
    }

    pub fn record(&mut self, event: &ResolutionEvent) {
        self.processed += 1;
        let kind = event.kind();

        match event {
            ResolutionEvent::SuffixLearned { suffix } => {
                info!(event = kind, suffix = %suffix, "Search suffix learned");
            }
            ResolutionEvent::SentinelAnswered { name } => {
                debug!(event = kind, domain = %name, "Sentinel probe answered");
            }
            ResolutionEvent::SuffixStripped {
                original,
                stripped,
                record_type,
            } => {
                debug!(event = kind, from = %original, to = %stripped, record_type = %record_type, "Suffix stripped");
            }
            ResolutionEvent::FallbackTriggered { name, reason } => {
                info!(event = kind, domain = %name, reason = %reason, "Falling back to upstream");
            }
            ResolutionEvent::TypeNormalized { name } => {
                trace!(event = kind, domain = %name, "AAAA normalized to A");
            }
            ResolutionEvent::Resolved {
                name,
                record_type,
                path,
                answers,
            } => {
                debug!(
                    event = kind,
                    domain = %name,
                    record_type = %record_type,
                    path = path.as_str(),
                    answers = *answers,
                    "Query resolved"
                );
            }
            ResolutionEvent::Failed {
                name,
                record_type,
                path,
                error,
            } => {
                debug!(
                    event = kind,
                    domain = %name,
                    record_type = %record_type,
                    path = path.as_str(),
                    error = %error,
                    "Query failed"
                );
            }
        }
    }
}
