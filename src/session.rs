use crate::config::AnalyzerConfig;
use crate::probe::StatusProbe;
use crate::protocol::{self, AnalyzeRequest, PagePayload};
use crate::results::PageFacts;
use crate::scoring::{self, ScoreReport};
use crate::target::TargetPage;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Starts an analysis in the background and returns a receiver that yields
/// exactly one payload.
pub fn start(
    request: AnalyzeRequest,
    target: Arc<dyn TargetPage>,
    probe: Arc<dyn StatusProbe>,
    config: AnalyzerConfig,
) -> mpsc::Receiver<PagePayload> {
    let (tx, rx) = mpsc::channel::<PagePayload>(1);

    tokio::spawn(async move {
        let payload = protocol::respond(&request, target.as_ref(), probe, &config).await;
        if let Err(e) = tx.send(payload).await {
            ::log::error!("Failed to send page payload: {}", e);
        }
    });

    rx
}

/// Consumer-side view of the current page.
///
/// Holds sentinel facts until the first payload arrives, then the
/// normalized facts of the latest payload.
#[derive(Debug, Clone)]
pub struct PageDataStore {
    facts: PageFacts,
    data_loaded: bool,
}

impl Default for PageDataStore {
    fn default() -> Self {
        Self {
            facts: PageFacts::sentinel(),
            data_loaded: false,
        }
    }
}

impl PageDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current facts with a received payload
    pub fn apply(&mut self, payload: PagePayload) {
        self.facts = PageFacts::from(payload);
        if !self.data_loaded {
            ::log::debug!("First page payload received for {}", self.facts.url);
        }
        self.data_loaded = true;
    }

    /// Wait for the next payload and apply it. A channel that closes
    /// without answering is treated as a failed extraction.
    pub async fn receive(&mut self, rx: &mut mpsc::Receiver<PagePayload>) -> &PageFacts {
        match rx.recv().await {
            Some(payload) => self.apply(payload),
            None => {
                ::log::warn!("Analysis ended without a response");
                self.apply(PagePayload::sentinel());
            }
        }
        &self.facts
    }

    pub fn page_data(&self) -> &PageFacts {
        &self.facts
    }

    pub fn data_loaded(&self) -> bool {
        self.data_loaded
    }

    /// Scores for the current facts, recomputed on every call
    pub fn report(&self) -> ScoreReport {
        scoring::score(&self.facts)
    }
}
