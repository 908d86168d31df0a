// src/pipeline.rs
//! Pipeline capability traits for the three stages of a digest run, and the
//! orchestrator that wires them to WeRead and the webhook.
//!
//! Each trait describes a single capability, enabling testing each stage in isolation.

use crate::analytics::{measure_library, measure_rendered, LibraryMeasurement, RenderMeasurement};
use crate::api::{FetchMetadata, FetchResult, LibraryFetcher, ReadingRepository};
use crate::config::DeliveryMode;
use crate::digest::{collect_memos, Digest, Memo};
use crate::error::AppError;
use crate::formatting::render_book;
use crate::model::BookHighlights;
use crate::output::{deliver, DeliveryTarget, OutputPlan, OutputReport, WebhookPublisher};
use crate::types::{DigestSize, RenderedDigest};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Retrieves the reader's highlighted library.
#[async_trait::async_trait]
pub trait LibrarySource {
    async fn fetch(&self) -> FetchResult<Vec<BookHighlights>>;
}

/// Renders a library and draws a digest from it.
pub trait DigestComposer {
    fn compose(&self, library: &[BookHighlights]) -> Composition;
}

/// Delivers a rendered digest to its destination.
#[async_trait::async_trait]
pub trait DigestDelivery {
    async fn deliver(&self, digest: RenderedDigest) -> OutputReport;
}

/// Outcome of the compose stage.
#[derive(Debug, Clone, Default)]
pub struct Composition {
    /// Number of memos the digest was drawn from.
    pub pool_size: usize,
    pub render: RenderMeasurement,
    /// `None` when the pool was empty.
    pub digest: Option<Digest>,
}

/// What happened during one run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub fetch: FetchMetadata,
    pub library: LibraryMeasurement,
    pub composition: Composition,
    /// `None` when nothing was delivered.
    pub output: Option<OutputReport>,
}

impl RunSummary {
    pub fn drawn(&self) -> usize {
        self.composition.digest.as_ref().map_or(0, Digest::len)
    }
}

/// Renders every book and flattens the callouts into one memo pool.
pub fn build_memo_pool(library: &[BookHighlights]) -> (Vec<Memo>, RenderMeasurement) {
    let mut measurement = RenderMeasurement::default();
    let mut pool = Vec::new();
    for entry in library {
        let rendered = render_book(entry);
        measure_rendered(&mut measurement, &rendered);
        pool.extend(collect_memos(&entry.book, &rendered));
    }
    (pool, measurement)
}

/// Orchestrates one WeRead-to-webhook run: fetch → compose → deliver.
pub struct WereadToDiscord {
    repository: Arc<dyn ReadingRepository>,
    publisher: WebhookPublisher,
    delivery: DeliveryMode,
    digest_size: DigestSize,
    seed: Option<u64>,
}

impl WereadToDiscord {
    pub fn new(
        repository: Arc<dyn ReadingRepository>,
        delivery: DeliveryMode,
    ) -> Result<Self, AppError> {
        Ok(Self {
            repository,
            publisher: WebhookPublisher::new()?,
            delivery,
            digest_size: DigestSize::default(),
            seed: None,
        })
    }

    pub fn with_digest_size(mut self, digest_size: DigestSize) -> Self {
        self.digest_size = digest_size;
        self
    }

    /// Fixes the random draw for reproducible digests.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Runs all three stages. Only a delivered digest produces an output report.
    pub async fn run(&self) -> RunSummary {
        let fetched = self.fetch().await;
        let library = measure_library(&fetched.data);
        let composition = self.compose(&fetched.data);

        let output = match &composition.digest {
            Some(digest) => Some(self.deliver(digest.compose()).await),
            None => {
                log::warn!("No highlights to draw from, nothing to publish");
                None
            }
        };

        RunSummary {
            fetch: fetched.metadata,
            library,
            composition,
            output,
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[async_trait::async_trait]
impl LibrarySource for WereadToDiscord {
    async fn fetch(&self) -> FetchResult<Vec<BookHighlights>> {
        let fetcher = LibraryFetcher::new(Arc::clone(&self.repository));
        let result = fetcher.fetch_library().await;

        log::info!(
            "Fetched {} of {} books ({} skipped)",
            result.metadata.books_fetched,
            result.metadata.books_listed,
            result.metadata.books_skipped,
        );
        for warning in &result.metadata.warnings {
            log::warn!("Fetch warning: {}", warning);
        }
        result
    }
}

impl DigestComposer for WereadToDiscord {
    fn compose(&self, library: &[BookHighlights]) -> Composition {
        let (pool, render) = build_memo_pool(library);
        log::info!("Drawing {} of {} memos", self.digest_size.get(), pool.len());

        let digest = Digest::draw(&pool, self.digest_size, &mut self.rng());
        Composition {
            pool_size: pool.len(),
            render,
            digest,
        }
    }
}

#[async_trait::async_trait]
impl DigestDelivery for WereadToDiscord {
    async fn deliver(&self, digest: RenderedDigest) -> OutputReport {
        let target = match &self.delivery {
            DeliveryMode::Webhook(url) => DeliveryTarget::PostWebhook {
                url: url.clone(),
                digest,
            },
            DeliveryMode::Stdout => DeliveryTarget::PrintToStdout { digest },
        };
        deliver(OutputPlan::new().with_operation(target), &self.publisher).await
    }
}
