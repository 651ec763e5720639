//! Source-keyed analysis cache and render request builder.
//!
//! The face service can be called successively with different rendering
//! options. The session caches one analysis per source and one raw payload
//! per binary source, so `/analyze-image` runs once per new picture rather
//! than once per render. New bytes for a source invalidate its analysis;
//! option changes never do.
//!
//! Per-source epoch counters guard the asynchronous gap between starting
//! an analysis call and storing its result: if the source's input changes
//! while a call is in flight, the stale completion is discarded.

use crate::client::FaceBackend;
use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::types::{
    Analysis, ImageIdentity, ImagePayload, RenderOptions, RenderRequest, RenderedImage, Source,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

const ANALYZE_LABEL: &str = "/analyze-image";
const PROCESS_LABEL: &str = "/process-image";

/// Tuning knobs for a render session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Analysis call timeout in milliseconds
    pub analyze_timeout_ms: u64,

    /// Render call timeout in milliseconds
    pub render_timeout_ms: u64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            analyze_timeout_ms: 30_000,
            render_timeout_ms: 60_000,
        }
    }
}

impl SessionOptions {
    /// Build session options from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            analyze_timeout_ms: config.limits.analyze_timeout_ms,
            render_timeout_ms: config.limits.render_timeout_ms,
        }
    }
}

/// The outcome of a full analyze-and-render sequence.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// The rendered image returned by the backend
    pub image: RenderedImage,

    /// Face count from the (possibly cached) analysis, for display
    pub faces_detected: u32,
}

/// Cache slots, mutated only under the session lock.
#[derive(Default)]
struct Slots {
    /// One analysis per source
    analyses: [Option<Analysis>; 3],

    /// One raw payload for each binary source (camera, custom image)
    payloads: [Option<ImagePayload>; 2],

    /// Selected test-image name
    test_image: Option<String>,
}

/// Source-keyed analysis cache and request builder.
///
/// Constructed once per session with an injected backend; all methods take
/// `&self`, so the session can be shared behind an `Arc`. The lock is
/// never held across an await point.
pub struct RenderSession {
    backend: Arc<dyn FaceBackend>,
    options: SessionOptions,
    slots: Mutex<Slots>,
    epochs: [AtomicU64; 3],
}

impl RenderSession {
    /// Create a session driving the given backend.
    pub fn new(backend: Arc<dyn FaceBackend>, options: SessionOptions) -> Self {
        Self {
            backend,
            options,
            slots: Mutex::new(Slots::default()),
            epochs: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump_epoch(&self, source: Source) {
        self.epochs[source.index()].fetch_add(1, Ordering::SeqCst);
    }

    fn epoch(&self, source: Source) -> u64 {
        self.epochs[source.index()].load(Ordering::SeqCst)
    }

    /// Payload slot index for a binary source.
    fn payload_index(source: Source) -> Option<usize> {
        match source {
            Source::Camera => Some(0),
            Source::CustomImage => Some(1),
            Source::TestImage => None,
        }
    }

    /// Clear the analysis slot and (if applicable) the payload slot for
    /// `source`. Idempotent; any in-flight analysis for the source is
    /// discarded on completion.
    pub fn invalidate(&self, source: Source) {
        // Epoch bumps happen under the lock so a concurrent snapshot
        // never pairs old slot state with a newer epoch.
        let mut slots = self.lock();
        self.bump_epoch(source);
        slots.analyses[source.index()] = None;
        if let Some(idx) = Self::payload_index(source) {
            slots.payloads[idx] = None;
        }
    }

    /// Store new raw bytes for a binary source.
    ///
    /// New bytes invalidate any prior analysis for the source: the next
    /// build re-runs the analysis step.
    pub fn set_payload(&self, source: Source, payload: ImagePayload) -> ClientResult<()> {
        let Some(idx) = Self::payload_index(source) else {
            return Err(ClientError::InvalidPayload {
                src: source,
                message: "test images are referenced by name, not bytes".to_string(),
            });
        };
        tracing::debug!("New {source} payload | {} bytes", payload.len());
        let mut slots = self.lock();
        self.bump_epoch(source);
        slots.analyses[source.index()] = None;
        slots.payloads[idx] = Some(payload);
        Ok(())
    }

    /// Select the active test image by backend file name.
    ///
    /// Selecting a different name invalidates the test-image analysis;
    /// reselecting the current name keeps the cache.
    pub fn select_test_image(&self, name: &str) {
        let mut slots = self.lock();
        if slots.test_image.as_deref() == Some(name) {
            return;
        }
        self.bump_epoch(Source::TestImage);
        slots.analyses[Source::TestImage.index()] = None;
        slots.test_image = Some(name.to_string());
    }

    /// The cached analysis for a source, if any.
    pub fn cached_analysis(&self, source: Source) -> Option<Analysis> {
        self.lock().analyses[source.index()].clone()
    }

    fn identity_for(slots: &Slots, source: Source) -> ClientResult<ImageIdentity> {
        match Self::payload_index(source) {
            Some(idx) => slots.payloads[idx]
                .clone()
                .map(ImageIdentity::Payload)
                .ok_or(ClientError::MissingInput(source)),
            None => slots
                .test_image
                .clone()
                .map(ImageIdentity::TestImage)
                .ok_or(ClientError::MissingInput(source)),
        }
    }

    /// Snapshot the state a build needs: identity, cached analysis, and
    /// the epoch the sequence started under.
    fn snapshot(&self, source: Source) -> ClientResult<(ImageIdentity, Option<Analysis>, u64)> {
        let slots = self.lock();
        let identity = Self::identity_for(&slots, source)?;
        Ok((
            identity,
            slots.analyses[source.index()].clone(),
            self.epoch(source),
        ))
    }

    /// The analysis for a source, running the analysis call on a cache
    /// miss.
    ///
    /// Exactly one call is issued per miss. A failed call leaves the slot
    /// empty so the next attempt retries; a successful call whose source
    /// was superseded mid-flight is discarded and reported as
    /// [`ClientError::Superseded`].
    pub async fn analysis(&self, source: Source) -> ClientResult<Analysis> {
        let (identity, cached, epoch) = self.snapshot(source)?;
        match cached {
            Some(analysis) => Ok(analysis),
            None => self.fetch_analysis(source, &identity, epoch).await,
        }
    }

    /// Build a fully populated render request for the given source and
    /// options, running the analysis step only on a cache miss.
    pub async fn build_request(
        &self,
        source: Source,
        options: RenderOptions,
    ) -> ClientResult<RenderRequest> {
        let (identity, cached, epoch) = self.snapshot(source)?;
        let analysis = match cached {
            Some(analysis) => analysis,
            None => self.fetch_analysis(source, &identity, epoch).await?,
        };

        Ok(RenderRequest {
            identity,
            annotations: analysis.annotations,
            faces_detected: analysis.faces_detected,
            options,
        })
    }

    /// Issue the analysis call and store the result, unless the source
    /// was superseded while the call was in flight.
    async fn fetch_analysis(
        &self,
        source: Source,
        identity: &ImageIdentity,
        epoch: u64,
    ) -> ClientResult<Analysis> {
        let analysis = self.analyze(identity).await?;
        let mut slots = self.lock();
        if self.epoch(source) != epoch {
            tracing::debug!("Discarding superseded analysis for {source}");
            return Err(ClientError::Superseded(source));
        }
        slots.analyses[source.index()] = Some(analysis.clone());
        Ok(analysis)
    }

    /// Run the full sequence: build a request (analyzing on cache miss)
    /// and render it.
    ///
    /// Failures are non-fatal and never retried automatically; the next
    /// caller-triggered attempt starts from scratch.
    pub async fn render(
        &self,
        source: Source,
        options: RenderOptions,
    ) -> ClientResult<RenderOutcome> {
        let request = self.build_request(source, options).await?;

        tracing::debug!("→ {PROCESS_LABEL}…");
        let image = tokio::time::timeout(
            Duration::from_millis(self.options.render_timeout_ms),
            self.backend.render(&request),
        )
        .await
        .map_err(|_| ClientError::Timeout {
            endpoint: PROCESS_LABEL.to_string(),
            timeout_ms: self.options.render_timeout_ms,
        })??;

        Ok(RenderOutcome {
            image,
            faces_detected: request.faces_detected,
        })
    }

    async fn analyze(&self, identity: &ImageIdentity) -> ClientResult<Analysis> {
        if let ImageIdentity::Payload(payload) = identity {
            tracing::debug!("→ {ANALYZE_LABEL}… | {} bytes", payload.len());
        } else {
            tracing::debug!("→ {ANALYZE_LABEL}…");
        }

        tokio::time::timeout(
            Duration::from_millis(self.options.analyze_timeout_ms),
            self.backend.analyze(identity),
        )
        .await
        .map_err(|_| ClientError::Timeout {
            endpoint: ANALYZE_LABEL.to_string(),
            timeout_ms: self.options.analyze_timeout_ms,
        })?
    }
}
