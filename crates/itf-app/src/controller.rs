use std::sync::Arc;
use std::time::Duration;

use itf_translator::{CachedTranslator, DeepSeekTranslator, Translator};
use itf_types::{TranslateRequest, TranslateResponse};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::{read_requests, write_responses};
use crate::state::AppState;

/// Queues between the reader, the translation worker and the writer
pub struct ChannelSet {
    pub requests: (AsyncSender<TranslateRequest>, AsyncReceiver<TranslateRequest>),
    pub responses: (AsyncSender<TranslateResponse>, AsyncReceiver<TranslateResponse>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            requests: kanal::bounded_async(capacity),
            responses: kanal::bounded_async(capacity),
        }
    }
}

/// Task spawning and lifecycle for the host process
pub struct AppController {
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Translator described by the current config, cached
    pub async fn build_translator(&self) -> Arc<dyn Translator> {
        let config = self.state.config.read().await;
        let translator = DeepSeekTranslator::new(&config.translator);

        let metadata = translator.metadata();
        if metadata.requires_api_key && config.translator.api_key.is_empty() {
            tracing::warn!(
                "{} needs an API key; every translation will fail until one is set",
                metadata.name
            );
        }

        Arc::new(CachedTranslator::new(
            translator,
            Duration::from_secs(config.translator.cache_ttl_secs),
            config.translator.cache_capacity,
        ))
    }

    pub async fn spawn_tasks<R, W>(&self, reader: R, writer: W) -> JoinSet<anyhow::Result<()>>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let translator = self.build_translator().await;
        self.spawn_with_translator(reader, writer, translator).await
    }

    /// Spawn reader, worker and writer around an explicit translator.
    ///
    /// The tasks wind down on their own once `reader` hits end of stream
    /// and every in-flight response is written.
    pub async fn spawn_with_translator<R, W>(
        &self,
        reader: R,
        writer: W,
        translator: Arc<dyn Translator>,
    ) -> JoinSet<anyhow::Result<()>>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let capacity = self.state.config.read().await.channel_capacity.max(1);
        let ChannelSet {
            requests: (requests_tx, requests_rx),
            responses: (responses_tx, responses_rx),
        } = ChannelSet::new(capacity);

        let mut tasks = JoinSet::new();

        tasks.spawn(read_requests(
            reader,
            requests_tx,
            self.cancel_token.child_token(),
        ));

        tasks.spawn(event_loop(
            requests_rx,
            responses_tx,
            translator,
            self.cancel_token.child_token(),
        ));

        tasks.spawn(write_responses(writer, responses_rx));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
