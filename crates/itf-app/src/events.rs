use std::sync::Arc;

use itf_translator::Translator;
use itf_types::{TranslateRequest, TranslateResponse};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Worker loop: one concurrent translation per request, responses in
/// completion order
pub async fn event_loop(
    requests_rx: AsyncReceiver<TranslateRequest>,
    responses_tx: AsyncSender<TranslateResponse>,
    translator: Arc<dyn Translator>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut in_flight = JoinSet::new();

    tracing::info!("[WORKER] Waiting for translation requests");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[WORKER] Cancelled with {} in flight", in_flight.len());
                in_flight.shutdown().await;
                return Ok(());
            }
            request = requests_rx.recv() => {
                let Ok(request) = request else {
                    break;
                };

                if request.text.trim().is_empty() {
                    tracing::debug!("[WORKER] Ignoring empty request {}", request.id);
                    continue;
                }

                let translator = translator.clone();
                let responses_tx = responses_tx.clone();
                in_flight.spawn(async move {
                    let response = handle_translate(translator.as_ref(), request).await;
                    if let Err(e) = responses_tx.send(response).await {
                        tracing::error!("[WORKER] Failed to queue response: {e}");
                    }
                });
            }
            Some(result) = in_flight.join_next(), if !in_flight.is_empty() => {
                if let Err(e) = result {
                    tracing::error!("[WORKER] Translation task failed: {e}");
                }
            }
        }
    }

    tracing::info!("[WORKER] Request stream closed, finishing {} in flight", in_flight.len());
    while let Some(result) = in_flight.join_next().await {
        if let Err(e) = result {
            tracing::error!("[WORKER] Translation task failed: {e}");
        }
    }

    Ok(())
}

/// Translate one request. Context is preferred over the bare text when present.
pub async fn handle_translate(
    translator: &dyn Translator,
    request: TranslateRequest,
) -> TranslateResponse {
    tracing::debug!("[WORKER] Translating {}", request.id);

    match translator.translate(request.query()).await {
        Ok(translation) => {
            tracing::debug!(
                "[WORKER] {} translated {} into {}",
                translation.provider,
                request.id,
                translation.to
            );
            TranslateResponse::ok(request.id, translation.text)
        }
        Err(e) => {
            tracing::error!("[WORKER] Translation error for {}: {}", request.id, e);
            TranslateResponse::failed(request.id, e.to_string())
        }
    }
}
