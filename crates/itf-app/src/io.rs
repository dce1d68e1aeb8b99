use anyhow::Context;
use itf_io::native;
use itf_types::{TranslateRequest, TranslateResponse, WireMessage};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::sync::CancellationToken;

/// Forward `translate` messages from the browser into the worker queue.
///
/// Each request is queued before the next frame is read, so a full queue
/// holds the reader back.
pub async fn read_requests<R>(
    reader: R,
    requests_tx: AsyncSender<TranslateRequest>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
{
    let tx = &requests_tx;
    let forward = native::listen(reader, move |message: WireMessage| async move {
        match message {
            WireMessage::Translate(request) => {
                tx.send(request)
                    .await
                    .context("Translation worker stopped accepting requests")?;
            }
            other => tracing::warn!("Ignoring unexpected message from browser: {:?}", other),
        }
        anyhow::Ok(())
    });

    tokio::select! {
        result = forward => {
            result?;
            tracing::info!("Browser closed the message stream");
        }
        _ = cancel.cancelled() => {
            tracing::info!("Request reader stopping");
        }
    }

    Ok(())
}

/// Write worker responses back to the browser
pub async fn write_responses<W>(
    mut writer: W,
    responses_rx: AsyncReceiver<TranslateResponse>,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Ok(response) = responses_rx.recv().await {
        let id = response.id.clone();
        if let Err(e) =
            native::write_message(&mut writer, &WireMessage::TranslationResult(response)).await
        {
            tracing::error!("Failed to write result for {}: {}", id, e);
            let fallback = TranslateResponse::failed(id, "Translation result could not be delivered");
            native::write_message(&mut writer, &WireMessage::TranslationResult(fallback)).await?;
        }
    }

    tracing::debug!("Response writer stopping");
    Ok(())
}
