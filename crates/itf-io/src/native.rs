//! Browser native messaging: each message is a 32-bit length in native byte
//! order followed by that many bytes of UTF-8 JSON.

use std::io::ErrorKind;

use anyhow::bail;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Largest message the browser sends to a host
pub const MAX_INCOMING_BYTES: usize = 64 * 1024 * 1024;

/// Largest message the browser accepts from a host
pub const MAX_OUTGOING_BYTES: usize = 1024 * 1024;

/// Read one raw frame. `None` on a clean end of stream.
pub async fn read_frame<R>(reader: &mut R) -> Result<Option<Vec<u8>>, anyhow::Error>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0u8; 4];
    match reader.read_exact(&mut header).await {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }

    let len = u32::from_ne_bytes(header) as usize;
    if len > MAX_INCOMING_BYTES {
        bail!("incoming message of {len} bytes exceeds {MAX_INCOMING_BYTES}");
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    Ok(Some(payload))
}

pub async fn read_message<R, T>(reader: &mut R) -> Result<Option<T>, anyhow::Error>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    match read_frame(reader).await? {
        Some(payload) => Ok(Some(serde_json::from_slice(&payload)?)),
        None => Ok(None),
    }
}

pub async fn write_message<W, T>(writer: &mut W, message: &T) -> Result<(), anyhow::Error>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let payload = serde_json::to_vec(message)?;
    if payload.len() > MAX_OUTGOING_BYTES {
        bail!(
            "outgoing message of {} bytes exceeds {MAX_OUTGOING_BYTES}",
            payload.len()
        );
    }

    writer
        .write_all(&(payload.len() as u32).to_ne_bytes())
        .await?;
    writer.write_all(&payload).await?;
    writer.flush().await?;
    Ok(())
}

/// Decode frames until the stream ends and hand each one to `on_message`.
///
/// The next frame is not read until the handler's future completes, so a
/// handler that waits on a full queue holds the reader back. Frames that
/// are not valid JSON for `T` are logged and skipped; a handler error ends
/// the loop.
pub async fn listen<R, T, F, Fut>(mut reader: R, mut on_message: F) -> Result<(), anyhow::Error>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<(), anyhow::Error>>,
{
    while let Some(payload) = read_frame(&mut reader).await? {
        match serde_json::from_slice::<T>(&payload) {
            Ok(message) => on_message(message).await?,
            Err(e) => tracing::warn!("Skipping malformed message ({} bytes): {}", payload.len(), e),
        }
    }

    tracing::debug!("Native messaging stream closed");
    Ok(())
}
