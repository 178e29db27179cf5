//! Name handshake
//!
//! Prompts a new connection for its display name and reads the reply.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::HandshakeError;
use crate::protocol::responses::NAME_PROMPT;

/// Sends the name prompt and treats the next received chunk (up to
/// `max_len` bytes) as the display name.
///
/// The name is decoded lossily and kept verbatim: no trimming, no length or
/// charset checks. A closed connection before any byte arrives is an error.
pub async fn request_name<R, W>(
    reader: &mut R,
    writer: &mut W,
    max_len: usize,
) -> Result<String, HandshakeError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    writer.write_all(NAME_PROMPT).await?;
    writer.flush().await?;

    let mut buffer = vec![0u8; max_len];
    let n = reader.read(&mut buffer).await?;
    if n == 0 {
        return Err(HandshakeError::ConnectionClosed);
    }

    Ok(String::from_utf8_lossy(&buffer[..n]).into_owned())
}
