//! Line-oriented session driver: one utterance per input line.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::assistant::Assistant;
use crate::error::ChatResult;
use crate::session::Conversation;

/// Answer every line of `input` until end of input. Returns the number of
/// turns handled.
pub async fn run<R, W>(
    assistant: &Assistant,
    conversation: &mut Conversation,
    input: R,
    output: &mut W,
) -> ChatResult<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut turns = 0;

    while let Some(line) = lines.next_line().await? {
        let reply = assistant.respond(conversation, &line);
        output.write_all(reply.text.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
        turns += 1;
    }

    tracing::info!(
        conversation = %conversation.id(),
        started_at = %conversation.started_at(),
        turns,
        "input closed"
    );
    Ok(turns)
}
