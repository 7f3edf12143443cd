//! Line-oriented REPL over any async reader and writer.
//!
//! Stdin/stdout in the binary, in-memory buffers in tests. The loop ends
//! when the session completes, is cancelled, or input runs out.

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::collector::{Collector, Step};

const RULE: &str = "============================================================";

/// Run a conversation to the end and return the final step.
///
/// Blank lines are ignored. On completion the final payload is printed as
/// pretty JSON.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub async fn run_repl<R, W>(
    collector: &mut Collector,
    input: R,
    output: &mut W,
) -> anyhow::Result<Step>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    write_banner(output).await?;

    let greeting = collector.submit_turn("start").await;
    say(output, &greeting.reply).await?;

    let mut lines = input.lines();
    while !collector.step().is_terminal() {
        output.write_all(b"You: ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            output
                .write_all(b"\n\nInput closed. Campaign creation cancelled.\n")
                .await?;
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let outcome = collector.submit_turn(line).await;
        say(output, &outcome.reply).await?;
    }

    if let Some(payload) = collector.payload() {
        let json = serde_json::to_string_pretty(payload).context("failed to serialize payload")?;
        let block = format!("{RULE}\n📦 FINAL AD PAYLOAD (JSON)\n{RULE}\n{json}\n{RULE}\n");
        output.write_all(block.as_bytes()).await?;
    }
    output.flush().await?;

    Ok(collector.step())
}

async fn write_banner<W: AsyncWrite + Unpin>(output: &mut W) -> anyhow::Result<()> {
    let banner = format!(
        "\n{RULE}\n🎯 AD CAMPAIGN CREATION ASSISTANT\n{RULE}\n\
         I'll guide you through creating an ad campaign.\n\
         Type 'quit' or 'exit' at any time to stop.\n{RULE}\n\n"
    );
    output.write_all(banner.as_bytes()).await?;
    Ok(())
}

async fn say<W: AsyncWrite + Unpin>(output: &mut W, reply: &str) -> anyhow::Result<()> {
    output
        .write_all(format!("\n🤖 Assistant: {reply}\n\n").as_bytes())
        .await?;
    output.flush().await?;
    Ok(())
}
