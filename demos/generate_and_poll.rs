//! Generate a video and poll it to completion
//!
//! Submits a text-to-video job through a running relay server, then
//! watches the polling session's progress. Ctrl-C cancels the session
//! through its abort handle instead of leaving the loop running.
//!
//! ## Setup
//! ```bash
//! export KIE_API_KEY="your-key"
//! cargo run &
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example generate_and_poll -- "a cat playing piano"
//! ```

use std::sync::Arc;

use vidrelay::poller::TIMEOUT_MESSAGE;
use vidrelay::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let relay_url =
        std::env::var("VIDRELAY_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
    let prompt = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let prompt = if prompt.is_empty() {
        "a cat playing piano".to_string()
    } else {
        prompt
    };

    let client = Arc::new(RelayClient::new(relay_url));
    let poller = TaskPoller::new(client);

    let handle = poller.spawn(GenerationRequest::text(prompt));
    let mut progress = handle.progress();

    let watcher = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            match &*progress.borrow() {
                PollPhase::Submitting => println!("Submitting task..."),
                PollPhase::Polling { attempt, percent } => {
                    println!("Generating video... ({percent}%, attempt {attempt})");
                }
                PollPhase::Idle => {}
            }
        }
    });

    let cancel = handle.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("Cancelling...");
            cancel.cancel();
        }
    });

    let outcome = handle.join().await;
    watcher.abort();

    match outcome {
        PollOutcome::Succeeded { video_url } => match video_url {
            Some(url) => println!("Video ready: {url}"),
            None => println!("Job succeeded but no URL was reported yet"),
        },
        PollOutcome::Failed { message } => println!("Failed: {message}"),
        PollOutcome::TimedOut => println!("{TIMEOUT_MESSAGE}"),
        PollOutcome::Cancelled => println!("Cancelled"),
    }

    Ok(())
}
