//! # Vidrelay - A Video Generation Task Relay
//!
//! Vidrelay sits between a demo UI and a third-party video generation
//! API. It exposes two thin HTTP endpoints (submit a job, poll its
//! status) and ships the polling state machine that drives a job to a
//! terminal state at a fixed cadence.
//!
#![deny(unsafe_code)]

//! ## Pieces
//!
//! - **Server**: `POST /api/generate` validates the request and creates
//!   an upstream job; `GET /api/status` normalizes the upstream record
//!   into `{taskId, state, videoUrl, model}`.
//! - **Upstream adapter**: [`providers::kie::KieClient`] speaks the
//!   Kie.ai jobs API behind the [`service::VideoJobService`] seam.
//! - **Poller**: [`poller::TaskPoller`] submits once, then polls every
//!   five seconds for up to sixty attempts, with an abort handle so a
//!   session can be cancelled without leaking timers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vidrelay::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Point the poller at a running relay server.
//!     let client = Arc::new(RelayClient::new("http://127.0.0.1:3000"));
//!     let poller = TaskPoller::new(client);
//!
//!     let outcome = poller.run(&GenerationRequest::text("a cat playing piano")).await;
//!     match outcome {
//!         PollOutcome::Succeeded { video_url } => println!("video: {video_url:?}"),
//!         other => println!("{:?}", other.user_message()),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod poller;
pub mod providers;
pub mod server;
pub mod service;
pub mod types;
pub mod utils;

pub use error::RelayError;

/// Commonly used types, one import away
pub mod prelude {
    pub use crate::client::RelayClient;
    pub use crate::config::RelayConfig;
    pub use crate::error::RelayError;
    pub use crate::poller::{PollOutcome, PollPhase, PollerConfig, TaskPoller, progress_percent};
    pub use crate::providers::kie::KieClient;
    pub use crate::server::build_router;
    pub use crate::service::VideoJobService;
    pub use crate::types::{
        GenerationMode, GenerationRequest, TaskHandle, TaskState, TaskStatus,
    };
    pub use crate::utils::cancel::CancelHandle;
}
