//! Time-window video trimming via an external transcoder
//!
//! This module provides a trait-based architecture for trimming a downloaded
//! video to a `[start, start + duration)` window. The concrete tool sits
//! behind the [`Transcoder`] trait so it can be swapped out, and mocked in
//! tests:
//!
//! - [`FfmpegTranscoder`]: invokes an external `ffmpeg` binary
//! - [`UnavailableTranscoder`]: stub used when no binary is found, so video
//!   trims fail per-item instead of crashing the process
//!
//! ## Usage
//!
//! ```no_run
//! use stock_dl::transcode::{FfmpegTranscoder, Transcoder};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transcoder = FfmpegTranscoder::from_path()
//!         .expect("ffmpeg not found in PATH");
//!
//!     transcoder
//!         .trim(Path::new("raw.mp4"), 2.0, 4.0, Path::new("clip.mp4"))
//!         .await?;
//!     Ok(())
//! }
//! ```

mod ffmpeg;
mod traits;
mod unavailable;

pub use ffmpeg::FfmpegTranscoder;
pub use traits::Transcoder;
pub use unavailable::UnavailableTranscoder;
