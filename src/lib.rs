//! Telnyx Account Readiness Probe Tool
//!
//! A CLI tool that verifies a Telnyx account is ready for platform
//! integration by probing five capability areas of the Telnyx v2 API:
//!
//! - **connectivity** - number-lookup endpoint reachability
//! - **balance** - account credit balance
//! - **sms** - SMS send through the first messaging profile
//! - **voice** - call initiation through the first call control connection
//! - **esim** - SIM card group availability
//!
//! The sms and voice probes place real traffic: with a valid key, a
//! configured outbound number, and a destination phone, a live SMS is sent
//! and a live call is initiated.
//!
//! # Example Usage
//!
//! ```bash
//! # Run the full suite
//! telnyx-preflight run --api-key $TELNYX_API_KEY --phone +15551234567
//!
//! # Run without SMS/voice (no destination phone)
//! telnyx-preflight run --non-interactive
//!
//! # Scaffold a configuration file
//! telnyx-preflight init --output telnyx-preflight.toml
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod probes;
pub mod suite;

pub use cli::{Cli, Commands};
pub use config::{Config, OutputFormat};
pub use error::{AppError, ExitCode, Result};
pub use output::{get_formatter, ProbeSet, SuiteReport};
pub use probes::{all_probes, Probe, ProbeContext, ProbeResult};
pub use suite::SuiteRunner;
