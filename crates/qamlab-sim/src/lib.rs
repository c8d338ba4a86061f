//! # QAMLab Simulation Layer
//!
//! One-shot simulation of square M-QAM transmission over an AWGN channel,
//! built on the DSP primitives in `qamlab-core`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ SymbolSource │───►│   Channel    │───►│   Detector   │
//! │ (random idx) │    │   (AWGN)     │    │ (nearest pt) │
//! └──────────────┘    └──────────────┘    └──────────────┘
//!        └──────────── run_simulation ───────────┘
//!                           │
//!                           ▼
//!                   SimulationReport
//!        (constellation + waveform + error rate)
//! ```
//!
//! The report is plain serializable data; rendering is somebody else's job.
//!
//! ## Example
//!
//! ```rust
//! use qamlab_sim::{run_simulation, SimulationConfig};
//!
//! let report = run_simulation(&SimulationConfig {
//!     modulation_order: 4,
//!     num_bits: 1000,
//!     snr_db: 12.0,
//!     seed: Some(42),
//!     ..Default::default()
//! }).unwrap();
//!
//! println!("{}", report.summary);
//! assert_eq!(report.noisy_i.len(), report.noisy_q.len());
//! ```

pub mod channel;
pub mod simulator;
pub mod source;

pub use channel::{Channel, ChannelConfig, ChannelModel, ChannelStats};
pub use simulator::{run_simulation, sweep_snr, SimError, SimResult, SimulationConfig, SimulationReport};
pub use source::SymbolSource;
