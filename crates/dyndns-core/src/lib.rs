// # dyndns-core
//
// Core library for the dyndns update service.
//
// ## Architecture Overview
//
// This library turns a normalized dynamic-DNS update request into
// authoritative zone transactions:
//
// - **plan**: validate a raw request (auth, domains, address family) into an
//   UpdatePlan with a derived reverse-lookup name
// - **batch**: render the per-domain zone-update directive sequence
// - **ZoneUpdater**: trait seam to whatever applies a batch to the zone
// - **UpdateEngine**: the per-request orchestration loop with its fail-fast
//   multi-domain policy
//
// ## Design Principles
//
// 1. **Pure core**: validation and batch rendering are deterministic and
//    side-effect-free; only ZoneUpdater implementations touch the world
// 2. **Fail fast**: invalid requests never reach the transaction stage, and
//    the first failed domain ends the request
// 3. **Request-scoped**: no state survives a request; configuration is the
//    only long-lived value and it is read-only

pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod plan;
pub mod traits;

// Re-export core types for convenience
pub use batch::DirectiveBatch;
pub use config::UpdateConfig;
pub use engine::{UpdateEngine, UpdateOutcome};
pub use error::{Error, Result};
pub use plan::{validate, AddressKind, RawUpdate, UpdatePlan};
pub use traits::ZoneUpdater;
