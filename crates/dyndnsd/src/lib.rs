// # dyndnsd
//
// HTTP daemon for the dyndns update service.
//
// This is a thin integration layer: it loads configuration, wires the
// nsupdate-backed engine, and exposes the two request dialects over HTTP.
// All update logic lives in dyndns-core; the subprocess boundary lives in
// dyndns-nsupdate.

pub mod api;
pub mod config;

pub use api::{router, AppState};
pub use config::DaemonConfig;
