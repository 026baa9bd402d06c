//! netconsole: Debian network console
//!
//! A library for the interactive console that lists and rewrites the
//! ifupdown interfaces file, probes hosts over ICMP and checks a remote
//! HTTP endpoint.

pub mod config;
pub mod console;
pub mod health;
pub mod network;
pub mod probe;
pub mod service;
pub mod store;
pub mod time;
pub mod update;
