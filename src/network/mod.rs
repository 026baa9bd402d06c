//! Network layer: adapter representation and address rules.
//!
//! This module provides types and helpers for:
//! - Representing interfaces-file adapters ([`Adapter`], [`AddressFamily`], [`ConfigMethod`])
//! - Private address classification ([`is_private`])
//! - Netmask conversions ([`mask_from_prefix`], [`prefix_len`])
//! - The interface naming allow-list ([`NamePolicy`])

mod adapter;
mod address;
mod naming;

pub use adapter::{Adapter, AddressFamily, ConfigMethod, Stanza};
pub use address::{is_private, mask_from_prefix, parse_address, prefix_len};
pub use naming::NamePolicy;
