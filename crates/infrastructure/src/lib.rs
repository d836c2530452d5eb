//! Ferrous Recursor Infrastructure Layer
//!
//! Adapters behind the application ports: the wire codec, the resolution
//! cache, the iterative resolver, the UDP transport and the cache stores.
pub mod dns;
pub mod repositories;
