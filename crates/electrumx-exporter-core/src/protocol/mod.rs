//! Daemon wire protocol.
//!
//! - `rpc`: JSON-RPC 2.0 envelopes, one document per `\n`-terminated line
//! - `getinfo`: typed reply of the daemon's `getinfo` call

pub mod getinfo;
pub mod rpc;

pub use getinfo::{GetInfo, PeerCounts, SessionCounts, GETINFO_METHOD};
pub use rpc::{decode_response, encode_request, LineFramer};
