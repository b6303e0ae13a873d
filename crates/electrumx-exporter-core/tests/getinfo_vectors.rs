//! `getinfo` reply vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use electrumx_exporter_core::protocol::{decode_response, GetInfo, LineFramer};

fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

#[test]
fn parse_full_reply_ignores_extra_keys() {
    let v: serde_json::Value = serde_json::from_str(&load("getinfo_full.json")).unwrap();
    let info = GetInfo::from_value(v).unwrap();
    assert_eq!(info.daemon_height, 800000);
    assert_eq!(info.db_height, 799999);
    assert_eq!(info.db_flush_count, 12);
    assert_eq!(info.peers.total, 13);
    assert_eq!(info.peers.bad, 1);
    assert_eq!(info.request_total, 500);
    assert_eq!(info.sessions.count_with_subs, 3);
    assert_eq!(info.sessions.pending_requests, 0);
    assert_eq!(info.txs_sent, 42);
}

#[test]
fn missing_nested_field_fails_whole_reply() {
    let v: serde_json::Value =
        serde_json::from_str(&load("getinfo_missing_sessions_subs.json")).unwrap();
    let err = GetInfo::from_value(v).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "PROTOCOL");
    assert!(err.to_string().contains("subs"));
}

#[test]
fn framed_response_decodes_to_getinfo() {
    let mut framer = LineFramer::new(0);
    framer.extend(load("response_getinfo.jsonl").as_bytes());
    let line = framer.next_frame().unwrap().expect("one line");
    let result = decode_response(&line, 0).unwrap();
    let info = GetInfo::from_value(result).unwrap();
    assert_eq!(info.daemon_height, 1);
    assert!(framer.next_frame().unwrap().is_none());
}
