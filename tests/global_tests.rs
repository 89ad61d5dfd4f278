//! Forwarding functions on the process-wide logger
//!
//! All tests share one registry, so each one installs a fresh logger while
//! holding `REGISTRY_LOCK`.

use context_logger::global;
use context_logger::prelude::*;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;

static REGISTRY_LOCK: Mutex<()> = Mutex::new(());

fn install_memory(level: LogLevel) -> MemorySink {
    let sink = MemorySink::new();
    global::install(Logger::with_sink(sink.clone(), level).unwrap());
    sink
}

#[test]
fn test_forwarding_acts_on_single_instance() {
    let _guard = REGISTRY_LOCK.lock();
    let sink = install_memory(LogLevel::Info);

    let a = global::set(json!({"a": 1}));
    let b = global::custom_field(json!({"x": 9}));
    assert!(Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&a, &global::instance()));

    global::info("CODE1", "hello", json!({"y": 1})).unwrap();
    let records = sink.records();
    assert_eq!(records[0].record.data, FieldMap::from(json!({"a": 1, "y": 1})));
    assert_eq!(records[0].record.custom.get("x"), Some(&json!(9)));
}

#[test]
fn test_forwarding_with_level() {
    let _guard = REGISTRY_LOCK.lock();
    let sink = install_memory(LogLevel::Info);

    global::with_level(LogLevel::Warn).unwrap();
    global::debug("D", "d", ()).unwrap();
    global::trace("T", "t", ()).unwrap();
    global::info("I", "i", ()).unwrap();
    global::warn("W", "w", None, ()).unwrap();
    global::error("E", "e", Some(ErrorInfo::new("Io", "closed")), ()).unwrap();
    global::fatal("F", "f", None, ()).unwrap();

    let codes: Vec<String> = sink.records().into_iter().map(|r| r.record.code).collect();
    assert_eq!(codes, vec!["W", "E", "F"]);

    assert!(global::with_level_name("bogus-level").is_err());
    assert_eq!(global::instance().level(), LogLevel::Warn);
    global::flush().unwrap();
}

#[test]
fn test_forwarding_sub_logger() {
    let _guard = REGISTRY_LOCK.lock();
    install_memory(LogLevel::Error);
    global::set(json!({"a": 1}));

    let child = global::sub_logger().unwrap();
    global::set(json!({"a": 2}));

    assert_eq!(child.level(), LogLevel::Error);
    assert_eq!(child.context(), FieldMap::from(json!({"a": 1})));
    assert_eq!(global::instance().context(), FieldMap::from(json!({"a": 2})));
}

#[test]
fn test_install_returns_previous() {
    let _guard = REGISTRY_LOCK.lock();
    install_memory(LogLevel::Info);
    let before = global::instance();

    let previous = global::install(Logger::with_sink(NullSink, LogLevel::Fatal).unwrap());
    assert!(Arc::ptr_eq(&before, &previous));
    assert_eq!(global::instance().level(), LogLevel::Fatal);
    assert_eq!(global::instance().sink_name(), "null");
}
