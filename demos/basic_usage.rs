//! Basic logger usage example
//!
//! Demonstrates the default instance, persistent context, custom fields,
//! sub-loggers and level changes.
//!
//! Run with: cargo run --example basic_usage

use context_logger::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Context Logger - Basic Usage Example ===\n");

    println!("1. Default instance (level info, JSON lines):");
    global::custom_field(json!({"service": "demo"}));
    global::set(json!({"region": "eu-west-1"}));
    global::debug("BOOT_DETAIL", "hidden at info", ())?;
    global::info("BOOT", "service started", json!({"port": 8080}))?;

    println!("\n2. Sub-logger with its own context:");
    let request = global::sub_logger()?;
    request.set(json!({"request_id": "req-42"}));
    request.info("REQ_START", "handling request", json!({"path": "/orders"}))?;
    global::info("IDLE", "parent logger has no request_id", ())?;

    println!("\n3. Errors on warn/error/fatal:");
    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "inventory service timed out");
    request.error("REQ_FAILED", "request failed", Some(ErrorInfo::from_error(&err)), ())?;

    println!("\n4. Text output at debug level:");
    let text = Logger::builder()
        .level(LogLevel::Debug)
        .sink(ConsoleSink::new().with_output_format(OutputFormat::Text))
        .context(json!({"worker": 3}))
        .build()?;
    text.debug("TICK", "worker heartbeat", ())?;
    text.with_level(LogLevel::Warn)?;
    text.debug("TICK", "hidden after raising the level", ())?;
    text.warn("SLOW", "worker falling behind", None, json!({"lag_ms": 1200}))?;

    match text.with_level_name("verbose") {
        Ok(_) => println!("unexpected"),
        Err(e) => println!("   rejected: {}", e),
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
