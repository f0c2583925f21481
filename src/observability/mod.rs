//! Logging and OpenTelemetry tracing with file-based export.
//!
//! All crate code logs through `tracing`. [`init_tracing`] wires those events
//! and spans to stderr and, optionally, to an OTLP JSON trace file:
//!
//! ```text
//! tracing ─┬─► fmt layer ─► stderr
//!          └─► tracing-opentelemetry ─► SDK ─► FileSpanExporter ─► rotating file
//! ```
//!
//! # Configuration
//!
//! - `RUST_LOG` environment variable (highest priority)
//! - `trace_level` config option
//! - `trace_file` config option enables the file export
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `tracer`: tracer provider with the file exporter
//! - `span_formatter`: OTLP JSON serialization
//! - `file_writer`: size-rotated file output

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
