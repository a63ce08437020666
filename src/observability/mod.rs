//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! Traces go to `~/.local/share/zellij/zbookfinder/zbookfinder-otlp.json`
//! (`/host/...` inside the sandbox), rotating at 10 MiB with 3 backups. The
//! level comes from the `trace_level` plugin option, default `info`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup and filter parsing
//! - [`exporter`]: OTLP-JSON span exporter and tracer provider
//! - [`file_writer`]: Rotating file writer

pub mod exporter;
pub mod file_writer;
pub mod init;

pub use init::init_tracing;
