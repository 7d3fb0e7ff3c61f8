//! Observability and request-lifecycle core for tickdesk.
//!
//! This crate contains:
//! - Leveled logger with threshold filtering and pluggable sinks
//! - Ephemeral notification manager with timed auto-dismissal
//! - Credential slot shared by auth operations and the pipeline
//! - HTTP transport abstraction and the request pipeline that injects
//!   credentials, logs every call, and classifies failures

pub mod config;
pub mod credentials;
pub mod error;
pub mod http_client;
pub mod logger;
pub mod notify;
pub mod pipeline;

pub use config::{ClientConfig, Environment, PipelineConfig};
pub use credentials::{CredentialStore, InMemoryCredentialStore};
pub use error::ApiError;
pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};
pub use logger::{ConsoleSink, LogLevel, LogSink, Logger};
pub use notify::{Notification, NotifyCenter, Severity};
pub use pipeline::ApiPipeline;
