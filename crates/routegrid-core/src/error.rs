//! Error taxonomy
//!
//! [`RemoteError`] is what collaborators (control plane, identity service)
//! raise; [`ProvisionError`] is the taxonomy the engine surfaces to its
//! caller. The engine never retries and never swallows a violated
//! precondition; retry policy belongs to the external dispatcher.

use crate::model::ResourceKind;
use thiserror::Error;

/// Failures raised by the remote control plane or identity service.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("remote object not found: {0}")]
    NotFound(String),

    #[error("remote conflict: {0}")]
    Conflict(String),

    #[error("remote validation error: {0}")]
    Validation(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("control plane unavailable: {0}")]
    Unavailable(String),
}

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Engine-level errors. Every variant identifies the offending kind and
/// name where one exists; `Remote` carries faults the engine has no more
/// specific reading for.
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("can not provision {kind} '{name}': a {kind} with that name already exists")]
    AlreadyExists { kind: ResourceKind, name: String },

    #[error("{kind} '{name}' was not found")]
    NotFound { kind: ResourceKind, name: String },

    #[error("lookup of {kind} by name failed: {count} {kind}s are named '{name}'")]
    Ambiguous {
        kind: ResourceKind,
        name: String,
        count: usize,
    },

    #[error("dependency {kind} '{name}' was not found")]
    DependencyNotFound { kind: ResourceKind, name: String },

    #[error("{kind} '{name}' still has dependents: {detail}")]
    DependencyExists {
        kind: ResourceKind,
        name: String,
        detail: String,
    },

    #[error("router '{router}' has no interface attachment to subnet '{subnet}'")]
    AttachmentNotFound { router: String, subnet: String },

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
