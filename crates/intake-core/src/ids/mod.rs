//! ID type wrappers for type safety.
//!
//! Both identifiers are assigned by the backend; the client never mints them.

mod id_macro;

use id_macro::impl_id;
use serde::{Deserialize, Serialize};

/// Server-assigned identifier of an audit intake record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditId(String);

/// Server-assigned identifier of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl_id!(AuditId, UserId);
