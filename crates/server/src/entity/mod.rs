//! Tables owned by the external datastore. This service reads `tenants` and
//! appends to `audit_logs`; it never creates or alters either.

pub mod audit_log;
pub mod tenant;
