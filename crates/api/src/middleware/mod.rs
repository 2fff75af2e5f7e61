//! Authentication and authorization middleware.
//!
//! - [`gate::session_gate`] -- Router-wide gate: public allowlist, session lookup,
//!   401 for the API and a login redirect for everything else.
//! - [`auth::AuthUser`] -- Extracts the authenticated session.
//! - [`rbac::RequireViewer`] -- Requires any valid session.
//! - [`rbac::RequireOwner`] -- Requires the `owner` role.

pub mod auth;
pub mod gate;
pub mod rbac;
