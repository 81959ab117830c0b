//! Credentials, sessions and view access for the clinic portal.
//!
//! This crate provides:
//! - The opaque `Credential` and the `CredentialStore` that keeps it
//! - `decode`, which reads unverified `Claims` out of a credential
//! - `Session`, the tagged signed-in/signed-out value derived from it
//! - `SessionContext`, the single writer of the credential store
//! - The view access policy (`View`, `Access`, `decide`, `can_view`)
//!
//! # Trust model
//!
//! Claims are decoded without checking the token signature. They decide
//! what the UI shows and nothing else; the clinic API re-checks every
//! protected call against the bearer token.
//!
//! # Example
//!
//! ```
//! use clinic_session::{Credential, MemoryCredentialStore, SessionContext, View, can_view};
//!
//! let context = SessionContext::new(MemoryCredentialStore::new());
//! assert!(!can_view(&context.session(), View::Book));
//!
//! // An undecodable token is treated as no token at all.
//! context.login(Credential::new("not-a-jwt").expect("non-empty"));
//! assert!(!context.session().is_authenticated());
//! ```

pub mod claims;
pub mod credential;
pub mod error;
pub mod policy;
pub mod role;
pub mod session;

// Re-export main types at crate root
pub use claims::{Claims, decode};
pub use credential::{CREDENTIAL_KEY, Credential, CredentialStore, MemoryCredentialStore};
pub use error::DecodeError;
pub use policy::{Access, View, can_view, decide, navigation};
pub use role::{Role, UnknownRole};
pub use session::{Session, SessionContext};
