//! Domain Value Objects
//!
//! Immutable value objects describing what is stored and under which scope.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Identity`] | Tenant/channel/user/conversation tuple scoping a piece of state |
//! | [`StateCategory`] | Which kind of state (and which key namespace) is addressed |
//! | [`VersionToken`] | ETag of a stored record, or the wildcard |
//! | [`StateRecord`] | A decoded value together with its version token |

/// Identity tuple scoping stored state
pub mod identity;
/// State category selector
pub mod category;
/// Version tokens (ETags)
pub mod version;
/// Loaded state records
pub mod record;

pub use category::StateCategory;
pub use identity::Identity;
pub use record::StateRecord;
pub use version::VersionToken;
