//! Catalog query engine for the price portal.
//!
//! Holds the normalized collection for one session and answers the derived
//! views: category facets, brand facets scoped to the active category, and
//! the filtered result set. Also owns the session context and coordinates
//! reloads and logins against the external collaborators.
//!
//! # Example
//!
//! ```ignore
//! use portal_catalog::{CatalogEngine, MemoryStore};
//!
//! let mut engine = CatalogEngine::new(MemoryStore::new());
//! engine.reload(&source).await;
//! engine.select_category("Mobile");
//! engine.set_search_text("galaxy");
//! for entry in engine.results() {
//!     println!("{} {}", entry.brand, entry.model);
//! }
//! ```

mod catalog;
mod collaborators;
mod engine;
mod error;
mod query;
mod session;

// === Error Types ===
pub use error::{DEFAULT_REJECTION_MESSAGE, LoginError, StoreError, TransportError};

// === Collection & Queries ===
pub use catalog::Catalog;
pub use query::{ALL_FACET, CatalogQuery, FacetValue, FilterPolicy};

// === Collaborators ===
pub use collaborators::{AuthResponse, Authenticator, CatalogSource, Credentials};

// === Session ===
pub use session::{
    KEY_LAST_SYNCED, KEY_LOGGED_IN, KEY_USER_EMAIL, MemoryStore, SessionContext, SessionStore,
    display_name,
};

// === Engine ===
pub use engine::{CatalogEngine, ReloadOutcome, ReloadTicket};
