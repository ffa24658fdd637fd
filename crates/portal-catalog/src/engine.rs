//! The catalog engine: one session's collection, query, and collaborators.
//!
//! Reloads follow last-response-wins ordering. Every reload takes a
//! [`ReloadTicket`]; a response is applied only if no newer ticket has
//! already settled, and superseded responses are dropped on arrival.

use std::time::Instant;

use chrono::Local;
use tracing::{debug, info, warn};

use portal_ingest::{NormalizeOptions, ingest_catalog};
use portal_model::{CatalogEntry, ConnectionStatus};

use crate::catalog::Catalog;
use crate::collaborators::{Authenticator, CatalogSource, Credentials};
use crate::error::{DEFAULT_REJECTION_MESSAGE, LoginError, TransportError};
use crate::query::{CatalogQuery, FacetValue, FilterPolicy};
use crate::session::{SessionContext, SessionStore};

/// Identifies one reload request, ordered by issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReloadTicket(u64);

/// What happened to one reload response.
#[derive(Debug, Clone, PartialEq)]
pub enum ReloadOutcome {
    /// The collection was replaced.
    Applied { entries: usize, dropped: usize },
    /// A newer reload already settled; this response was ignored.
    Superseded,
    /// The fetch failed; the collection was cleared.
    Failed(TransportError),
}

impl ReloadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Holds everything one browsing session needs.
#[derive(Debug)]
pub struct CatalogEngine<S: SessionStore> {
    catalog: Catalog,
    query: CatalogQuery,
    policy: FilterPolicy,
    status: ConnectionStatus,
    session: SessionContext,
    store: S,
    normalize: Option<NormalizeOptions>,
    issued: u64,
    settled: u64,
}

impl<S: SessionStore> CatalogEngine<S> {
    /// Creates an engine with an empty catalog and the session read from `store`.
    pub fn new(store: S) -> Self {
        let session = SessionContext::load(&store);
        Self {
            catalog: Catalog::default(),
            query: CatalogQuery::default(),
            policy: FilterPolicy::default(),
            status: ConnectionStatus::default(),
            session,
            store,
            normalize: None,
            issued: 0,
            settled: 0,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FilterPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fixes the normalization options instead of computing them per cycle.
    #[must_use]
    pub fn with_normalize_options(mut self, options: NormalizeOptions) -> Self {
        self.normalize = Some(options);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // === Query parameters ===

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.query.set_text(text);
    }

    /// Selects a category and resets the brand to `All`.
    pub fn select_category(&mut self, category: impl Into<FacetValue>) {
        self.query.set_category(category);
    }

    pub fn select_brand(&mut self, brand: impl Into<FacetValue>) {
        self.query.set_brand(brand);
    }

    pub fn reset_query(&mut self) {
        self.query.reset();
    }

    // === Derived views ===

    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories()
    }

    /// Brand facets for the active category.
    pub fn brands(&self) -> Vec<String> {
        self.catalog.brands(self.query.category())
    }

    /// The filtered result set for the current query and policy.
    pub fn results(&self) -> Vec<&CatalogEntry> {
        self.catalog.filter(&self.query, self.policy)
    }

    // === Reload ===

    /// True while an issued reload has not settled yet.
    pub fn is_reload_pending(&self) -> bool {
        self.issued > self.settled
    }

    /// Issues a ticket for a new reload request.
    pub fn begin_reload(&mut self) -> ReloadTicket {
        self.issued += 1;
        self.status = ConnectionStatus::Syncing;
        ReloadTicket(self.issued)
    }

    /// Settles a reload with its fetch result.
    pub fn complete_reload(
        &mut self,
        ticket: ReloadTicket,
        response: Result<String, TransportError>,
    ) -> ReloadOutcome {
        if ticket.0 <= self.settled {
            warn!(
                ticket = ticket.0,
                settled = self.settled,
                "discarding superseded catalog response"
            );
            return ReloadOutcome::Superseded;
        }
        self.settled = ticket.0;

        match response {
            Ok(text) => {
                let options = self.normalize.clone().unwrap_or_default();
                let output = ingest_catalog(&text, &options);
                let entries = output.entries.len();
                let dropped = output.rows_dropped;
                self.catalog.replace(output.entries);
                self.session.record_sync(Local::now(), &mut self.store);
                if !self.is_reload_pending() {
                    self.status = ConnectionStatus::Online;
                }
                info!(ticket = ticket.0, entries, dropped, "catalog reloaded");
                ReloadOutcome::Applied { entries, dropped }
            }
            Err(error) => {
                self.catalog.clear();
                if !self.is_reload_pending() {
                    self.status = ConnectionStatus::Error;
                }
                warn!(ticket = ticket.0, %error, "catalog reload failed");
                ReloadOutcome::Failed(error)
            }
        }
    }

    /// Fetches from `source` and applies the response.
    pub async fn reload<C: CatalogSource>(&mut self, source: &C) -> ReloadOutcome {
        let ticket = self.begin_reload();
        let started = Instant::now();
        debug!(ticket = ticket.0, source = %source.describe(), "fetching catalog");
        let response = source.fetch_catalog().await;
        debug!(
            ticket = ticket.0,
            duration_ms = started.elapsed().as_millis(),
            "catalog fetch finished"
        );
        self.complete_reload(ticket, response)
    }

    // === Authentication ===

    /// Runs the credential check and, on success, persists the session.
    pub async fn login<A: Authenticator>(
        &mut self,
        authenticator: &A,
        email: &str,
        password: &str,
    ) -> Result<(), LoginError> {
        let credentials = Credentials::new(email, password);
        if credentials.is_incomplete() {
            return Err(LoginError::MissingCredentials);
        }

        self.status = ConnectionStatus::Syncing;
        match authenticator.check(&credentials).await {
            Ok(response) if response.success => {
                self.session.sign_in(credentials.email(), &mut self.store);
                self.status = ConnectionStatus::Online;
                info!("login accepted");
                Ok(())
            }
            Ok(response) => {
                self.status = ConnectionStatus::Error;
                let message = response
                    .message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string());
                info!(reason = %message, "login rejected");
                Err(LoginError::Rejected(message))
            }
            Err(error) => {
                self.status = ConnectionStatus::Error;
                warn!(%error, "credential check failed");
                Err(LoginError::Transport(error))
            }
        }
    }

    /// Signs out, clearing the store, the collection, and the query.
    pub fn logout(&mut self) {
        self.session.sign_out(&mut self.store);
        self.catalog.clear();
        self.query.reset();
        self.status = ConnectionStatus::Unknown;
        info!("signed out");
    }
}
