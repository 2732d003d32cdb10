// stockroom/src/access.rs

//! The access gate: mutations need the `admin` role, reads need nothing.
//!
//! The gate trusts whatever role the identity collaborator attached to the caller.
//! It never validates the identity itself.

use std::fmt;
use tracing::{event, Level};

use crate::error::{CatalogError, CatalogResult};

/// Role string that unlocks mutating actions. Compared exactly.
pub const ADMIN_ROLE: &str = "admin";

/// Catalog operations as seen by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
  Create,
  Update,
  Delete,
  Get,
  List,
  Filter,
}

impl Action {
  pub fn is_mutation(self) -> bool {
    matches!(self, Action::Create | Action::Update | Action::Delete)
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Action::Create => "create",
      Action::Update => "update",
      Action::Delete => "delete",
      Action::Get => "get",
      Action::List => "list",
      Action::Filter => "filter",
    }
  }
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Whoever issued the request, as far as the identity collaborator could tell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
  role: Option<String>,
}

impl Caller {
  pub fn with_role(role: impl Into<String>) -> Self {
    Self {
      role: Some(role.into()),
    }
  }

  pub fn anonymous() -> Self {
    Self::default()
  }

  pub fn admin() -> Self {
    Self::with_role(ADMIN_ROLE)
  }

  pub fn role(&self) -> Option<&str> {
    self.role.as_deref()
  }

  pub fn is_admin(&self) -> bool {
    self.role() == Some(ADMIN_ROLE)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
  Allowed,
  Denied,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGate;

impl AccessGate {
  pub fn new() -> Self {
    Self
  }

  pub fn authorize(&self, caller: &Caller, action: Action) -> AccessDecision {
    if !action.is_mutation() || caller.is_admin() {
      AccessDecision::Allowed
    } else {
      AccessDecision::Denied
    }
  }

  /// Like [`authorize`](Self::authorize), but turns a denial into `CatalogError::AccessDenied`.
  pub fn require(&self, caller: &Caller, action: Action) -> CatalogResult<()> {
    match self.authorize(caller, action) {
      AccessDecision::Allowed => Ok(()),
      AccessDecision::Denied => {
        event!(Level::WARN, %action, role = ?caller.role(), "Access denied.");
        Err(CatalogError::AccessDenied { action })
      }
    }
  }
}
