// core/src/validation.rs

//! Field constraints checked before anything reaches the persistence gateway.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

use crate::error::{ValidationError, Violation};
use crate::model::{OrderPayload, UserPayload, NAME_MAX_LEN, NAME_MIN_LEN};

const EMAIL_LOCAL_MAX_LEN: usize = 64;
const EMAIL_DOMAIN_MAX_LEN: usize = 255;
const EMAIL_LABEL_MAX_LEN: usize = 63;

static EMAIL_LOCAL_RE: Lazy<Regex> = Lazy::new(|| {
  let atom = r"[-A-Za-z0-9!#$%&'*+/=?^_`{|}~\x{80}-\x{FFFF}]+";
  Regex::new(&format!(r"^{atom}(?:\.{atom})*$"))
    .unwrap_or_else(|error| panic!("email local-part regex failed to compile: {error}"))
});

static EMAIL_DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
  let label = r"[A-Za-z0-9\x{80}-\x{FFFF}](?:[-A-Za-z0-9\x{80}-\x{FFFF}]*[A-Za-z0-9\x{80}-\x{FFFF}])?";
  let ipv4 = r"\[[0-9]{1,3}(?:\.[0-9]{1,3}){3}\]";
  Regex::new(&format!(r"^(?:{label}(?:\.{label})*|{ipv4})$"))
    .unwrap_or_else(|error| panic!("email domain regex failed to compile: {error}"))
});

/// Something that can be checked against its field constraints.
pub trait Validate {
  /// Every broken constraint, in field order. Empty when valid.
  fn violations(&self) -> Vec<Violation>;

  fn validate(&self) -> Result<(), ValidationError> {
    let violations = self.violations();
    if violations.is_empty() {
      Ok(())
    } else {
      debug!(count = violations.len(), "Payload failed validation.");
      Err(ValidationError { violations })
    }
  }
}

impl Validate for UserPayload {
  #[instrument(name = "validation::user_payload", level = "debug", skip_all)]
  fn violations(&self) -> Vec<Violation> {
    let mut violations = Vec::new();

    match not_blank(&self.name) {
      None => violations.push(Violation::new("name", "must not be blank")),
      Some(name) => {
        let len = name.chars().count();
        if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
          violations.push(Violation::new(
            "name",
            format!("size must be between {} and {}", NAME_MIN_LEN, NAME_MAX_LEN),
          ));
        }
      }
    }

    match not_blank(&self.email) {
      None => violations.push(Violation::new("email", "must not be blank")),
      Some(email) if !is_valid_email(email) => violations.push(Violation::new("email", "Email is not correct")),
      Some(_) => {}
    }

    for (index, order) in self.orders.iter().flatten().enumerate() {
      violations.extend(order.violations().into_iter().map(|v| Violation {
        field: format!("orders[{}].{}", index, v.field),
        message: v.message,
      }));
    }

    violations
  }
}

impl Validate for OrderPayload {
  fn violations(&self) -> Vec<Violation> {
    let mut violations = Vec::new();
    if not_blank(&self.product).is_none() {
      violations.push(Violation::new("product", "must not be blank"));
    }
    if not_blank(&self.status).is_none() {
      violations.push(Violation::new("status", "must not be blank"));
    }
    violations
  }
}

fn not_blank(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Syntactic email check: one split at the last `@`, a dot-atom local part and
/// a hostname or bracketed IPv4 domain. A domain without a dot is accepted.
pub fn is_valid_email(email: &str) -> bool {
  let Some((local, domain)) = email.rsplit_once('@') else {
    return false;
  };
  if local.is_empty() || local.chars().count() > EMAIL_LOCAL_MAX_LEN {
    return false;
  }
  if domain.is_empty() || domain.chars().count() > EMAIL_DOMAIN_MAX_LEN {
    return false;
  }
  if domain.split('.').any(|label| label.chars().count() > EMAIL_LABEL_MAX_LEN) {
    return false;
  }
  EMAIL_LOCAL_RE.is_match(local) && EMAIL_DOMAIN_RE.is_match(domain)
}
