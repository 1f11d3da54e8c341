//! Read-side query façade.
//!
//! Every shift listing request is classified into exactly one of two modes:
//! a day view when a well-shaped `date` filter is present, otherwise a paged
//! view over all shifts. A malformed `date` is treated as absent.

use serde::{Deserialize, Serialize};

use crate::{
  ValidationError,
  shift::{DutyDate, ShiftView, is_day_shaped},
};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

// ─── Paging ──────────────────────────────────────────────────────────────────

/// A validated page request: `page >= 1` and `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  page:  u64,
  limit: u32,
}

impl Default for PageRequest {
  fn default() -> Self { Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT } }
}

impl PageRequest {
  pub fn new(page: i64, limit: i64) -> Result<Self, ValidationError> {
    let page = u64::try_from(page)
      .ok()
      .filter(|p| *p >= 1)
      .ok_or_else(|| {
        ValidationError::field("page", "page must be a positive integer")
      })?;
    let limit = u32::try_from(limit)
      .ok()
      .filter(|l| (1..=MAX_LIMIT).contains(l))
      .ok_or_else(|| {
        ValidationError::field(
          "limit",
          format!("limit must be an integer between 1 and {MAX_LIMIT}"),
        )
      })?;
    Ok(Self { page, limit })
  }

  /// Coerce raw query-string values, applying the defaults for absent ones.
  pub fn from_params(
    page: Option<&str>,
    limit: Option<&str>,
  ) -> Result<Self, ValidationError> {
    let page = coerce_int("page", page, DEFAULT_PAGE as i64)?;
    let limit = coerce_int("limit", limit, i64::from(DEFAULT_LIMIT))?;
    Self::new(page, limit)
  }

  pub fn page(&self) -> u64 { self.page }

  pub fn limit(&self) -> u32 { self.limit }

  /// Zero-based offset of the first item on this page, saturating for pages
  /// far past any stored data.
  pub fn offset(&self) -> u64 {
    (self.page - 1).saturating_mul(u64::from(self.limit))
  }

  /// `max(1, ceil(total / limit))`.
  pub fn total_pages(&self, total: u64) -> u64 {
    total.div_ceil(u64::from(self.limit)).max(1)
  }
}

fn coerce_int(
  field: &str,
  raw: Option<&str>,
  default: i64,
) -> Result<i64, ValidationError> {
  match raw {
    None => Ok(default),
    Some(s) => s.trim().parse::<i64>().map_err(|_| {
      ValidationError::field(field, format!("{field} must be an integer"))
    }),
  }
}

/// One page of a globally ordered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
  pub page:        u64,
  pub limit:       u32,
  /// Count of all items, irrespective of paging.
  pub total:       u64,
  #[serde(rename = "totalPages")]
  pub total_pages: u64,
  pub items:       Vec<T>,
}

// ─── Classification ──────────────────────────────────────────────────────────

/// The resolved mode of a shift listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftQuery {
  Day(DutyDate),
  Paged(PageRequest),
}

impl ShiftQuery {
  /// Classify a request from its raw parameters.
  ///
  /// Paging parameters are ignored in day mode, and only validated in paged
  /// mode.
  pub fn from_params(
    date: Option<&str>,
    page: Option<&str>,
    limit: Option<&str>,
  ) -> Result<Self, ValidationError> {
    if let Some(d) = date.map(str::trim).filter(|d| is_day_shaped(d)) {
      return Ok(Self::Day(DutyDate::parse(d)?));
    }
    Ok(Self::Paged(PageRequest::from_params(page, limit)?))
  }
}

/// The answer to a [`ShiftQuery`]: a bare sequence for a day view, or a
/// [`Page`] envelope for the paged view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShiftListing {
  Day(Vec<ShiftView>),
  Paged(Page<ShiftView>),
}
