//! Plain-text tables for terminal output.

use std::fmt::Write as _;

use escala_core::{
  person::Person,
  query::{Page, ShiftListing},
  shift::{Shift, ShiftView},
};

pub fn person(p: &Person) -> String {
  format!("#{} {} - {} ({})", p.id, p.code, p.name, p.rank)
}

pub fn persons(list: &[Person]) -> String {
  if list.is_empty() {
    return "no persons registered\n".to_owned();
  }
  let code_w = list.iter().map(|p| p.code.chars().count()).max().unwrap_or(0).max(4);
  let mut out = String::new();
  let _ = writeln!(out, "{:>4}  {:<code_w$}  {:<12}  NAME", "ID", "CODE", "RANK");
  for p in list {
    let _ = writeln!(out, "{:>4}  {:<code_w$}  {:<12}  {}", p.id, p.code, p.rank, p.name);
  }
  out
}

pub fn shift(s: &Shift) -> String {
  format!(
    "shift #{}: person {} on {} {}-{}",
    s.id, s.person_id, s.date, s.start, s.end
  )
}

fn shift_rows(out: &mut String, views: &[ShiftView]) {
  let _ = writeln!(out, "{:<10}  {:<11}  {:<8}  NAME", "DATE", "TIME", "CODE");
  for v in views {
    let _ = writeln!(
      out,
      "{:<10}  {}-{}  {:<8}  {} ({})",
      v.shift.date, v.shift.start, v.shift.end, v.person.code, v.person.name, v.person.rank
    );
  }
}

pub fn day(date: &str, views: &[ShiftView]) -> String {
  if views.is_empty() {
    return format!("no shifts on {date}\n");
  }
  let mut out = String::new();
  shift_rows(&mut out, views);
  out
}

/// Render the answer to a `--date` listing. A date the server did not
/// recognise comes back as the first page of all shifts.
pub fn listing(date: &str, answer: &ShiftListing) -> String {
  match answer {
    ShiftListing::Day(views) => day(date, views),
    ShiftListing::Paged(p) => {
      format!("'{date}' is not a YYYY-MM-DD date; listing all shifts\n{}", page(p))
    }
  }
}

pub fn page(p: &Page<ShiftView>) -> String {
  let mut out = String::new();
  if p.items.is_empty() {
    out.push_str("no shifts on this page\n");
  } else {
    shift_rows(&mut out, &p.items);
  }
  let _ = writeln!(
    out,
    "page {}/{} · {} per page · {} total",
    p.page, p.total_pages, p.limit, p.total
  );
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  use escala_core::shift::NewShift;

  fn ana() -> Person {
    Person { id: 1, code: "A1".into(), name: "Ana".into(), rank: "Cabo".into() }
  }

  fn view(date: &str, start: &str, end: &str) -> ShiftView {
    ShiftView {
      shift:  NewShift::new(1, date, start, end).unwrap().into_shift(1),
      person: ana(),
    }
  }

  #[test]
  fn persons_table_lists_every_row() {
    let out = persons(&[ana(), Person { id: 2, ..ana() }]);
    assert_eq!(out.lines().count(), 3);
    assert!(out.lines().nth(1).unwrap().contains("Ana"));
  }

  #[test]
  fn empty_day_says_so() {
    assert_eq!(day("2024-05-01", &[]), "no shifts on 2024-05-01\n");
  }

  #[test]
  fn shift_line_uses_plain_dash() {
    let s = NewShift::new(1, "2024-05-01", "08:00", "12:00").unwrap().into_shift(3);
    assert_eq!(shift(&s), "shift #3: person 1 on 2024-05-01 08:00-12:00");
  }

  #[test]
  fn date_listing_renders_day_array() {
    let body = serde_json::json!([view("2024-05-01", "08:00", "12:00")]);
    let parsed: ShiftListing = serde_json::from_value(body).unwrap();
    let out = listing("2024-05-01", &parsed);
    assert!(out.contains("2024-05-01  08:00-12:00  A1"));
  }

  #[test]
  fn unrecognised_date_renders_paged_fallback() {
    let body = serde_json::json!({
      "page": 1,
      "limit": 10,
      "total": 0,
      "totalPages": 1,
      "items": [],
    });
    let parsed: ShiftListing = serde_json::from_value(body).unwrap();
    assert!(matches!(parsed, ShiftListing::Paged(_)));

    let out = listing("01/05/2024", &parsed);
    assert!(out.starts_with("'01/05/2024' is not a YYYY-MM-DD date"));
    assert!(out.ends_with("page 1/1 · 10 per page · 0 total\n"));
  }

  #[test]
  fn page_footer_reports_totals() {
    let out = page(&Page {
      page:        2,
      limit:       1,
      total:       2,
      total_pages: 2,
      items:       vec![view("2024-05-02", "08:00", "12:00")],
    });
    assert!(out.contains("2024-05-02  08:00-12:00"));
    assert!(out.ends_with("page 2/2 · 1 per page · 2 total\n"));
  }
}
