//! Natural ordering of archive entry names.
//!
//! Names are compared case-insensitively, with runs of ASCII digits compared
//! by numeric value, so `page9.jpg` sorts before `page10.jpg`. Punctuation
//! sorts before digits, and digits before letters. This order decides which
//! page counts as "first".

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

use super::{ArchiveEntry, ArchiveSession};
use crate::error::DecodeError;

/// Compare two names in natural order.
///
/// Text runs compare by character class, then by lowercased character; digit
/// runs compare by value, then by length (so `01` follows `1`). Names equal under those rules fall
/// back to a plain comparison, which keeps the order total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let ordering = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l = take_digits(&mut left);
                let r = take_digits(&mut right);
                compare_numeric(&l, &r)
            }
            (Some(l), Some(r)) => {
                left.next();
                right.next();
                char_class(l)
                    .cmp(&char_class(r))
                    .then_with(|| l.to_lowercase().cmp(r.to_lowercase()))
            }
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

/// Collation class: punctuation and spaces, then digits, then letters.
fn char_class(c: char) -> u8 {
    if c.is_ascii_digit() {
        1
    } else if c.is_alphanumeric() {
        2
    } else {
        0
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        digits.push(c);
    }
    digits
}

/// Compare digit runs of any length without overflowing.
fn compare_numeric(l: &str, r: &str) -> Ordering {
    let l_trimmed = l.trim_start_matches('0');
    let r_trimmed = r.trim_start_matches('0');

    l_trimmed
        .len()
        .cmp(&r_trimmed.len())
        .then_with(|| l_trimmed.cmp(r_trimmed))
        .then_with(|| l.len().cmp(&r.len()))
}

/// Sort entries by name in natural order. The sort is stable.
pub fn sort_entries<H>(entries: &mut [ArchiveEntry<H>]) {
    entries.sort_by(|a, b| natural_cmp(&a.name, &b.name));
}

/// List every entry of `session` in natural order. Nothing is filtered.
pub async fn list_sorted_entries<S: ArchiveSession + ?Sized>(
    session: &S,
) -> Result<Vec<ArchiveEntry<S::Handle>>, DecodeError> {
    let mut entries = session.list_entries().await?;
    sort_entries(&mut entries);
    Ok(entries)
}
