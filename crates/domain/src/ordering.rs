//! Sibling ordering for areas.
//!
//! Areas with a display order come first, ascending. Areas without one follow.
//! Equal or missing display orders fall back to the area name.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::area::Area;

/// Compare two areas for presentation order.
#[must_use]
pub fn compare_areas(a: &Area, b: &Area) -> Ordering {
    match (a.display_order, b.display_order) {
        (Some(left), Some(right)) if left.total_cmp(&right) != Ordering::Equal => {
            left.total_cmp(&right)
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => compare_names(&a.name, &b.name),
    }
}

/// Sort areas in place. The sort is stable: areas that compare equal keep
/// their current relative order.
pub fn sort_areas(areas: &mut [Area]) {
    areas.sort_by(compare_areas);
}

/// Collation-style name comparison in three passes: base letters ignoring
/// accents and case, then unaccented ahead of accented, then lowercase ahead
/// of uppercase.
fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented_letters(a).cmp(accented_letters(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}
