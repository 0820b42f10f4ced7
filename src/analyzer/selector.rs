use std::cmp::Ordering;

use crate::domain::VersionRecord;

/// Pick the highest version.
///
/// Pairwise reduction over `(major, minor, patch, build, suffix_number)`.
/// On a tie the record seen first is kept, so the order chosen by the tag
/// source decides between equal versions. Returns `None` for no candidates.
pub fn select_highest<'a, I>(candidates: I) -> Option<&'a VersionRecord>
where
    I: IntoIterator<Item = &'a VersionRecord>,
{
    // `Iterator::max_by` keeps the last of equal elements.
    candidates.into_iter().reduce(|best, candidate| {
        if candidate.cmp_version(best) == Ordering::Greater {
            candidate
        } else {
            best
        }
    })
}
