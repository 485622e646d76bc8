//! Work list: expected captures minus the ones already on disk.

use std::collections::HashSet;

use crate::timeline::Capture;

/// Captures whose key is not in `present`, in input order.
pub fn plan<I>(expected: I, present: &HashSet<String>) -> Vec<Capture>
where
    I: IntoIterator<Item = Capture>,
{
    expected
        .into_iter()
        .filter(|c| !present.contains(c.key.as_str()))
        .collect()
}
