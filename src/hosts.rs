use serde::Serialize;
use std::collections::BTreeSet;

/// Sorted, duplicate free list of hostnames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HostnameSet(Vec<String>);

impl HostnameSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl FromIterator<String> for HostnameSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let set: BTreeSet<String> = iter.into_iter().collect();
        HostnameSet(set.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a HostnameSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub fn diff(previous: &HostnameSet, current: &HostnameSet) -> Vec<String> {
    let (a, b) = (previous.as_slice(), current.as_slice());
    let (mut i, mut j) = (0, 0);
    let mut changes = Vec::new();

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                changes.push(a[i].clone());
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                changes.push(b[j].clone());
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }
    changes.extend(a[i..].iter().cloned());
    changes.extend(b[j..].iter().cloned());

    changes
}
