// 🧮 Aggregation Utilities - grouping and year axes
//
// Groups keep the order in which each key is first seen; records inside a
// group keep input order. Year axes are distinct and strictly ascending.

use crate::dataset::{Observation, Year};
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// One group produced by [`group_by`].
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a, K, T> {
    pub key: K,
    pub records: Vec<&'a T>,
}

/// Partition `records` by `key`. Every record lands in exactly one group.
pub fn group_by<'a, T, K, I, F>(records: I, key: F) -> Vec<Group<'a, K, T>>
where
    I: IntoIterator<Item = &'a T>,
    T: 'a,
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Group<'a, K, T>> = Vec::new();

    for record in records {
        let k = key(record);
        match index.get(&k) {
            Some(&slot) => groups[slot].records.push(record),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push(Group {
                    key: k,
                    records: vec![record],
                });
            }
        }
    }

    groups
}

/// Distinct years present, ascending.
pub fn unique_sorted_years<'a, T, I>(records: I) -> Vec<Year>
where
    I: IntoIterator<Item = &'a T>,
    T: Observation + 'a,
{
    records
        .into_iter()
        .map(|r| r.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Most recent year present, or `None` when there is no data.
pub fn latest_year<'a, T, I>(records: I) -> Option<Year>
where
    I: IntoIterator<Item = &'a T>,
    T: Observation + 'a,
{
    unique_sorted_years(records).last().copied()
}

/// Values of `records` aligned to `years`. Missing years and absent values
/// are `None`; when a year repeats, the last record wins.
pub fn align_to_years<'a, T, I>(years: &[Year], records: I) -> Vec<Option<f64>>
where
    I: IntoIterator<Item = &'a T>,
    T: Observation + 'a,
{
    let mut by_year: HashMap<Year, Option<f64>> = HashMap::new();
    for record in records {
        by_year.insert(record.year(), record.value());
    }
    years
        .iter()
        .map(|y| by_year.get(y).copied().flatten())
        .collect()
}
