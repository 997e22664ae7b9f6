
use std::collections::BTreeMap;

use crate::data_types::vcf_symbols::{VcfFilter, VcfInfo};

/// The FILTER value written when no filters are set
pub const PASS: &str = "PASS";

/// Ordered, duplicate-free set of FILTER IDs for a single record.
/// PASS is never stored, an empty set is what gets written out as PASS.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterSet {
    filters: Vec<String>
}

impl FilterSet {
    /// Builds the set from the FILTER IDs already on a record; PASS and "." are dropped
    /// # Arguments
    /// * `existing` - the IDs currently on the record, in order
    pub fn from_existing<S: AsRef<str>>(existing: &[S]) -> Self {
        let mut ret = Self::default();
        for filter_id in existing.iter() {
            let filter_id = filter_id.as_ref();
            if filter_id == PASS || filter_id == "." || filter_id.is_empty() {
                continue;
            }
            ret.insert_id(filter_id);
        }
        ret
    }

    /// Adds a tag, no-op if it is already present
    pub fn add(&mut self, filter: VcfFilter) {
        self.insert_id(filter.id());
    }

    /// Appends every ID from another set that is not already present
    pub fn merge(&mut self, other: &FilterSet) {
        for filter_id in other.filters.iter() {
            self.insert_id(filter_id);
        }
    }

    fn insert_id(&mut self, filter_id: &str) {
        if !self.filters.iter().any(|f| f == filter_id) {
            self.filters.push(filter_id.to_string());
        }
    }

    /// Removes everything, resetting the record to PASS
    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn is_pass(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn contains(&self, filter: VcfFilter) -> bool {
        self.filters.iter().any(|f| f == filter.id())
    }

    /// The IDs as they should be written to the FILTER column
    pub fn ids(&self) -> Vec<&str> {
        if self.filters.is_empty() {
            vec![PASS]
        } else {
            self.filters.iter().map(|f| f.as_str()).collect()
        }
    }
}

impl std::fmt::Display for FilterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ids().join(";"))
    }
}

/// A typed value for an INFO entry
#[derive(Clone, Debug, PartialEq)]
pub enum InfoValue {
    Flag,
    Integer(i32),
    Strings(Vec<String>)
}

/// Everything a classifier decided for one record.
/// This is built fresh per record and handed to the writer, it never holds the record itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordAnnotation {
    /// The final FILTER column
    filters: FilterSet,
    /// INFO entries to set, overwriting any prior value
    info: BTreeMap<VcfInfo, InfoValue>
}

impl RecordAnnotation {
    /// Constructor
    pub fn new(filters: FilterSet) -> Self {
        Self {
            filters,
            info: Default::default()
        }
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn info(&self) -> &BTreeMap<VcfInfo, InfoValue> {
        &self.info
    }

    pub fn set_flag(&mut self, key: VcfInfo) {
        self.info.insert(key, InfoValue::Flag);
    }

    pub fn has_flag(&self, key: VcfInfo) -> bool {
        matches!(self.info.get(&key), Some(InfoValue::Flag))
    }

    pub fn set_integer(&mut self, key: VcfInfo, value: i32) {
        self.info.insert(key, InfoValue::Integer(value));
    }

    pub fn set_strings(&mut self, key: VcfInfo, values: Vec<String>) {
        self.info.insert(key, InfoValue::Strings(values));
    }

    /// Returns the rescue flags set on this annotation
    pub fn rescue_flags(&self) -> Vec<VcfInfo> {
        self.info.keys()
            .filter(|k| k.is_rescue_flag())
            .cloned()
            .collect()
    }
}
