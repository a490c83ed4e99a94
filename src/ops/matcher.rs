//! Capability filters.
//!
//! A filter is a `(path, expected value)` pair tested against one
//! [`CapabilityDescriptor`]. A descriptor is accepted only when every filter
//! matches; a path the descriptor cannot answer is a mismatch, never an
//! error.
//!
//! A path naming an `mfxRange32U` record (`...decmemdesc.Width`) takes a
//! `Min,Max,Step` value and matches when that range fits inside the
//! reported one.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::descriptor::CapabilityDescriptor;
use crate::core::record::{ConfigRecord, Slot};
use crate::core::tag::BufferTag;
use crate::core::value::{FieldCategory, TypeKind, Value};
use crate::ops::coerce::{coerce_list, coerce_value};
use crate::ops::mutate::{self, Payload};
use crate::ops::negotiate::candidate_slots;
use crate::ops::property::coerce_payload;
use crate::resolver::{resolve, ConfigError, ResolvedField, Target};
use crate::schema::SchemaSet;

/// Expected value of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Compared bit-exactly, converted to the field type first if needed.
    Typed(Value),
    /// Coerced into the field type before comparison.
    Text(String),
}

/// One `(path, expected value)` predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyFilter {
    pub path: String,
    pub expected: FilterValue,
}

impl PropertyFilter {
    pub fn new(path: impl Into<String>, expected: FilterValue) -> Self {
        PropertyFilter {
            path: path.into(),
            expected,
        }
    }

    pub fn text(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(path, FilterValue::Text(value.into()))
    }

    pub fn typed(path: impl Into<String>, value: Value) -> Self {
        Self::new(path, FilterValue::Typed(value))
    }

    /// Whether `descriptor` satisfies this filter on its own.
    pub fn matches(&self, descriptor: &CapabilityDescriptor) -> bool {
        match_capability(descriptor, std::slice::from_ref(self))
    }
}

impl fmt::Display for PropertyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expected {
            FilterValue::Typed(v) => write!(f, "{}={}", self.path, v),
            FilterValue::Text(s) => write!(f, "{}={}", self.path, s),
        }
    }
}

/// Error returned when parsing a `PATH=VALUE` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFilterError(pub String);

impl fmt::Display for ParseFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid filter `{}`, expected PATH=VALUE", self.0)
    }
}

impl std::error::Error for ParseFilterError {}

impl FromStr for PropertyFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((path, value)) if !path.trim().is_empty() => {
                Ok(PropertyFilter::text(path.trim(), value))
            }
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

/// Whether `descriptor` satisfies every filter. An empty list always
/// matches.
///
/// Filters on a sub-description without an instance index are checked
/// together: one attached instance of that extension has to satisfy all of
/// them. Filters with an explicit `[k]` and base fields stand alone.
pub fn match_capability(descriptor: &CapabilityDescriptor, filters: &[PropertyFilter]) -> bool {
    let record = descriptor.record();
    let mut groups: Vec<(BufferTag, Vec<(&PropertyFilter, Check)>)> = Vec::new();

    for filter in filters {
        let check = match Check::new(record.schemas(), filter) {
            Ok(Some(check)) => check,
            Ok(None) => {
                tracing::debug!(
                    "{} rejected by {}: expected value does not fit the field",
                    descriptor.name(),
                    filter
                );
                return false;
            }
            Err(_) => {
                let live = descriptor.live(&filter.path).is_some_and(|values| {
                    values.iter().any(|v| live_value_matches(v, &filter.expected))
                });
                if !live {
                    tracing::debug!("{} rejected by {}", descriptor.name(), filter);
                    return false;
                }
                continue;
            }
        };

        match check.target() {
            Target::Extension {
                tag,
                instance: None,
                ..
            } => match groups.iter_mut().find(|(t, _)| *t == tag) {
                Some((_, checks)) => checks.push((filter, check)),
                None => groups.push((tag, vec![(filter, check)])),
            },
            target => {
                let slots = candidate_slots(record, &check.anchor());
                if !slots.into_iter().any(|slot| check.holds_at(record, slot)) {
                    tracing::debug!(
                        "{} rejected by {} ({:?})",
                        descriptor.name(),
                        filter,
                        target
                    );
                    return false;
                }
            }
        }
    }

    groups.iter().all(|(tag, checks)| {
        let ok = record
            .instances(*tag)
            .any(|slot| checks.iter().all(|(_, check)| check.holds_at(record, slot)));
        if !ok {
            let names: Vec<String> = checks.iter().map(|(f, _)| f.to_string()).collect();
            tracing::debug!(
                "{} rejected: no single {} instance satisfies {}",
                descriptor.name(),
                tag,
                names.join(", ")
            );
        }
        ok
    })
}

/// Members of an `mfxRange32U` record, in filter order.
const RANGE_MEMBERS: [&str; 3] = ["Min", "Max", "Step"];

/// One filter resolved against a schema set.
#[derive(Debug, Clone)]
enum Check {
    /// The field's elements start with these values.
    Equals {
        field: ResolvedField,
        expected: Vec<Value>,
    },
    /// The requested range fits inside the stored one: `Min` and `Max`
    /// within its bounds, and a step no finer than its `Step`.
    Contains {
        members: [ResolvedField; 3],
        requested: [u32; 3],
    },
}

impl Check {
    /// `Err` when the path does not resolve, `Ok(None)` when it does but the
    /// expected value cannot be represented in the field.
    fn new(
        set: &'static SchemaSet,
        filter: &PropertyFilter,
    ) -> Result<Option<Check>, ConfigError> {
        match resolve(set, &filter.path) {
            Ok(field) => Ok(expected_values(&field, &filter.expected)
                .map(|expected| Check::Equals { field, expected })),
            Err(err) => match range_members(set, &filter.path) {
                Some(members) => Ok(requested_range(&filter.expected)
                    .map(|requested| Check::Contains { members, requested })),
                None => Err(err),
            },
        }
    }

    /// Field whose target decides which buffers are candidates.
    fn anchor(&self) -> ResolvedField {
        match self {
            Check::Equals { field, .. } => *field,
            Check::Contains { members, .. } => members[0],
        }
    }

    fn target(&self) -> Target {
        self.anchor().target
    }

    fn holds_at(&self, record: &ConfigRecord, slot: Slot) -> bool {
        let Some(buf) = record.buffer(slot) else {
            return false;
        };
        match self {
            Check::Equals { field, expected } => mutate::read(buf, field).starts_with(expected),
            Check::Contains { members, requested } => {
                let stored = members.map(|m| match mutate::read(buf, &m).as_slice() {
                    [Value::U32(v)] => Some(*v),
                    _ => None,
                });
                let [Some(min), Some(max), Some(step)] = stored else {
                    return false;
                };
                let [req_min, req_max, req_step] = *requested;
                req_min >= min && req_max <= max && req_step >= step
            }
        }
    }
}

/// Resolve `path` as an `mfxRange32U` record: three `u32` members in the
/// same buffer.
fn range_members(set: &'static SchemaSet, path: &str) -> Option<[ResolvedField; 3]> {
    let mut members = Vec::with_capacity(RANGE_MEMBERS.len());
    for name in RANGE_MEMBERS {
        let field = resolve(set, &format!("{}.{}", path, name)).ok()?;
        if field.kind() != TypeKind::U32 || field.count != 1 {
            return None;
        }
        members.push(field);
    }
    let members: [ResolvedField; 3] = members.try_into().ok()?;
    members
        .iter()
        .all(|m| m.target == members[0].target)
        .then_some(members)
}

/// `Min,Max,Step` as three `u32` values.
fn requested_range(expected: &FilterValue) -> Option<[u32; 3]> {
    let text = match expected {
        FilterValue::Text(s) | FilterValue::Typed(Value::Text(s)) => s,
        FilterValue::Typed(_) => return None,
    };
    let values = coerce_list(text, TypeKind::U32, FieldCategory::Value).ok()?;
    match values.as_slice() {
        [Value::U32(min), Value::U32(max), Value::U32(step)] => Some([*min, *max, *step]),
        _ => None,
    }
}

/// Expected element values in the field's own representation.
fn expected_values(resolved: &ResolvedField, expected: &FilterValue) -> Option<Vec<Value>> {
    let text = match expected {
        FilterValue::Typed(v @ Value::Text(_)) if resolved.text => return Some(vec![v.clone()]),
        FilterValue::Typed(v) if !resolved.text && v.kind() == resolved.kind() => {
            return Some(vec![v.clone()])
        }
        FilterValue::Typed(v) => v.to_string(),
        FilterValue::Text(s) => s.clone(),
    };

    match coerce_payload(resolved, &text).ok()? {
        Payload::Text(bytes) => Some(vec![Value::text_from_bytes(&bytes)]),
        Payload::Elements(values) => Some(values),
    }
}

fn live_value_matches(actual: &Value, expected: &FilterValue) -> bool {
    match expected {
        FilterValue::Typed(v) => {
            actual == v
                || matches!((actual.as_i128(), v.as_i128()), (Some(a), Some(b)) if a == b)
        }
        FilterValue::Text(s) => match actual {
            Value::Text(t) => t == s,
            _ => coerce_value(s, actual.kind(), Default::default())
                .is_ok_and(|v| &v == actual),
        },
    }
}
