// ABOUTME: Phantom-typed identifiers for cloud resources.
// ABOUTME: Prevents passing an instance ID where a volume ID is expected.

use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marker types for phantom type parameters.
/// Empty enums: cannot be instantiated, need no trait bounds.
pub enum InstanceMarker {}
pub enum VolumeMarker {}
pub enum ReservationMarker {}
pub enum GroupMarker {}

/// An identifier for a remote resource, tagged with the resource kind.
///
/// The provider hands back opaque strings for every resource family; the
/// phantom parameter keeps an instance ID from ever flowing into a call
/// that wants a volume ID. Mixing kinds is a compile error.
#[must_use = "IDs reference remote resources and should not be ignored"]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: String) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

// T is only a marker, so the usual derives would put an unwanted `T: Trait`
// bound on every impl. Implement by hand against the inner string instead.

impl<T> std::fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> std::fmt::Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

pub type InstanceId = Id<InstanceMarker>;
pub type VolumeId = Id<VolumeMarker>;
pub type ReservationId = Id<ReservationMarker>;
pub type GroupId = Id<GroupMarker>;
