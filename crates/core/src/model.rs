//! Identity versus value semantics for domain types.

/// A domain object tracked by identity.
///
/// Employees, companies and transports are entities: two employees with the
/// same name are still different people if their ids differ.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Whether `other` is the same tracked object, whatever its current state.
    fn same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// Marker for immutable types compared by value: `Money`, `Product`,
/// `Location`, `Wagon`. To "modify" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
