//! Shared traits for owner-scoped finance entities.

use uuid::Uuid;

/// Exposes a stable identifier for entities stored in a book.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Exposes the owning user of a row. Every query filters on this.
pub trait Owned {
    fn owner(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}
