//! Rules shared by the three usage collections (yarns, needles, hooks).
//!
//! Each collection holds at most one item per referenced catalog id and at
//! most one item flagged primary. The helpers here are generic over
//! [`UsageRecord`] so the rules are written once and applied per kind; a
//! kind's rules never look at another kind's collection.

use crate::error::CoreError;
use crate::types::DocId;

/// Which usage collection an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    Yarn,
    Needle,
    Hook,
}

impl UsageKind {
    /// Lowercase noun used inside validation messages.
    pub fn noun(self) -> &'static str {
        match self {
            UsageKind::Yarn => "yarn",
            UsageKind::Needle => "needle",
            UsageKind::Hook => "hook",
        }
    }

    /// Catalog entity name, used for missing references.
    pub fn catalog_entity(self) -> &'static str {
        match self {
            UsageKind::Yarn => "Yarn",
            UsageKind::Needle => "Needle",
            UsageKind::Hook => "Hook",
        }
    }

    /// Entity name reported when a usage item id is not found.
    pub fn usage_entity(self) -> &'static str {
        match self {
            UsageKind::Yarn => "Yarn usage",
            UsageKind::Needle => "Needle usage",
            UsageKind::Hook => "Hook usage",
        }
    }
}

/// An embedded record that links a project to a catalog entity.
pub trait UsageRecord {
    /// Sub-identity of the record within its project.
    fn usage_id(&self) -> DocId;
    /// Id of the referenced catalog entity.
    fn reference(&self) -> DocId;
    fn is_primary(&self) -> bool;
    fn set_primary(&mut self, primary: bool);
    fn notes_mut(&mut self) -> &mut Option<String>;
}

/// Check uniqueness and single-primary across a whole collection.
///
/// Used when a project is created with initial usage items. The first
/// violation found is reported.
pub fn check_collection<U: UsageRecord>(items: &[U], kind: UsageKind) -> Result<(), CoreError> {
    let mut seen = Vec::with_capacity(items.len());
    for item in items {
        if seen.contains(&item.reference()) {
            return Err(CoreError::Validation(format!(
                "Cannot add the same {} multiple times to a project",
                kind.noun()
            )));
        }
        seen.push(item.reference());
    }

    if items.iter().filter(|item| item.is_primary()).count() > 1 {
        return Err(CoreError::Validation(format!(
            "Only one {} can be marked as primary",
            kind.noun()
        )));
    }

    Ok(())
}

/// Append `item`, rejecting a duplicate reference.
///
/// When the new item is primary, every sibling loses its primary flag first.
pub fn attach<U: UsageRecord>(
    items: &mut Vec<U>,
    item: U,
    kind: UsageKind,
) -> Result<DocId, CoreError> {
    if items.iter().any(|existing| existing.reference() == item.reference()) {
        return Err(CoreError::Conflict(format!(
            "{} already added to this project",
            kind.catalog_entity()
        )));
    }

    if item.is_primary() {
        clear_primary(items);
    }

    let usage_id = item.usage_id();
    items.push(item);
    Ok(usage_id)
}

/// Locate a usage item by its sub-identity.
pub fn find_mut<U: UsageRecord>(
    items: &mut [U],
    usage_id: DocId,
    kind: UsageKind,
) -> Result<&mut U, CoreError> {
    items
        .iter_mut()
        .find(|item| item.usage_id() == usage_id)
        .ok_or(CoreError::NotFound {
            entity: kind.usage_entity(),
            id: usage_id,
        })
}

/// Remove exactly the item with `usage_id`, keeping the order of the rest.
pub fn detach<U: UsageRecord>(
    items: &mut Vec<U>,
    usage_id: DocId,
    kind: UsageKind,
) -> Result<U, CoreError> {
    let index = items
        .iter()
        .position(|item| item.usage_id() == usage_id)
        .ok_or(CoreError::NotFound {
            entity: kind.usage_entity(),
            id: usage_id,
        })?;
    Ok(items.remove(index))
}

/// Make `usage_id` the only primary item of its collection.
pub fn promote<U: UsageRecord>(
    items: &mut [U],
    usage_id: DocId,
    kind: UsageKind,
) -> Result<(), CoreError> {
    // Locate first so a bad id leaves the collection untouched.
    find_mut(items, usage_id, kind)?;
    for item in items.iter_mut() {
        item.set_primary(item.usage_id() == usage_id);
    }
    Ok(())
}

fn clear_primary<U: UsageRecord>(items: &mut [U]) {
    for item in items.iter_mut().filter(|item| item.is_primary()) {
        item.set_primary(false);
    }
}

/// Collect the referenced ids of a collection.
pub fn references<U: UsageRecord>(items: &[U]) -> Vec<DocId> {
    items.iter().map(UsageRecord::reference).collect()
}
