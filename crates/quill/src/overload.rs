//! Overload merging
//!
//! Callable fragments are grouped by family (method or constructor) and FQN
//! in first-seen order. An `@overload name` tag links a fragment's group with
//! the group `name` resolves to, either as a full FQN or as a sibling in the
//! fragment's own scope. Links are transitive and symmetric, so chains and
//! mutual references land in one component. Every component of two or more
//! fragments becomes one overloaded entry placed where its earliest fragment
//! was.

use crate::comment_data::{
    split_fqn, CommentData, Overload, OverloadedConstructorCommentData,
    OverloadedMethodCommentData,
};
use crate::diagnostics::{Diagnostic, DiagnosticsCollector};
use indexmap::IndexMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Family {
    Constructor,
    Method,
}

type GroupKey = (Family, String);

fn family_of(doc: &CommentData) -> Option<Family> {
    match doc {
        CommentData::Constructor(_) => Some(Family::Constructor),
        CommentData::Method(_) => Some(Family::Method),
        _ => None,
    }
}

/// Disjoint sets over group indices
struct Components {
    parent: Vec<usize>,
}

impl Components {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut index: usize) -> usize {
        while self.parent[index] != index {
            self.parent[index] = self.parent[self.parent[index]];
            index = self.parent[index];
        }
        index
    }

    /// Join two sets, keeping the lower index as root so components stay in
    /// first-seen order
    fn union(&mut self, a: usize, b: usize) {
        let (a, b) = (self.find(a), self.find(b));
        if a != b {
            self.parent[a.max(b)] = a.min(b);
        }
    }
}

/// Merge overloaded callable fragments
///
/// Non-callable entries and lone callables pass through unchanged and keep
/// their relative order. Unresolvable `@overload` references are reported
/// as warnings and leave the fragment in its own group.
pub fn merge_overloads(
    docs: Vec<CommentData>,
    diagnostics: &mut DiagnosticsCollector,
) -> Vec<CommentData> {
    let mut groups: IndexMap<GroupKey, Vec<usize>> = IndexMap::new();
    for (index, doc) in docs.iter().enumerate() {
        if let Some(family) = family_of(doc) {
            groups
                .entry((family, doc.fqn().to_string()))
                .or_default()
                .push(index);
        }
    }

    let mut components = Components::new(groups.len());
    for (from, to) in resolve_references(&docs, &groups, diagnostics) {
        components.union(from, to);
    }

    let mut members_of: IndexMap<usize, Vec<usize>> = IndexMap::new();
    for (group, members) in groups.values().enumerate() {
        let root = components.find(group);
        members_of.entry(root).or_default().extend(members);
    }

    let mut slots: Vec<Option<CommentData>> = docs.into_iter().map(Some).collect();
    let mut placed: Vec<(usize, CommentData)> = Vec::with_capacity(slots.len());

    for (index, slot) in slots.iter_mut().enumerate() {
        let passes_through = slot.as_ref().is_some_and(|doc| family_of(doc).is_none());
        if passes_through {
            if let Some(doc) = slot.take() {
                placed.push((index, doc));
            }
        }
    }

    for mut members in members_of.into_values() {
        members.sort_unstable();
        let Some(&position) = members.first() else {
            continue;
        };
        let fragments: Vec<CommentData> =
            members.iter().filter_map(|i| slots[*i].take()).collect();
        if let Some(entry) = combine(fragments) {
            placed.push((position, entry));
        }
    }

    placed.sort_by_key(|(position, _)| *position);
    placed.into_iter().map(|(_, doc)| doc).collect()
}

/// Find fragments whose `@overload` names a different group
///
/// Returns `(own group, target group)` index pairs.
fn resolve_references(
    docs: &[CommentData],
    groups: &IndexMap<GroupKey, Vec<usize>>,
    diagnostics: &mut DiagnosticsCollector,
) -> Vec<(usize, usize)> {
    let mut links = Vec::new();

    for doc in docs {
        let Some(family) = family_of(doc) else {
            continue;
        };
        let Some(target) = doc.tags().overload.as_deref() else {
            continue;
        };

        let fqn = doc.fqn();
        let (scope, name) = split_fqn(fqn);
        if target == fqn || target == name {
            continue;
        }
        let Some(own) = groups.get_index_of(&(family, fqn.to_string())) else {
            continue;
        };

        let sibling = if scope.is_empty() {
            target.to_string()
        } else {
            format!("{}.{}", scope, target)
        };
        let found = [sibling, target.to_string()]
            .into_iter()
            .find_map(|candidate| groups.get_index_of(&(family, candidate)));

        match found {
            Some(to) => {
                debug!(fqn = %fqn, target = %target, "quill.overload.join");
                links.push((own, to));
            }
            None => diagnostics.add(
                Diagnostic::warning(format!(
                    "@overload `{}` does not name a documented overload",
                    target
                ))
                .for_fqn(fqn)
                .with_code("dangling-overload"),
            ),
        }
    }

    links
}

fn combine(fragments: Vec<CommentData>) -> Option<CommentData> {
    match fragments.len() {
        0 => None,
        1 => fragments.into_iter().next(),
        _ => Some(merge_group(fragments)),
    }
}

/// Merge two or more fragments of one family into an overloaded entry
///
/// The primary fragment names the entry and supplies its shared tags.
/// Parameters and return text stay with each fragment's `Overload`.
fn merge_group(fragments: Vec<CommentData>) -> CommentData {
    let primary = fragments
        .iter()
        .position(|f| f.tags().overload.is_none())
        .unwrap_or(0);

    let fqn = fragments[primary].fqn().to_string();
    let mut tags = fragments[primary].tags().clone();
    tags.params.clear();
    tags.return_info = None;
    tags.overload = None;
    let modifiers = *fragments[primary].modifiers();
    let class_fqn = match &fragments[primary] {
        CommentData::Constructor(ctor) => Some(ctor.class_fqn.clone()),
        _ => None,
    };

    let overloads: Vec<Overload> = fragments.into_iter().filter_map(into_overload).collect();
    debug!(fqn = %fqn, signatures = overloads.len(), "quill.overload.merge");

    match class_fqn {
        Some(class_fqn) => {
            CommentData::OverloadedConstructor(OverloadedConstructorCommentData {
                fqn,
                class_fqn,
                modifiers,
                tags,
                overloads,
            })
        }
        None => CommentData::OverloadedMethod(OverloadedMethodCommentData {
            name: split_fqn(&fqn).1.to_string(),
            fqn,
            modifiers,
            tags,
            overloads,
        }),
    }
}

fn into_overload(doc: CommentData) -> Option<Overload> {
    let (name, declared, tags) = match doc {
        CommentData::Method(method) => (method.name, method.signature, method.tags),
        CommentData::Constructor(ctor) => {
            (split_fqn(&ctor.fqn).1.to_string(), ctor.signature, ctor.tags)
        }
        _ => return None,
    };

    Some(Overload {
        signature: declared.display(&name),
        declared,
        params: tags.params,
        return_info: tags.return_info,
    })
}
