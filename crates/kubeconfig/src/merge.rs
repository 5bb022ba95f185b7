//! Precedence merge of kubeconfig documents
//!
//! Sources are ordered from highest to lowest precedence. A named entry
//! (cluster, context, user) is taken from the first source that defines the
//! name; later definitions are dropped whole, never field-merged. Scalars and
//! preferences come from the first source where they are non-empty.

use crate::types::Kubeconfig;

/// Merge `sources`, earlier ones winning. Named lists come out sorted by name.
pub fn merge<I>(sources: I) -> Kubeconfig
where
    I: IntoIterator<Item = Kubeconfig>,
{
    let mut merged = Kubeconfig::default();

    for source in sources {
        if merged.current_context.is_empty() {
            merged.current_context = source.current_context;
        }
        if merged.preferences.is_empty() {
            merged.preferences = source.preferences;
        }
        merge_named(&mut merged.clusters, source.clusters, |c| &c.name);
        merge_named(&mut merged.contexts, source.contexts, |c| &c.name);
        merge_named(&mut merged.users, source.users, |u| &u.name);
        for (key, value) in source.extra {
            if !merged.extra.contains_key(&key) {
                merged.extra.insert(key, value);
            }
        }
    }

    merged.clusters.sort_by(|a, b| a.name.cmp(&b.name));
    merged.contexts.sort_by(|a, b| a.name.cmp(&b.name));
    merged.users.sort_by(|a, b| a.name.cmp(&b.name));
    merged
}

fn merge_named<T>(into: &mut Vec<T>, from: Vec<T>, name: impl Fn(&T) -> &String) {
    for item in from {
        if !into.iter().any(|existing| name(existing) == name(&item)) {
            into.push(item);
        }
    }
}
