//! Categories
//!
//! Slug generation, hierarchy placement and tree assembly for catalogue categories.

use rustc_hash::FxHashMap;
use uuid::Uuid;

/// Generates a URL slug from a category name.
///
/// Lowercases, replaces every non-alphanumeric character with `-`, collapses dash runs and
/// trims leading and trailing dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }

    slug.trim_matches('-').to_string()
}

/// Where a category sits in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Depth, zero for root categories.
    pub level: u32,

    /// Ancestor identifiers joined by `/`, empty for root categories.
    pub path: String,
}

impl Placement {
    /// Placement of a root category.
    pub fn root() -> Self {
        Self {
            level: 0,
            path: String::new(),
        }
    }

    /// Placement of a direct child of a category with this placement and identifier.
    pub fn child_of(&self, parent: Uuid) -> Self {
        let path = if self.path.is_empty() {
            parent.to_string()
        } else {
            format!("{}/{parent}", self.path)
        };

        Self {
            level: self.level.saturating_add(1),
            path,
        }
    }
}

/// A category with its children attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<T> {
    /// The category
    pub value: T,

    /// Direct children, in input order
    pub children: Vec<TreeNode<T>>,
}

/// Assembles a forest from a flat list.
///
/// `id` and `parent` extract each entry's identifier and parent identifier. Roots and
/// siblings keep their input order. Entries whose parent is not in the list are dropped,
/// together with their descendants.
pub fn build_tree<T, I, P>(entries: Vec<T>, id: I, parent: P) -> Vec<TreeNode<T>>
where
    I: Fn(&T) -> Uuid,
    P: Fn(&T) -> Option<Uuid>,
{
    let mut roots = Vec::new();
    let mut children: FxHashMap<Uuid, Vec<T>> = FxHashMap::default();

    for entry in entries {
        match parent(&entry) {
            Some(parent) => children.entry(parent).or_default().push(entry),
            None => roots.push(entry),
        }
    }

    roots
        .into_iter()
        .map(|root| attach(root, &id, &mut children))
        .collect()
}

fn attach<T, I>(value: T, id: &I, children: &mut FxHashMap<Uuid, Vec<T>>) -> TreeNode<T>
where
    I: Fn(&T) -> Uuid,
{
    let kids = children.remove(&id(&value)).unwrap_or_default();

    TreeNode {
        value,
        children: kids
            .into_iter()
            .map(|child| attach(child, id, children))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Entry {
        uuid: Uuid,
        parent: Option<Uuid>,
        name: &'static str,
    }

    fn entry(name: &'static str, parent: Option<Uuid>) -> Entry {
        Entry {
            uuid: Uuid::now_v7(),
            parent,
            name,
        }
    }

    fn names(nodes: &[TreeNode<Entry>]) -> Vec<&'static str> {
        nodes.iter().map(|node| node.value.name).collect()
    }

    #[test]
    fn slugify_collapses_and_trims() {
        assert_eq!(slugify("Men's Shoes"), "men-s-shoes");
        assert_eq!(slugify("  Home & Garden!! "), "home-garden");
        assert_eq!(slugify("Électronique"), "lectronique");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn placement_accumulates_path() {
        let root = Uuid::now_v7();
        let mid = Uuid::now_v7();

        let child = Placement::root().child_of(root);
        let grandchild = child.child_of(mid);

        assert_eq!(child.level, 1);
        assert_eq!(child.path, root.to_string());
        assert_eq!(grandchild.level, 2);
        assert_eq!(grandchild.path, format!("{root}/{mid}"));
    }

    #[test]
    fn tree_attaches_children_in_order() {
        let clothing = entry("Clothing", None);
        let shirts = entry("Shirts", Some(clothing.uuid));
        let trousers = entry("Trousers", Some(clothing.uuid));
        let polos = entry("Polos", Some(shirts.uuid));
        let books = entry("Books", None);

        let tree = build_tree(
            vec![
                clothing.clone(),
                books,
                polos,
                shirts.clone(),
                trousers,
            ],
            |e| e.uuid,
            |e| e.parent,
        );

        assert_eq!(names(&tree), vec!["Clothing", "Books"]);

        let clothing_node = tree.first().map(|node| names(&node.children));
        assert_eq!(clothing_node, Some(vec!["Shirts", "Trousers"]));

        let shirt_children = tree
            .first()
            .and_then(|node| node.children.first())
            .map(|node| names(&node.children));
        assert_eq!(shirt_children, Some(vec!["Polos"]));
    }

    #[test]
    fn orphans_and_their_descendants_are_dropped() {
        let orphan = entry("Orphan", Some(Uuid::now_v7()));
        let under_orphan = entry("Under orphan", Some(orphan.uuid));
        let root = entry("Root", None);

        let tree = build_tree(vec![orphan, under_orphan, root], |e| e.uuid, |e| e.parent);

        assert_eq!(names(&tree), vec!["Root"]);
        assert!(tree.iter().all(|node| node.children.is_empty()));
    }
}
