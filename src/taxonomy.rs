//! Taxonomy composition: category -> subcategory grouping and blog tagging.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Category, CategoryMapping, CategoryNode, SubCategory, SubCategoryLeaf};
use crate::types::EntityId;

/// Label for subcategories whose category is not in the loaded table
pub const UNASSIGNED: &str = "Unassigned";

/// Subcategories belonging to `category_id`, in list order
pub fn subcategories_of<'a>(subs: &'a [SubCategory], category_id: &EntityId) -> Vec<&'a SubCategory> {
    subs.iter()
        .filter(|s| s.category_id.as_ref() == Some(category_id))
        .collect()
}

/// Category title for a subcategory, resolved against the loaded categories.
///
/// The denormalised `categoryName` is ignored so a category deleted out of
/// band shows up as unassigned instead of under a stale name.
pub fn category_label<'a>(categories: &'a [Category], sub: &SubCategory) -> &'a str {
    sub.category_id
        .as_ref()
        .and_then(|id| categories.iter().find(|c| &c.id == id))
        .map(|c| c.title.as_str())
        .unwrap_or(UNASSIGNED)
}

/// One category with its children, for nested display
#[derive(Debug, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: &'a Category,
    pub subcategories: Vec<&'a SubCategory>,
}

pub fn group_by_category<'a>(categories: &'a [Category], subs: &'a [SubCategory]) -> Vec<CategoryGroup<'a>> {
    categories
        .iter()
        .map(|category| CategoryGroup {
            category,
            subcategories: subcategories_of(subs, &category.id),
        })
        .collect()
}

/// Lookup over the category tree.
///
/// `subCategoryId -> categoryId` is the authoritative relation; names are
/// read from here rather than from the copies stored on each blog.
#[derive(Debug, Default, Clone)]
pub struct TaxonomyIndex {
    tree: Vec<CategoryNode>,
    // sub id -> (category position, sub position)
    positions: HashMap<EntityId, (usize, usize)>,
}

impl TaxonomyIndex {
    pub fn new(tree: Vec<CategoryNode>) -> Self {
        let mut positions = HashMap::new();
        for (ci, node) in tree.iter().enumerate() {
            for (si, leaf) in node.sub_category_detail_list.iter().enumerate() {
                // first occurrence wins if the server repeats a subcategory
                positions.entry(leaf.sub_category_id.clone()).or_insert((ci, si));
            }
        }
        Self { tree, positions }
    }

    pub fn tree(&self) -> &[CategoryNode] {
        &self.tree
    }

    pub fn resolve(&self, sub_category_id: &EntityId) -> Option<(&CategoryNode, &SubCategoryLeaf)> {
        let (ci, si) = *self.positions.get(sub_category_id)?;
        let node = &self.tree[ci];
        Some((node, &node.sub_category_detail_list[si]))
    }

    /// Display names for a stored mapping, preferring the live tree
    pub fn label(&self, mapping: &CategoryMapping) -> MappingLabel {
        match self.resolve(&mapping.sub_category_id) {
            Some((node, leaf)) => MappingLabel {
                category_name: node.name.clone(),
                sub_category_name: leaf.name.clone(),
            },
            None => MappingLabel {
                category_name: mapping.category_name.clone(),
                sub_category_name: mapping.sub_category_name.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingLabel {
    pub category_name: String,
    pub sub_category_name: String,
}

/// A blog's tag set, unique by `subCategoryId`, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSet(Vec<CategoryMapping>);

impl MappingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt mappings loaded from the server, dropping duplicate subcategories
    pub fn from_mappings(mappings: Vec<CategoryMapping>) -> Self {
        let mut set = Self::new();
        for mapping in mappings {
            if !set.contains(&mapping.sub_category_id) {
                set.0.push(mapping);
            }
        }
        set
    }

    pub fn contains(&self, sub_category_id: &EntityId) -> bool {
        self.0.iter().any(|m| &m.sub_category_id == sub_category_id)
    }

    /// Remove the subcategory if tagged, otherwise append it with its parent
    /// category denormalised in. Returns whether it is tagged afterwards.
    pub fn toggle(&mut self, category: &CategoryNode, sub_category: &SubCategoryLeaf) -> bool {
        if self.contains(&sub_category.sub_category_id) {
            self.0.retain(|m| m.sub_category_id != sub_category.sub_category_id);
            false
        } else {
            self.0.push(CategoryMapping {
                category_id: category.category_id.clone(),
                category_name: category.name.clone(),
                sub_category_id: sub_category.sub_category_id.clone(),
                sub_category_name: sub_category.name.clone(),
            });
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[CategoryMapping] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<CategoryMapping> {
        self.0.clone()
    }
}
