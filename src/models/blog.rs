use serde::{Deserialize, Serialize};

use crate::models::null_as_default;
use crate::types::EntityId;

/// One (category, subcategory) tag on a blog.
///
/// The parent category is carried redundantly because a subcategory already
/// determines it; the server stores the entry exactly as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMapping {
    pub category_id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_name: String,
    pub sub_category_id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sub_category_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: EntityId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub author_id: Option<EntityId>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_mappings: Vec<CategoryMapping>,
}

/// Body for `POST /blog` and `PUT /blog`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub title: String,
    pub description: String,
    pub content: String,
    pub author_id: EntityId,
    pub category_mappings: Vec<CategoryMapping>,
}

/// Category with its children, as returned by `GET /blog/categories`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    pub category_id: EntityId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sub_category_detail_list: Vec<SubCategoryLeaf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryLeaf {
    pub sub_category_id: EntityId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blog_decodes_with_missing_optional_fields() {
        let blog: Blog = serde_json::from_value(json!({
            "id": 3,
            "title": "Hello"
        }))
        .unwrap();
        assert_eq!(blog.id, EntityId::Int(3));
        assert!(blog.category_mappings.is_empty());
        assert_eq!(blog.author_name, None);
    }

    #[test]
    fn null_optional_fields_decode_as_empty() {
        let blogs: Vec<Blog> = serde_json::from_value(json!([
            { "id": 1, "title": "Tagged", "categoryMappings": [] },
            {
                "id": 2,
                "title": "Draft",
                "description": null,
                "content": null,
                "authorId": null,
                "categoryMappings": null
            }
        ]))
        .unwrap();
        assert_eq!(blogs.len(), 2);
        assert_eq!(blogs[1].description, "");
        assert_eq!(blogs[1].content, "");
        assert_eq!(blogs[1].author_id, None);
        assert!(blogs[1].category_mappings.is_empty());

        let tree: Vec<CategoryNode> = serde_json::from_value(json!([
            { "categoryId": 1, "name": "Tech", "subCategoryDetailList": null }
        ]))
        .unwrap();
        assert!(tree[0].sub_category_detail_list.is_empty());

        let mapping: CategoryMapping = serde_json::from_value(json!({
            "categoryId": 1,
            "categoryName": null,
            "subCategoryId": 10,
            "subCategoryName": null
        }))
        .unwrap();
        assert_eq!(mapping.category_name, "");
    }

    #[test]
    fn payload_uses_wire_field_names() {
        let payload = BlogPayload {
            id: None,
            title: "T".into(),
            description: String::new(),
            content: "C".into(),
            author_id: EntityId::Int(1),
            category_mappings: vec![CategoryMapping {
                category_id: "cat-1".into(),
                category_name: "Tech".into(),
                sub_category_id: "sub-1".into(),
                sub_category_name: "AI".into(),
            }],
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert!(v.get("id").is_none());
        assert_eq!(v["authorId"], json!(1));
        assert_eq!(v["categoryMappings"][0]["subCategoryId"], json!("sub-1"));
        assert_eq!(v["categoryMappings"][0]["categoryName"], json!("Tech"));
    }

    #[test]
    fn category_tree_decodes_nested_list() {
        let tree: Vec<CategoryNode> = serde_json::from_value(json!([
            {
                "categoryId": 1,
                "name": "Tech",
                "subCategoryDetailList": [{ "subCategoryId": 10, "name": "AI" }]
            },
            { "categoryId": 2, "name": "Empty" }
        ]))
        .unwrap();
        assert_eq!(tree[0].sub_category_detail_list[0].name, "AI");
        assert!(tree[1].sub_category_detail_list.is_empty());
    }
}
