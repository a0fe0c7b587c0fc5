//! Category Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::categories::{CategoryTree, records::CategoryRecord};

/// Category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent: Option<Uuid>,

    /// Depth, zero for root categories
    pub level: u32,

    /// Ancestor UUIDs joined by `/`
    pub path: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        Self {
            uuid: category.uuid.into_uuid(),
            name: category.name,
            slug: category.slug,
            description: category.description,
            parent: category.parent.map(|parent| parent.into_uuid()),
            level: category.level,
            path: category.path,
            is_active: category.is_active,
            sort_order: category.sort_order,
            created_at: category.created_at.to_string(),
            updated_at: category.updated_at.to_string(),
        }
    }
}

/// A category and its descendants
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryTreeResponse {
    pub category: CategoryResponse,

    /// Nested `CategoryTreeResponse` nodes
    #[salvo(schema(value_type = Vec<Object>))]
    pub children: Vec<CategoryTreeResponse>,
}

impl From<CategoryTree> for CategoryTreeResponse {
    fn from(node: CategoryTree) -> Self {
        Self {
            category: node.value.into(),
            children: node.children.into_iter().map(Into::into).collect(),
        }
    }
}
