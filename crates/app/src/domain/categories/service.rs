//! Categories service.

use async_trait::async_trait;
use mockall::automock;
use storefront::categories::{Placement, TreeNode, build_tree, slugify};

use crate::{
    database::Db,
    domain::categories::{
        data::NewCategory,
        errors::CategoriesServiceError,
        records::{CategoryRecord, CategoryUuid},
        repository::PgCategoriesRepository,
    },
};

/// A category with its active subcategories attached.
pub type CategoryTree = TreeNode<CategoryRecord>;

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn category_tree(&self) -> Result<Vec<CategoryTree>, CategoriesServiceError> {
        let categories = self.list_categories().await?;

        Ok(build_tree(
            categories,
            |category| category.uuid.into_uuid(),
            |category| category.parent.map(CategoryUuid::into_uuid),
        ))
    }

    async fn create_category(
        &self,
        mut category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        category.name = category.name.trim().to_string();

        let slug = slugify(&category.name);

        if slug.is_empty() {
            return Err(CategoriesServiceError::InvalidName);
        }

        let mut tx = self.db.begin_transaction().await?;

        let placement = match category.parent {
            Some(parent) => {
                let parent = self
                    .repository
                    .get_category(&mut tx, parent)
                    .await
                    .map_err(|error| match CategoriesServiceError::from(error) {
                        CategoriesServiceError::NotFound => CategoriesServiceError::ParentNotFound,
                        other => other,
                    })?;

                Placement {
                    level: parent.level,
                    path: parent.path,
                }
                .child_of(parent.uuid.into_uuid())
            }
            None => Placement::root(),
        };

        let created = self
            .repository
            .create_category(&mut tx, category, slug, placement)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Active categories ordered by sort order then name.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    /// Active categories assembled into a forest. Categories whose parent is inactive or
    /// missing are left out.
    async fn category_tree(&self) -> Result<Vec<CategoryTree>, CategoriesServiceError>;

    /// Creates a category, deriving its slug, level and path.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;
}
