use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::categories::{
        CategoriesService, PgCategoriesService, data::NewCategory, records::CategoryUuid,
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateCategoryArgs {
    /// Category display name
    #[arg(long)]
    name: String,

    /// Optional description
    #[arg(long)]
    description: Option<String>,

    /// Parent category UUID
    #[arg(long)]
    parent: Option<Uuid>,

    /// Position among siblings
    #[arg(long, default_value_t = 0)]
    sort_order: i32,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateCategoryArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgCategoriesService::new(Db::new(pool));

    let category = service
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: args.name,
            description: args.description,
            parent: args.parent.map(CategoryUuid::from_uuid),
            sort_order: args.sort_order,
        })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_uuid: {}", category.uuid);
    println!("category_slug: {}", category.slug);
    println!("category_path: {}", category.path);

    Ok(())
}
