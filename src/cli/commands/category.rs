use clap::Subcommand;
use serde_json::json;

use crate::auth::Route;
use crate::cli::utils::{
    ensure_loaded, finish_delete, finish_submit, output_empty_collection, output_json,
    require_session, StdinConfirm,
};
use crate::cli::{Context, OutputFormat};
use crate::controllers::{Assume, CategoryController, Confirm};
use crate::types::EntityId;

#[derive(Subcommand)]
pub enum CategoryCommands {
    #[command(about = "List categories with their subcategories")]
    List,

    #[command(about = "Create a category")]
    Create {
        #[arg(long, help = "Title")]
        title: String,
        #[arg(long, help = "Description")]
        desc: String,
        #[arg(long, help = "Image URL (optional, http:// or https://)")]
        url: Option<String>,
    },

    #[command(about = "Update a category; omitted fields keep their current value")]
    Update {
        #[arg(help = "Category ID")]
        id: String,
        #[arg(long, help = "Title")]
        title: Option<String>,
        #[arg(long, help = "Description")]
        desc: Option<String>,
        #[arg(long, help = "Image URL (empty string clears it)")]
        url: Option<String>,
    },

    #[command(about = "Delete a category (subcategories are left in place)")]
    Delete {
        #[arg(help = "Category ID")]
        id: String,
        #[arg(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(cmd: CategoryCommands, ctx: &Context) -> anyhow::Result<()> {
    require_session(&ctx.session, Route::Categories)?;
    let output = ctx.output;

    let mut screen = CategoryController::new(&ctx.api);
    let loaded = screen.load().await;
    ensure_loaded(&output, loaded, screen.list.list_error.as_deref())?;

    match cmd {
        CategoryCommands::List => {}
        CategoryCommands::Create { title, desc, url } => {
            screen.state.form.title = title;
            screen.state.form.desc = desc;
            screen.state.form.category_url = url.unwrap_or_default();
            let outcome = screen.submit().await;
            finish_submit(&output, "Category", outcome, &screen.state)?;
        }
        CategoryCommands::Update { id, title, desc, url } => {
            let id = parse_id(&id)?;
            if !screen.edit(&id) {
                anyhow::bail!("Category '{}' not found", id);
            }
            if let Some(title) = title {
                screen.state.form.title = title;
            }
            if let Some(desc) = desc {
                screen.state.form.desc = desc;
            }
            if let Some(url) = url {
                screen.state.form.category_url = url;
            }
            let outcome = screen.submit().await;
            finish_submit(&output, "Category", outcome, &screen.state)?;
        }
        CategoryCommands::Delete { id, yes } => {
            let id = parse_id(&id)?;
            let mut confirm: Box<dyn Confirm> = if yes { Box::new(Assume(true)) } else { Box::new(StdinConfirm) };
            let outcome = screen.delete(&id, confirm.as_mut()).await;
            finish_delete(&output, "Category", outcome, screen.list.list_error.as_deref())?;
        }
    }

    render(&screen, &output)
}

pub(crate) fn parse_id(raw: &str) -> anyhow::Result<EntityId> {
    EntityId::parse(raw).ok_or_else(|| anyhow::anyhow!("ID must not be empty"))
}

fn render<A: crate::api::BloomsApi + ?Sized>(
    screen: &CategoryController<'_, A>,
    output: &OutputFormat,
) -> anyhow::Result<()> {
    if screen.list.items.is_empty() {
        return output_empty_collection(output, "categories", "No categories found");
    }

    let groups = screen.groups();
    match output {
        OutputFormat::Json => output_json(&json!({ "categories": groups })),
        OutputFormat::Text => {
            for group in &groups {
                let c = group.category;
                println!("[{}] {}", c.id, c.title);
                if !c.desc.is_empty() {
                    println!("    {}", c.desc);
                }
                if let Some(url) = &c.category_url {
                    println!("    image: {}", url);
                }
                if !group.subcategories.is_empty() {
                    println!("    subcategories ({}):", group.subcategories.len());
                    for sub in &group.subcategories {
                        println!("      - [{}] {}", sub.id, sub.title);
                    }
                }
            }
            Ok(())
        }
    }
}
