use clap::Subcommand;
use serde_json::json;

use crate::auth::Route;
use crate::cli::commands::category::parse_id;
use crate::cli::utils::{
    ensure_loaded, finish_delete, finish_submit, output_empty_collection, output_json,
    require_session, StdinConfirm,
};
use crate::cli::{Context, OutputFormat};
use crate::controllers::{Assume, Confirm, SubCategoryController};

#[derive(Subcommand)]
pub enum SubCategoryCommands {
    #[command(about = "List subcategories with their category")]
    List,

    #[command(about = "Create a subcategory under an existing category")]
    Create {
        #[arg(long, help = "Title")]
        title: String,
        #[arg(long, help = "Parent category ID")]
        category: String,
        #[arg(long, default_value = "", help = "Description")]
        desc: String,
        #[arg(long, help = "Image URL (optional, http:// or https://)")]
        url: Option<String>,
    },

    #[command(about = "Update a subcategory; omitted fields keep their current value")]
    Update {
        #[arg(help = "Subcategory ID")]
        id: String,
        #[arg(long, help = "Title")]
        title: Option<String>,
        #[arg(long, help = "Parent category ID")]
        category: Option<String>,
        #[arg(long, help = "Description")]
        desc: Option<String>,
        #[arg(long, help = "Image URL (empty string clears it)")]
        url: Option<String>,
    },

    #[command(about = "Delete a subcategory")]
    Delete {
        #[arg(help = "Subcategory ID")]
        id: String,
        #[arg(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(cmd: SubCategoryCommands, ctx: &Context) -> anyhow::Result<()> {
    require_session(&ctx.session, Route::SubCategories)?;
    let output = ctx.output;

    let mut screen = SubCategoryController::new(&ctx.api);
    let loaded = screen.load().await;
    ensure_loaded(&output, loaded, screen.list.list_error.as_deref())?;

    match cmd {
        SubCategoryCommands::List => {}
        SubCategoryCommands::Create { title, category, desc, url } => {
            screen.state.form.title = title;
            screen.state.form.desc = desc;
            screen.state.form.c_url = url.unwrap_or_default();
            // an unknown category leaves the selector empty and fails validation
            screen.select_category(&parse_id(&category)?);
            let outcome = screen.submit().await;
            finish_submit(&output, "Subcategory", outcome, &screen.state)?;
        }
        SubCategoryCommands::Update { id, title, category, desc, url } => {
            let id = parse_id(&id)?;
            if !screen.edit(&id) {
                anyhow::bail!("Subcategory '{}' not found", id);
            }
            if let Some(title) = title {
                screen.state.form.title = title;
            }
            if let Some(desc) = desc {
                screen.state.form.desc = desc;
            }
            if let Some(url) = url {
                screen.state.form.c_url = url;
            }
            if let Some(category) = category {
                if !screen.select_category(&parse_id(&category)?) {
                    anyhow::bail!("Category '{}' not found", category);
                }
            }
            let outcome = screen.submit().await;
            finish_submit(&output, "Subcategory", outcome, &screen.state)?;
        }
        SubCategoryCommands::Delete { id, yes } => {
            let id = parse_id(&id)?;
            let mut confirm: Box<dyn Confirm> = if yes { Box::new(Assume(true)) } else { Box::new(StdinConfirm) };
            let outcome = screen.delete(&id, confirm.as_mut()).await;
            finish_delete(&output, "Subcategory", outcome, screen.list.list_error.as_deref())?;
        }
    }

    render(&screen, &output)
}

fn render<A: crate::api::BloomsApi + ?Sized>(
    screen: &SubCategoryController<'_, A>,
    output: &OutputFormat,
) -> anyhow::Result<()> {
    let rows = screen.rows();
    if rows.is_empty() {
        return output_empty_collection(output, "subcategories", "No subcategories found");
    }

    match output {
        OutputFormat::Json => output_json(&json!({ "subcategories": rows })),
        OutputFormat::Text => {
            for row in &rows {
                let sub = row.sub_category;
                println!("[{}] {}  (category: {})", sub.id, sub.title, row.category_label);
                if !sub.desc.is_empty() {
                    println!("    {}", sub.desc);
                }
                if let Some(url) = &sub.c_url {
                    println!("    image: {}", url);
                }
            }
            Ok(())
        }
    }
}
