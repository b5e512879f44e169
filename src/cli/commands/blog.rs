use clap::Subcommand;
use serde_json::json;

use crate::auth::Route;
use crate::cli::commands::category::parse_id;
use crate::cli::utils::{
    ensure_loaded, finish_delete, finish_submit, output_empty_collection, output_error,
    output_json, read_text_arg, require_session, StdinConfirm,
};
use crate::cli::{Context, OutputFormat};
use crate::controllers::{Assume, BlogController, Confirm};

#[derive(Subcommand)]
pub enum BlogCommands {
    #[command(about = "List published blogs")]
    List,

    #[command(about = "Show the category tree used for tagging")]
    Tree,

    #[command(about = "Publish a blog as the signed-in user")]
    Create {
        #[arg(long, help = "Title")]
        title: String,
        #[arg(long, help = "Content, or - to read from stdin")]
        content: String,
        #[arg(long, default_value = "", help = "Short description")]
        description: String,
        #[arg(long = "tag", help = "Subcategory ID to tag (repeatable)")]
        tags: Vec<String>,
    },

    #[command(about = "Update a blog; each --tag toggles that subcategory")]
    Update {
        #[arg(help = "Blog ID")]
        id: String,
        #[arg(long, help = "Title")]
        title: Option<String>,
        #[arg(long, help = "Content, or - to read from stdin")]
        content: Option<String>,
        #[arg(long, help = "Short description")]
        description: Option<String>,
        #[arg(long = "tag", help = "Subcategory ID to toggle (repeatable)")]
        tags: Vec<String>,
    },

    #[command(about = "Delete a blog")]
    Delete {
        #[arg(help = "Blog ID")]
        id: String,
        #[arg(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(cmd: BlogCommands, ctx: &Context) -> anyhow::Result<()> {
    require_session(&ctx.session, Route::Blogs)?;
    let output = ctx.output;

    let mut screen = BlogController::new(&ctx.api, &ctx.session);
    let loaded = screen.load().await;
    ensure_loaded(&output, loaded, screen.list.list_error.as_deref())?;

    match cmd {
        BlogCommands::List => {}
        BlogCommands::Tree => return render_tree(&screen, &output),
        BlogCommands::Create { title, content, description, tags } => {
            screen.state.form.title = title;
            screen.state.form.description = description;
            screen.state.form.content = read_text_arg(content)?;
            apply_tags(&mut screen, &tags, &output)?;
            let outcome = screen.submit().await;
            finish_submit(&output, "Blog", outcome, &screen.state)?;
        }
        BlogCommands::Update { id, title, content, description, tags } => {
            let id = parse_id(&id)?;
            if !screen.edit(&id) {
                anyhow::bail!("Blog '{}' not found", id);
            }
            if let Some(title) = title {
                screen.state.form.title = title;
            }
            if let Some(description) = description {
                screen.state.form.description = description;
            }
            if let Some(content) = content {
                screen.state.form.content = read_text_arg(content)?;
            }
            apply_tags(&mut screen, &tags, &output)?;
            let outcome = screen.submit().await;
            finish_submit(&output, "Blog", outcome, &screen.state)?;
        }
        BlogCommands::Delete { id, yes } => {
            let id = parse_id(&id)?;
            let mut confirm: Box<dyn Confirm> = if yes { Box::new(Assume(true)) } else { Box::new(StdinConfirm) };
            let outcome = screen.delete(&id, confirm.as_mut()).await;
            finish_delete(&output, "Blog", outcome, screen.list.list_error.as_deref())?;
        }
    }

    render_list(&screen, &output)
}

fn apply_tags<A: crate::api::BloomsApi + ?Sized>(
    screen: &mut BlogController<'_, A>,
    tags: &[String],
    output: &OutputFormat,
) -> anyhow::Result<()> {
    for tag in tags {
        let id = parse_id(tag)?;
        if screen.toggle_tag(&id).is_none() {
            output_error(output, "Unknown subcategory", Some(&screen.state.errors))?;
            anyhow::bail!("Subcategory '{}' is not in the category tree", id);
        }
    }
    Ok(())
}

fn render_list<A: crate::api::BloomsApi + ?Sized>(
    screen: &BlogController<'_, A>,
    output: &OutputFormat,
) -> anyhow::Result<()> {
    if screen.list.items.is_empty() {
        return output_empty_collection(output, "blogs", "No blogs published yet");
    }

    match output {
        OutputFormat::Json => {
            let blogs: Vec<_> = screen
                .list
                .items
                .iter()
                .map(|b| json!({ "blog": b, "tags": screen.labels(b) }))
                .collect();
            output_json(&json!({ "blogs": blogs }))
        }
        OutputFormat::Text => {
            for blog in &screen.list.items {
                println!("[{}] {}", blog.id, blog.title);
                if !blog.description.is_empty() {
                    println!("    {}", blog.description);
                }
                if let Some(author) = &blog.author_name {
                    println!("    by {}", author);
                }
                let tags: Vec<String> = screen
                    .labels(blog)
                    .into_iter()
                    .map(|l| format!("{}/{}", l.category_name, l.sub_category_name))
                    .collect();
                if !tags.is_empty() {
                    println!("    tags: {}", tags.join(", "));
                }
            }
            Ok(())
        }
    }
}

fn render_tree<A: crate::api::BloomsApi + ?Sized>(
    screen: &BlogController<'_, A>,
    output: &OutputFormat,
) -> anyhow::Result<()> {
    let tree = screen.taxonomy.tree();
    if tree.is_empty() {
        return output_empty_collection(output, "categories", "No categories to tag with");
    }

    match output {
        OutputFormat::Json => output_json(&json!({ "categories": tree })),
        OutputFormat::Text => {
            for node in tree {
                println!("[{}] {}", node.category_id, node.name);
                for leaf in &node.sub_category_detail_list {
                    println!("    - [{}] {}", leaf.sub_category_id, leaf.name);
                }
            }
            Ok(())
        }
    }
}
