use crate::auth::Route;
use crate::cli::utils::{ensure_loaded, output_json, require_session};
use crate::cli::{Context, OutputFormat};
use crate::controllers::DashboardController;

pub async fn handle(ctx: &Context) -> anyhow::Result<()> {
    let identity = require_session(&ctx.session, Route::Admin)?;
    let output = ctx.output;

    let mut dashboard = DashboardController::new(&ctx.api);
    let loaded = dashboard.load().await;
    ensure_loaded(&output, loaded, dashboard.list_error.as_deref())?;

    match output {
        OutputFormat::Json => output_json(&dashboard.stats),
        OutputFormat::Text => {
            println!("Welcome back, {}", identity.display_name());
            println!("Total blogs:    {}", dashboard.stats.blogs);
            println!("Categories:     {}", dashboard.stats.categories);
            println!("SubCategories:  {}", dashboard.stats.sub_categories);
            Ok(())
        }
    }
}
