//! Fetch and print the stage-template list from a running backend.
//!
//! ```sh
//! BAMS_API_BASE_URL=http://localhost:8080 cargo run --example list_templates
//! ```

use bams_client::api::StageTemplateApi;
use bams_client::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ClientConfig::from_env();
    let api = StageTemplateApi::new(&config)?;

    let templates = api.list_templates().await?;
    println!("{} template(s)", templates.len());
    for template in &templates {
        println!(
            "#{} {} ({} stages)",
            template.template_id,
            template.template_name,
            template.stage_count.unwrap_or(0)
        );
    }
    Ok(())
}
