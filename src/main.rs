// CLI entry point: prompt for a request, run the workflow, print the trace
use std::io::Write;
use std::sync::Arc;

use image_agents::{run_workflow, OpenAiClient, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_logging()?;

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(_) => {
            eprintln!("Error: OPENAI_API_KEY not found in environment");
            std::process::exit(1);
        }
    };

    println!("\n🤖 Image Processing Multi-Agent System");
    println!("----------------------------------------");
    println!("\nWhat would you like to do with an image?");
    println!("(e.g. 'generate a sunset image and add text on top')");
    print!("\nYour request: ");
    std::io::stdout().flush()?;

    let mut user_request = String::new();
    std::io::stdin().read_line(&mut user_request)?;
    let user_request = user_request.trim();

    println!("\n🚀 Starting workflow...");
    println!("----------------------------------------");

    let completion = Arc::new(OpenAiClient::new(&settings));
    let final_state = run_workflow(user_request, completion, settings.executor_config()).await?;

    println!("\n✨ Workflow complete!");
    println!("----------------------------------------");
    println!("\nExecution path:");
    for msg in &final_state.messages {
        println!("- {}", msg.content);
    }

    println!(
        "\nFinal image URL: {}",
        final_state.processed_image_url.as_deref().unwrap_or("none")
    );

    Ok(())
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            "debug,image_agents=trace,reqwest=info,hyper=info".to_string()
        } else {
            "info,image_agents=info,reqwest=warn,hyper=warn".to_string()
        }
    });

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_level))?;

    let fmt_layer = if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        // JSON logging for production (easier for log aggregation)
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .boxed()
    } else {
        // Human-readable logging for development
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
