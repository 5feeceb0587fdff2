// Evaluation runner: execute every built-in case and score it with a judge LLM
use std::sync::Arc;

use image_agents::evaluation::{
    builtin_dataset, check_image_generation_node, check_node_execution, evaluate_task_completion,
    EvalScore,
};
use image_agents::{run_workflow, CompletionService, OpenAiClient, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(_) => {
            eprintln!("❌ Error: OPENAI_API_KEY not found in environment");
            std::process::exit(1);
        }
    };

    println!("\n🚀 Starting evaluation run");
    println!("==============================");

    println!("\n1️⃣ Preparing test dataset...");
    let dataset = builtin_dataset();
    println!("✓ Dataset ready ({} cases)", dataset.len());

    println!("\n2️⃣ Initializing workflow and judge...");
    let completion: Arc<dyn CompletionService> = Arc::new(OpenAiClient::new(&settings));
    let judge = OpenAiClient::new(&settings);
    println!("✓ Multi-agent workflow initialized");

    println!("\n3️⃣ Evaluating three key criteria:");
    println!("1. Task completion: overall system performance");
    println!("2. Node execution: agent interaction patterns");
    println!("3. Single node: image generation agent performance");

    let mut total_score = 0.0_f32;
    let mut total_criteria = 0usize;

    for (index, case) in dataset.iter().enumerate() {
        println!("\n==============================");
        println!("Case {}: {}", index + 1, case.request);

        let state = match run_workflow(
            &case.request,
            Arc::clone(&completion),
            settings.executor_config(),
        )
        .await
        {
            Ok(state) => state,
            Err(e) => {
                println!("❌ Workflow run failed: {}", e);
                continue;
            }
        };

        let task_completion = evaluate_task_completion(&state, case, &judge).await;
        let node_execution = check_node_execution(&state, case, &judge).await;
        let image_generation = check_image_generation_node(&state, case, &judge).await;

        print_score("Task completion", &task_completion);
        print_score("Node execution", &node_execution);
        print_score("Image generation node", &image_generation);

        total_score += task_completion.score + node_execution.score + image_generation.score;
        total_criteria += 3;

        println!(
            "\nFinal image URL: {}",
            state.processed_image_url.as_deref().unwrap_or("none")
        );
    }

    println!("\n==============================");
    if total_criteria > 0 {
        println!(
            "Overall: {:.2} across {} criteria",
            total_score / total_criteria as f32,
            total_criteria
        );
    } else {
        println!("No cases were evaluated");
    }

    Ok(())
}

fn print_score(criterion: &str, result: &EvalScore) {
    let mark = if result.score >= 1.0 { "✅" } else { "❌" };
    println!("\n{} {} score: {}", mark, criterion, result.score);
    println!("Analysis: {}", result.reasoning);
}
