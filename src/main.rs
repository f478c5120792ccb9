//! Terminal shell for the screening conversation.
//!
//! Reads candidate input line by line from stdin and prints the assistant's
//! replies with a simple stage/progress indicator. Configuration comes from
//! `TALENT_SCREEN`-prefixed environment variables (see the `config` module).

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use talent_screen::adapters::ai::{OpenAiClient, OpenAiClientConfig};
use talent_screen::application::{ConversationManager, TurnOutcome};
use talent_screen::config::AppConfig;
use talent_screen::domain::screening::Stage;
use talent_screen::ports::TextGenerator;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("talent_screen=info")),
        )
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("failed to load configuration: {error}");
            std::process::exit(1);
        }
    };
    if let Err(error) = config.validate() {
        eprintln!("invalid configuration: {error}");
        std::process::exit(1);
    }

    let generator: Arc<dyn TextGenerator> = Arc::new(OpenAiClient::new(
        OpenAiClientConfig::from_generation_config(&config.generation),
    ));
    let backend = generator.backend_info();
    tracing::info!(provider = %backend.name, model = %backend.model, "screening shell starting");

    let mut session = ConversationManager::new(generator, config.interview.clone());

    let opening = session.greet().await;
    print_outcome(&opening);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            // EOF: treat like an exit so the candidate gets a farewell.
            let outcome = session.process_turn("exit").await;
            print_outcome(&outcome);
            break;
        };

        let outcome = session.process_turn(&line).await;
        print_outcome(&outcome);

        if outcome.stage == Stage::Exited {
            break;
        }
    }
}

fn print_outcome(outcome: &TurnOutcome) {
    println!(
        "\n[{} - {:.0}%]\n{}\n",
        outcome.stage.label(),
        outcome.progress * 100.0,
        outcome.assistant_text
    );
}
