use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cafe_core::config::{BotKind, RecognizerKind, StateBackend};
use cafe_core::{Bot, CafeBot, ConversationState, EchoBot, KeywordRecognizer};
use cafe_infrastructure::{ConfigService, create_state_store};

mod logging;
mod repl;

#[derive(Parser)]
#[command(name = "cafe")]
#[command(about = "Contoso Cafe reservation bot on the console", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/contoso-cafe/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Which bot to talk to: cafe or echo
    #[arg(long)]
    bot: Option<BotKind>,

    /// Recognizer for free text: none or keyword
    #[arg(long)]
    recognizer: Option<RecognizerKind>,

    /// Keep conversation state as JSON files in this directory
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);

    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let mut config = config_service.load()?;

    if let Some(bot) = cli.bot {
        config.bot = bot;
    }
    if let Some(recognizer) = cli.recognizer {
        config.recognizer = recognizer;
    }
    if let Some(dir) = cli.state_dir {
        config.state.backend = StateBackend::File;
        config.state.dir = Some(dir);
    }

    let store = create_state_store(&config.state)?;
    let bot: Arc<dyn Bot> = match config.bot {
        BotKind::Echo => Arc::new(EchoBot::new(ConversationState::new(store))),
        BotKind::Cafe => {
            let mut builder = CafeBot::builder().state_store(store);
            if config.recognizer == RecognizerKind::Keyword {
                builder = builder.recognizer(Arc::new(KeywordRecognizer::default()));
            }
            Arc::new(builder.build()?)
        }
    };
    info!(bot = %config.bot, recognizer = %config.recognizer, "starting console session");

    repl::Repl::new(bot, config.conversation_id, &config.user_name)
        .run()
        .await
}
