//! Wiring & DI. Entry point: load config, build the session, run the chosen front end.
//! No business logic here; macro rules live in the domain and MacroSession.

use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use macro_forge::adapters::draft::MacroDraft;
use macro_forge::adapters::ui::{ConsoleNotifier, TuiInputPort};
use macro_forge::domain::{BotLink, CascadePolicy};
use macro_forge::ports::{InputPort, ModelObserver};
use macro_forge::shared::config::AppConfig;
use macro_forge::usecases::MacroSession;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "macro-forge", version, about = "Build FernieX bot macros and their install links")]
struct Cli {
    /// Bot deep-link base (overrides MACRO_FORGE_BOT_URL)
    #[arg(long, global = true)]
    bot_url: Option<String>,

    /// How placeholders are re-checked when a top query is removed
    #[arg(long, global = true, value_enum)]
    cascade: Option<CascadeArg>,

    /// Skip the startup banner
    #[arg(long, global = true)]
    no_banner: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive builder (default)
    Interactive,
    /// Validate a JSON draft and print its install link
    Build {
        #[arg(long)]
        draft: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CascadeArg {
    Any,
    PositionAware,
}

impl From<CascadeArg> for CascadePolicy {
    fn from(arg: CascadeArg) -> Self {
        match arg {
            CascadeArg::Any => CascadePolicy::AnyEnabler,
            CascadeArg::PositionAware => CascadePolicy::PositionAware,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    let cli = Cli::parse();
    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => anyhow::bail!("invalid configuration: {e}. Check MACRO_FORGE_* variables and MACRO_FORGE_CONFIG"),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cfg.log_filter_or_default().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    let bot_url = cli
        .bot_url
        .clone()
        .unwrap_or_else(|| cfg.bot_url_or_default().to_string());
    let bot = match BotLink::parse(&bot_url) {
        Ok(bot) => bot,
        Err(e) => anyhow::bail!("{e}. Set MACRO_FORGE_BOT_URL or --bot-url to the bot's t.me link"),
    };
    let policy = cli
        .cascade
        .map(CascadePolicy::from)
        .unwrap_or_else(|| cfg.cascade_policy_or_default());
    info!(bot = %bot.as_str(), ?policy, "session configured");

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => {
            if !cli.no_banner && cfg.show_banner_or_default() {
                macro_forge::adapters::ui::init_ui(bot.as_str());
            } else {
                macro_forge::adapters::ui::tui::apply_theme();
            }
            let notifier: Arc<dyn ModelObserver> = Arc::new(ConsoleNotifier::new());
            let session = MacroSession::new(bot, policy).with_observer(notifier);
            let mut input_port = TuiInputPort::new(session);
            input_port
                .run()
                .map_err(|e| anyhow::anyhow!("{}", e))?;
        }
        Command::Build { draft } => {
            let draft = MacroDraft::load(&draft).map_err(|e| anyhow::anyhow!("{}", e))?;
            let mut session = MacroSession::new(bot, policy);
            draft
                .apply(&mut session)
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            let link = session
                .create_macro()
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            info!(command = %link.command(), actions = link.action_count, "draft encoded");
            println!("{}", link.url);
        }
    }

    Ok(())
}
