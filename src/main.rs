use std::error::Error;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use homecontrol_bot::application::errors::ConfigError;
use homecontrol_bot::application::services::{CommandService, MessageService, VoiceService};
use homecontrol_bot::domain::traits::{Bot, HomeHost, SpeechToText};
use homecontrol_bot::infrastructure::adapters::{ConsoleAdapter, TelegramAdapter};
use homecontrol_bot::infrastructure::config::Config;
use homecontrol_bot::infrastructure::homeassistant::HomeAssistantClient;
use homecontrol_bot::infrastructure::transcription::WhisperTranscriber;

type AppResult = Result<(), Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "homecontrol-bot")]
#[command(about = "Control Home Assistant from a group chat", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Telegram bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Send one message to the group and exit
    Send {
        /// Message text
        message: String,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => run_bot(&cli.config, cli.token),
        Commands::Send { message } => send_once(&cli.config, cli.token, &message),
        Commands::Version => {
            println!("homecontrol-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(config_path: &str, token_override: Option<String>) -> Config {
    let mut config = if std::path::Path::new(config_path).exists() {
        match Config::load(config_path) {
            Ok(mut config) => {
                config.apply_env();
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::load_env()
            }
        }
    } else {
        Config::load_env()
    };

    if let Some(token) = token_override {
        if let Some(tg) = config.adapters.telegram.as_mut() {
            tg.token = Some(token);
            tg.enabled = true;
        } else {
            config.adapters.telegram = Some(homecontrol_bot::infrastructure::config::TelegramConfig {
                enabled: true,
                token: Some(token),
            });
        }
    }
    config
}

fn build_host(config: &Config) -> Result<Arc<HomeAssistantClient>, ConfigError> {
    let token = config
        .home_assistant
        .token
        .as_deref()
        .ok_or_else(|| ConfigError::MissingField("home-assistant.token".to_string()))?;
    tracing::info!("Using Home Assistant at {}", config.home_assistant.url);
    Ok(Arc::new(HomeAssistantClient::new(&config.home_assistant.url, token)))
}

/// Startup connectivity check; the bot keeps running if the host is down
async fn check_host(host: &HomeAssistantClient) {
    match host.ping().await {
        Ok(()) => tracing::info!("Connected to Home Assistant"),
        Err(e) => tracing::warn!("Home Assistant not reachable: {}", e),
    }
}

fn build_voice(config: &Config) -> VoiceService {
    match config.transcription_key() {
        Some(key) => {
            tracing::info!("Voice transcription enabled");
            let transcriber: Arc<dyn SpeechToText> = Arc::new(WhisperTranscriber::new(key));
            VoiceService::new(Some(transcriber))
        }
        None => {
            tracing::warn!("OpenAI API key not configured, voice messages will be rejected");
            VoiceService::new(None)
        }
    }
}

fn run_bot(config_path: &str, token_override: Option<String>) -> AppResult {
    let config = load_config(config_path, token_override);
    let host = build_host(&config)?;
    let voice = build_voice(&config);

    tracing::info!("Starting homecontrol-bot for group '{}'", config.homecontrol.group_name);
    if let Some(phone) = &config.homecontrol.phone {
        tracing::info!("Session identity hint: {}", phone);
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(check_host(&host));
    let commands = CommandService::new(host);
    rt.block_on(start_session(&config, commands, voice))
}

async fn start_session(config: &Config, commands: CommandService, voice: VoiceService) -> AppResult {
    let group_name = config.homecontrol.group_name.clone();
    if let Some(token) = config.telegram_token() {
        let mut bot = TelegramAdapter::new(token);
        bot.fetch_bot_info().await?;
        serve(MessageService::new(bot, commands, voice, group_name)).await
    } else {
        // Run console bot (dev mode)
        let bot = ConsoleAdapter::new(&group_name, config.homecontrol.phone.as_deref());
        serve(MessageService::new(bot, commands, voice, group_name)).await
    }
}

async fn serve<B: Bot>(service: MessageService<B>) -> AppResult {
    tokio::select! {
        result = service.run() => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("Received shutdown signal");
        }
    }
    tracing::info!("homecontrol-bot shutdown complete");
    Ok(())
}

/// The "send message" action: broadcast one message to the group
fn send_once(config_path: &str, token_override: Option<String>, message: &str) -> AppResult {
    let config = load_config(config_path, token_override);
    let host = build_host(&config)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(broadcast(&config, host, message))
}

async fn broadcast(config: &Config, host: Arc<dyn HomeHost>, message: &str) -> AppResult {
    let token = config
        .telegram_token()
        .ok_or_else(|| ConfigError::MissingField("adapters.telegram.token".to_string()))?;

    let mut bot = TelegramAdapter::new(token);
    bot.fetch_bot_info().await?;
    let service = MessageService::new(
        bot,
        CommandService::new(host),
        VoiceService::default(),
        config.homecontrol.group_name.clone(),
    );

    service.bot().start().await?;
    if !service.resolve_group().await {
        return Err(format!("Group '{}' not found", service.group_name()).into());
    }
    service.reply(message).await?;
    tracing::info!("Message sent to '{}'", service.group_name());
    Ok(())
}

fn init_config() -> AppResult {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config)?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
