use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{Clock, GeminiConfig, GeminiQuestionSource, QuestionSource, QuizLoopService};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingApiKey,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingApiKey => {
                write!(f, "GEMINI_API_KEY is not set (see --help)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--model <name>] [--base-url <url>]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GEMINI_API_KEY    (required) API key for the Gemini service");
    eprintln!("  QUIZ_AI_BASE_URL  override the Gemini API base URL");
    eprintln!("  QUIZ_AI_MODEL     override the model name");
}

fn parse_config(args: &mut impl Iterator<Item = String>) -> Result<GeminiConfig, ArgsError> {
    let mut config = GeminiConfig::from_env().ok_or(ArgsError::MissingApiKey)?;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--model" => {
                config.model = require_value(args, "--model")?;
            }
            "--base-url" => {
                config.base_url = require_value(args, "--base-url")?;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    Ok(config)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before reading config; missing file is fine.
    let _ = dotenvy::dotenv();
    pretty_env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = parse_config(&mut args).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    log::info!("starting GrammarMaster (model: {})", config.model);

    let source: Arc<dyn QuestionSource> = Arc::new(GeminiQuestionSource::new(config));
    let quiz_loop = Arc::new(QuizLoopService::new(Clock::default_clock(), source));

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { quiz_loop });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("GrammarMaster")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
