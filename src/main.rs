use clap::Parser;
use cmdtree::commands::Dispatcher;
use cmdtree::config::{self, ConfigError, ShellConfig};
use cmdtree::inventory::SharedInventory;
use cmdtree::shell::{Session, build_shell};
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use reedline::{
    ColumnarMenu, Completer, DefaultPrompt, DefaultPromptSegment, Emacs, KeyCode, KeyModifiers,
    MenuBuilder, Reedline, ReedlineEvent, ReedlineMenu, Signal, Span, Suggestion,
    default_emacs_keybindings,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "cmdtree", about = "Interactive shell over a command tree")]
struct Args {
    /// Config file (defaults to ~/.config/cmdtree.json)
    #[arg(long, env = "CMDTREE_CONFIG")]
    config: Option<PathBuf>,

    /// Name the commands run as
    #[arg(long, default_value = "player")]
    user: String,
}

/// Feeds dispatcher completions to reedline.
struct TreeCompleter {
    dispatcher: Arc<Dispatcher<Session>>,
    session: Arc<Session>,
}

impl Completer for TreeCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line = &line[..pos];
        let mut tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if line.is_empty() || line.ends_with(char::is_whitespace) {
            tokens.push(String::new());
        }
        let start = pos - tokens.last().map(String::len).unwrap_or(0);

        self.dispatcher
            .complete(&self.session, &tokens)
            .into_iter()
            .map(|value| Suggestion {
                value,
                span: Span::new(start, pos),
                append_whitespace: true,
                ..Default::default()
            })
            .collect()
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let shell_config = load_shell_config(args.config.as_deref());

    let store = SharedInventory::default();
    let dispatcher = match build_shell(&shell_config, &store) {
        Ok(dispatcher) => Arc::new(dispatcher),
        Err(e) => {
            print_colored_message(&format!("Failed to build commands: {e}\n"), Color::Red);
            return ExitCode::FAILURE;
        }
    };
    let session = Arc::new(Session::new(args.user));

    let completer = Box::new(TreeCompleter {
        dispatcher: dispatcher.clone(),
        session: session.clone(),
    });
    let completion_menu = Box::new(ColumnarMenu::default().with_name("completion_menu"));
    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );

    let mut rl = Reedline::create()
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic(shell_config.prompt().to_string()),
        DefaultPromptSegment::Empty,
    );

    print_colored_message("Type help for commands, quit to exit.\n", Color::DarkMagenta);

    loop {
        let line = match rl.read_line(&prompt) {
            Ok(Signal::Success(input)) => input.trim().to_string(),
            Ok(Signal::CtrlD) | Ok(Signal::CtrlC) | Err(_) => break,
        };

        if line.is_empty() {
            continue;
        }

        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        match dispatcher.dispatch(&session, &tokens) {
            Ok(()) => {
                let output = session.take_output();
                if !output.is_empty() {
                    print_colored_message(&format!("{}\n", output.join("\n")), Color::Green);
                }
            }
            Err(e) => print_colored_message(&format!("{e}. Type help.\n"), Color::DarkYellow),
        }

        if session.should_quit() {
            break;
        }
    }

    ExitCode::SUCCESS
}

fn load_shell_config(path: Option<&std::path::Path>) -> ShellConfig {
    let loaded = match path {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    match loaded {
        Ok(cfg) => cfg,
        Err(ConfigError::NotFound(path)) => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            ShellConfig::default()
        }
        Err(e) => {
            print_colored_message(&format!("Warning: {e}\nUsing defaults.\n"), Color::DarkYellow);
            ShellConfig::default()
        }
    }
}

fn print_colored_message(message: &str, color: Color) {
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        SetForegroundColor(color),
        Print(message),
        ResetColor
    );
}
