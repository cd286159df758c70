use clap::{Arg, ArgAction, ArgMatches, Command};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use textbox_masked::config::{DemoConfig, parse_prompt_char};
use textbox_masked::logging;
use textbox_masked::terminal::{KeyCode, Terminal, TerminalEvent};
use textbox_masked::widgets::filters::{FilterKind, FilterRegistry};
use textbox_masked::widgets::inputs::masked::MaskedTextBox;
use textbox_masked::widgets::traits::{Drawable, Interactive, RenderContext};

const INPUT_ID: &str = "input";

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn cli() -> Command {
    Command::new("masked-demo")
        .about("Edit a single value through an input mask")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("YAML configuration file"),
        )
        .arg(Arg::new("mask").long("mask").short('m').help("Mask definition, e.g. 00/00/0000"))
        .arg(Arg::new("prompt").long("prompt").short('p').help("Prompt character"))
        .arg(
            Arg::new("filter")
                .long("filter")
                .short('f')
                .help("any, number, decimal, unumber or udecimal"),
        )
        .arg(Arg::new("text").long("text").help("Initial text"))
        .arg(Arg::new("label").long("label").help("Field label"))
        .arg(Arg::new("log-dir").long("log-dir").value_name("DIR"))
        .arg(
            Arg::new("read-only")
                .long("read-only")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .action(ArgAction::SetTrue)
                .help("Start in overwrite mode (toggle with Insert)"),
        )
}

fn load_config(matches: &ArgMatches) -> Result<DemoConfig, Box<dyn Error>> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => DemoConfig::load(&PathBuf::from(path))?,
        None => DemoConfig::default(),
    };

    if let Some(mask) = matches.get_one::<String>("mask") {
        config.input.mask = mask.clone();
    }
    if let Some(prompt) = matches.get_one::<String>("prompt") {
        config.input.prompt_char = parse_prompt_char(prompt)?;
    }
    if let Some(filter) = matches.get_one::<String>("filter") {
        config.input.filter = filter.parse::<FilterKind>()?;
    }
    if let Some(text) = matches.get_one::<String>("text") {
        config.input.text = text.clone();
    }
    if let Some(label) = matches.get_one::<String>("label") {
        config.label = label.clone();
    }
    if let Some(dir) = matches.get_one::<String>("log-dir") {
        config.log_dir = Some(PathBuf::from(dir));
    }
    config.input.read_only |= matches.get_flag("read-only");
    config.input.overwrite |= matches.get_flag("overwrite");
    Ok(config)
}

fn run() -> Result<(), Box<dyn Error>> {
    let matches = cli().get_matches();
    let config = load_config(&matches)?;
    let _log_guard = logging::init(config.log_dir.as_deref());

    let registry = Arc::new(FilterRegistry::standard());
    let mut input = MaskedTextBox::from_config(INPUT_ID, config.label.as_str(), &config.input, registry)?;
    tracing::info!(?config, "starting masked input demo");

    let mut terminal = Terminal::new()?;
    terminal.enter_raw_mode()?;
    let result = event_loop(&mut terminal, &mut input);
    let finished = terminal.finish();
    terminal.exit_raw_mode()?;
    finished?;

    if result? {
        println!("{}", input.value());
    }
    Ok(())
}

/// Returns `true` when the value was submitted, `false` when cancelled.
fn event_loop(terminal: &mut Terminal, input: &mut MaskedTextBox) -> Result<bool, Box<dyn Error>> {
    let mut render_requested = true;

    loop {
        if render_requested {
            let ctx = RenderContext {
                focused_id: Some(INPUT_ID.to_string()),
                terminal_size: terminal.size(),
            };
            let output = input.draw(&ctx);
            terminal.render(&output.lines, input.cursor_pos())?;
            render_requested = false;
        }

        if !terminal.poll(Duration::from_millis(100))? {
            continue;
        }
        match terminal.read_event()? {
            TerminalEvent::Key(key) => match key.code {
                KeyCode::Enter => return Ok(true),
                KeyCode::Esc => return Ok(false),
                _ => {
                    let result = input.on_key(key)?;
                    render_requested |= result.request_render;
                }
            },
            TerminalEvent::Resize(_) => render_requested = true,
        }
    }
}
