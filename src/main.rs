use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use sentdrill::app::App;
use sentdrill::config::{Config, LOCALES};
use sentdrill::event::{AppEvent, EventHandler};
use sentdrill::session::mode::PracticeMode;
use sentdrill::ui::components::answer_field::AnswerField;
use sentdrill::ui::components::feedback::FeedbackBanner;
use sentdrill::ui::components::mode_tabs::ModeTabs;
use sentdrill::ui::components::progress_bar::ProgressBar;
use sentdrill::ui::components::sentence_card::{SentenceCard, prompt};
use sentdrill::ui::components::stats_sidebar::StatsSidebar;
use sentdrill::ui::components::token_board::TokenBoard;
use sentdrill::ui::layout::{AppLayout, pack_hint_lines, wrapped_line_count};
use sentdrill::{logging, store};

#[derive(Parser)]
#[command(
    name = "sentdrill",
    version,
    about = "Terminal sentence-reconstruction drill for language learners"
)]
struct Cli {
    #[arg(short, long, value_enum, help = "Practice mode to start in")]
    mode: Option<PracticeMode>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Interface language (en, zh-CN)")]
    locale: Option<String>,

    #[arg(long, help = "Turn text-to-speech off")]
    no_speech: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match logging::init(&store::data_dir()) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            None
        }
    };

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config unreadable, using defaults");
        Config::default()
    });
    if let Some(mode) = cli.mode {
        config.default_mode = mode;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if cli.no_speech {
        config.speech_enabled = false;
    }
    config.validate(LOCALES);
    rust_i18n::set_locale(&config.locale);
    tracing::info!(
        mode = %config.default_mode,
        locale = %config.locale,
        theme = %config.theme,
        gap_policy = config.gap_policy.as_str(),
        "starting"
    );

    let mut app = App::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    // Without this, Ctrl-letter chords and Esc can arrive ambiguously.
    let keyboard_enhanced = execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    )
    .is_ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(200));

    let result = run_app(&mut terminal, &mut app, &events);

    if keyboard_enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "exited with error");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Paste(text) => app.paste(&text),
            AppEvent::Tick => app.tick(),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Repeats would pick several chips from one long press
    if key.kind != KeyEventKind::Press {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        KeyCode::Char('n') if ctrl => app.next_sentence(),
        KeyCode::PageDown => app.next_sentence(),
        KeyCode::Char('r') if ctrl => app.speak(),
        KeyCode::F(6) => app.speak(),
        KeyCode::Tab => app.cycle_mode(true),
        KeyCode::BackTab => app.cycle_mode(false),
        KeyCode::F(n @ 1..=5) => app.select_mode(PracticeMode::ALL[usize::from(n) - 1]),
        _ if app.mode().uses_tokens() => handle_token_key(app, key),
        _ => {
            if !app.handle_text_key(key) {
                app.should_quit = true;
            }
        }
    }
}

fn handle_token_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Enter => app.submit(),
        KeyCode::Left | KeyCode::Char('h') => app.move_token_cursor(false),
        KeyCode::Right | KeyCode::Char('l') => app.move_token_cursor(true),
        KeyCode::Char(' ') => app.activate_token(),
        KeyCode::Char(d @ '1'..='9') => {
            let slot = d as usize - '1' as usize;
            app.activate_slot(slot);
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let hints = app.hints();
    let hint_refs: Vec<&str> = hints.iter().map(String::as_str).collect();
    let hint_lines = pack_hint_lines(&hint_refs, usize::from(area.width));
    let app_layout = AppLayout::new(area, hint_lines.len() as u16);

    frame.render_widget(
        ModeTabs::new(app.mode(), app.totals_line(), app.theme),
        app_layout.tabs,
    );

    let item = app.current();
    let feedback = FeedbackBanner::new(
        app.session.feedback.as_ref(),
        app.notice.as_deref(),
        app.theme,
    );

    // Card height: source, spacer, prompt and the optional target line, plus borders.
    let card_width = usize::from(app_layout.main.width.saturating_sub(2));
    let mut card_lines = wrapped_line_count(&item.source_text, card_width)
        + 1
        + wrapped_line_count(&prompt(app.mode()), card_width);
    if matches!(app.mode(), PracticeMode::Gap | PracticeMode::Dictation) {
        card_lines += wrapped_line_count(&item.target_text, card_width);
    }

    let practice_height = if app.mode().uses_tokens() {
        Constraint::Min(6)
    } else {
        Constraint::Length(3)
    };
    let mut constraints = vec![
        Constraint::Length(card_lines as u16 + 2),
        practice_height,
        Constraint::Length(feedback.height()),
    ];
    let show_progress = app_layout.tier.show_progress_bar(area.height);
    if show_progress {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(0));

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(app_layout.main);

    frame.render_widget(
        SentenceCard::new(item, &app.session, app.theme),
        main_layout[0],
    );
    if app.mode().uses_tokens() {
        frame.render_widget(
            TokenBoard::new(&app.session.surface, app.token_cursor, app.theme),
            main_layout[1],
        );
    } else {
        frame.render_widget(AnswerField::new(&app.line_input, app.theme), main_layout[1]);
    }
    frame.render_widget(feedback, main_layout[2]);
    if show_progress {
        frame.render_widget(
            ProgressBar::new(app.session.index, app.bank.size(), app.theme),
            main_layout[3],
        );
    }

    if let Some(sidebar_area) = app_layout.sidebar {
        frame.render_widget(
            StatsSidebar::new(&app.bank, &app.stats, app.session.index, app.theme),
            sidebar_area,
        );
    }

    let status = Paragraph::new(Line::from(Span::styled(
        format!(" {}", app.status_line()),
        Style::default().fg(colors.accent()),
    )));
    frame.render_widget(status, app_layout.status);

    let footer_lines: Vec<Line> = hint_lines
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.muted()))))
        .collect();
    frame.render_widget(Paragraph::new(footer_lines), app_layout.footer);
}
