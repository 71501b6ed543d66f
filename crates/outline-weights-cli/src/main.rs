mod view;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use outline_weights_config::{Config, DialectName};
use outline_weights_engine::outline::folding;
use outline_weights_engine::weights::mode;
use outline_weights_engine::{
    Cmd, Document, Editor, IoError, Outline, WeightsSession, dialect_for, io,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

struct Args {
    path: PathBuf,
    print: bool,
    config: Option<String>,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} [--print] [--config <path>] <file>");
    process::exit(1);
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("outline-weights");

    let mut path = None;
    let mut print = false;
    let mut config = None;
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--print" => print = true,
            "--config" => match rest.next() {
                Some(value) => config = Some(value.clone()),
                None => usage(program),
            },
            flag if flag.starts_with("--") => usage(program),
            file if path.is_none() => path = Some(PathBuf::from(file)),
            _ => usage(program),
        }
    }

    match path {
        Some(path) => Args {
            path,
            print,
            config,
        },
        None => usage(program),
    }
}

struct App {
    path: PathBuf,
    editor: Editor,
    config: Config,
    dialect: DialectName,
    status: String,
    dirty: bool,
    scroll: usize,
}

impl App {
    fn new(path: PathBuf, config: Config) -> Result<Self> {
        let document = match io::read_document(&path) {
            Ok(document) => document,
            Err(IoError::NotFound(_)) => Document::from_bytes(b"")?,
            Err(e) => return Err(e.into()),
        };
        let dialect = config.dialect_for(&path);
        let mut editor = Editor::new(document);
        let status = mode::enable(&mut editor, dialect, &config.weights).to_string();
        log::info!("opened {} as {:?}", path.display(), dialect);

        Ok(Self {
            path,
            editor,
            config,
            dialect,
            status,
            dirty: false,
            scroll: 0,
        })
    }

    fn text(&self) -> String {
        self.editor.document().text()
    }

    fn move_left(&mut self) {
        let point = self.editor.document().point();
        if let Some(pos) = view::step_left(&self.text(), point) {
            self.editor.move_point(pos);
        }
    }

    fn move_right(&mut self) {
        let point = self.editor.document().point();
        if let Some(pos) = view::step_right(&self.text(), point) {
            self.editor.move_point(pos);
        }
    }

    /// Move to the nearest visible line above (`up`) or below, keeping the
    /// byte column where the target line is long enough.
    fn move_vertical(&mut self, up: bool) {
        let doc = self.editor.document();
        let point = doc.point();
        let line = doc.line_of_offset(point);
        let column = point - doc.offset_of_line(line);
        let last = doc.line_count() - 1;

        let mut target = line;
        loop {
            target = match (up, target) {
                (true, 0) => return,
                (true, t) => t - 1,
                (false, t) if t >= last => return,
                (false, t) => t + 1,
            };
            if !doc.is_hidden(doc.offset_of_line(target)) {
                break;
            }
        }

        let start = doc.offset_of_line(target);
        let target_text = doc.line_text(target);
        let mut column = column.min(target_text.len());
        while !target_text.is_char_boundary(column) {
            column -= 1;
        }
        self.editor.move_point(start + column);
    }

    fn move_to_line_edge(&mut self, end: bool) {
        let doc = self.editor.document();
        let point = doc.point();
        let pos = if end {
            doc.line_end(point)
        } else {
            doc.line_start(point)
        };
        self.editor.move_point(pos);
    }

    fn insert(&mut self, text: &str) {
        let at = self.editor.document().point();
        self.editor.apply(Cmd::InsertText {
            at,
            text: text.to_string(),
        });
        self.dirty = true;
    }

    fn backspace(&mut self) {
        let point = self.editor.document().point();
        if let Some(pos) = view::step_left(&self.text(), point) {
            self.editor.apply(Cmd::DeleteRange { range: pos..point });
            self.dirty = true;
        }
    }

    /// Fold or unfold the subtree of the heading on the cursor line, then
    /// redo the weights so hidden-line counts match what is shown.
    fn toggle_fold(&mut self) {
        let dialect = dialect_for(self.dialect);
        let point = self.editor.document().point();
        let Some(heading) = Outline::new(self.editor.document(), &*dialect).heading_at(point)
        else {
            self.status = "Not on a heading".to_string();
            return;
        };

        let folded = folding::toggle_subtree(self.editor.document_mut(), &*dialect, heading);
        self.status = if folded { "Folded" } else { "Unfolded" }.to_string();

        if let Some((session, doc)) = self.editor.hook_and_document_mut::<WeightsSession>() {
            session.activate(doc);
        }
    }

    fn toggle_weights(&mut self) {
        self.status = mode::toggle(&mut self.editor, self.dialect, &self.config.weights).to_string();
    }

    fn toggle_display(&mut self) {
        self.status =
            mode::toggle_display(&mut self.editor, self.dialect, &self.config.weights).to_string();
    }

    fn save(&mut self) {
        self.status = match io::write_document(&self.path, self.editor.document()) {
            Ok(()) => {
                self.dirty = false;
                format!("Wrote {}", self.path.display())
            }
            Err(e) => {
                log::error!("save failed: {e}");
                format!("Save failed: {e}")
            }
        };
    }

    /// Returns false when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => return false,
                KeyCode::Char('s') => self.save(),
                KeyCode::Char('w') => self.toggle_weights(),
                KeyCode::Char('t') => self.toggle_display(),
                _ => {}
            }
            return true;
        }

        match key.code {
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Up => self.move_vertical(true),
            KeyCode::Down => self.move_vertical(false),
            KeyCode::Home => self.move_to_line_edge(false),
            KeyCode::End => self.move_to_line_edge(true),
            KeyCode::Tab => self.toggle_fold(),
            KeyCode::Enter => self.insert("\n"),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            _ => {}
        }
        true
    }
}

fn main() -> Result<()> {
    let args = parse_args();

    // Logs go to stderr, which the TUI shares with the alternate screen
    let level = if args.print {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let config = match Config::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Default location is {}", Config::config_path().display());
            process::exit(1);
        }
    };

    let mut app = match App::new(args.path.clone(), config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: Could not open '{}': {e}", args.path.display());
            process::exit(1);
        }
    };

    if args.print {
        print!("{}", view::annotated_text(&app.editor));
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.handle_key(key)
        {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)].as_ref())
        .split(f.area());

    let lines = view::visible_lines(&app.editor);
    let doc = app.editor.document();
    let point = doc.point();
    let point_line = doc.line_of_offset(point);
    let cursor_row = lines.iter().position(|l| l.line == point_line).unwrap_or(0);

    // Keep the cursor row inside the bordered area
    let height = chunks[0].height.saturating_sub(2) as usize;
    if cursor_row < app.scroll {
        app.scroll = cursor_row;
    } else if height > 0 && cursor_row >= app.scroll + height {
        app.scroll = cursor_row + 1 - height;
    }

    let decoration_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);
    let content: Vec<Line> = lines
        .iter()
        .skip(app.scroll)
        .take(height.max(1))
        .map(|l| {
            let mut spans = Vec::new();
            let mut from = 0;
            for (column, text) in &l.decorations {
                spans.push(Span::raw(l.text[from..*column].to_string()));
                spans.push(Span::styled(text.clone(), decoration_style));
                from = *column;
            }
            spans.push(Span::raw(l.text[from..].to_string()));
            if l.folded {
                spans.push(Span::styled(view::FOLD_MARKER, decoration_style));
            }
            Line::from(spans)
        })
        .collect();

    let title = format!(
        "{}{}",
        app.path.display(),
        if app.dirty { " [+]" } else { "" }
    );
    let editor_view = Paragraph::new(content).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(editor_view, chunks[0]);

    // Cursor column counts characters, including decorations drawn before it
    if let Some(line) = lines.get(cursor_row) {
        let x = chunks[0].x + 1 + line.cursor_column(point) as u16;
        let y = chunks[0].y + 1 + (cursor_row - app.scroll) as u16;
        f.set_cursor_position(Position::new(x, y));
    }

    let status = Paragraph::new(Line::from(Span::styled(
        app.status.clone(),
        Style::default().fg(Color::Yellow),
    )));
    f.render_widget(status, chunks[1]);

    let help_text = Line::from(vec![
        Span::raw("^Q: Quit | "),
        Span::raw("^S: Save | "),
        Span::raw("^W: Weights on/off | "),
        Span::raw("^T: Weights/hidden lines | "),
        Span::raw("Tab: Fold"),
    ]);
    f.render_widget(Paragraph::new(vec![help_text]), chunks[2]);
}
