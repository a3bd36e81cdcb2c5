//! Full-screen chart viewer: draw loop, key handling, terminal setup.

use std::io::{self, stdout};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};

use stocklab_core::ChartData;

use crate::charts;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartView {
    Values,
    Comparison,
}

impl ChartView {
    pub fn next(self) -> Self {
        match self {
            Self::Values => Self::Comparison,
            Self::Comparison => Self::Values,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Values => "Values",
            Self::Comparison => "Investment vs Value",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewerState {
    pub data: ChartData,
    pub view: ChartView,
    pub running: bool,
    pub theme: Theme,
}

impl ViewerState {
    pub fn new(data: ChartData) -> Self {
        Self {
            data,
            view: ChartView::Values,
            running: true,
            theme: Theme::default(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Windows reports both press and release.
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => self.running = false,
            KeyCode::Char('1') => self.view = ChartView::Values,
            KeyCode::Char('2') => self.view = ChartView::Comparison,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.view = self.view.next()
            }
            _ => {}
        }
    }
}

pub fn draw(f: &mut Frame, state: &ViewerState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    match state.view {
        ChartView::Values => charts::render_values(f, chunks[0], &state.data, &state.theme),
        ChartView::Comparison => charts::render_comparison(f, chunks[0], &state.data, &state.theme),
    }

    let hint = Line::from(vec![
        Span::styled(format!(" {} ", state.view.label()), state.theme.title_style()),
        Span::styled(
            " 1/2 or Tab switch chart · q/Esc/Enter close",
            state.theme.muted_style(),
        ),
    ]);
    f.render_widget(Paragraph::new(hint), chunks[1]);
}

/// Show the charts until the user closes the viewer, restoring the terminal
/// afterwards even if drawing fails.
pub fn run(data: ChartData) -> Result<()> {
    tracing::debug!(stocks = data.value_bars.len(), "opening chart viewer");
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut state = ViewerState::new(data);
    let result = event_loop(&mut terminal, &mut state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut ViewerState,
) -> Result<()> {
    while state.running {
        terminal.draw(|f| draw(f, state))?;
        if let Event::Key(key) = event::read()? {
            state.handle_key(key);
        }
    }
    Ok(())
}
