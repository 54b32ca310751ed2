use crate::color::Color;
use crate::game::{ColorGame, Difficulty, Event, GameState, SURFACE_COUNT};
use crate::record::{RecordEvent, Recorder};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

type Terminal = ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>;
type Frame<'a> = ratatui::Frame<'a, ratatui::backend::CrosstermBackend<std::io::Stdout>>;

const GRID_COLUMNS: usize = 3;

pub struct App {
    terminal: Terminal,
    game: ColorGame,
    recorder: Option<Recorder>,
    ui: UiState,
}

impl App {
    pub fn new(game: ColorGame, recorder: Option<Recorder>) -> anyhow::Result<Self> {
        let terminal = Self::setup_terminal()?;
        log::debug!("setup terminal");
        let mut this = Self {
            terminal,
            game,
            recorder,
            ui: UiState::default(),
        };
        this.record_reset()?;
        Ok(this)
    }

    pub fn run(mut self) -> anyhow::Result<()> {
        self.render_ui()?;
        loop {
            if self.handle_event()? {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        Ok(())
    }

    fn handle_event(&mut self) -> anyhow::Result<bool> {
        while crossterm::event::poll(std::time::Duration::from_secs(0))? {
            match crossterm::event::read()? {
                crossterm::event::Event::Key(key) => {
                    if self.handle_key_event(key)? {
                        return Ok(true);
                    }
                }
                crossterm::event::Event::Mouse(mouse) => {
                    self.handle_mouse_event(mouse)?;
                }
                crossterm::event::Event::Resize(_, _) => {
                    self.render_ui()?;
                }
                _ => {}
            }
        }
        Ok(false)
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
        if key.kind != KeyEventKind::Press {
            return Ok(false);
        }
        let event = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                return Ok(true);
            }
            KeyCode::Char(c @ '1'..='6') => Event::SurfaceClicked(c as usize - '1' as usize),
            KeyCode::Char('e') => Event::ModeClicked(Difficulty::Easy),
            KeyCode::Char('h') => Event::ModeClicked(Difficulty::Hard),
            KeyCode::Char('r') | KeyCode::Char(' ') => Event::ResetClicked,
            _ => {
                return Ok(false);
            }
        };
        self.dispatch(event)?;
        Ok(false)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> anyhow::Result<()> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(());
        }
        if let Some(event) = self.ui.hit_test(mouse.column, mouse.row) {
            self.dispatch(event)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, event: Event) -> anyhow::Result<()> {
        let shown = match event {
            Event::SurfaceClicked(i) => self.game.board().surfaces.get(i).copied().flatten(),
            _ => None,
        };
        let outcome = self.game.handle(event);
        match (event, shown, outcome) {
            (Event::SurfaceClicked(surface), Some(color), Some(outcome)) => {
                if let Some(recorder) = &mut self.recorder {
                    recorder.record(RecordEvent::Guess {
                        surface,
                        color,
                        outcome,
                    })?;
                }
            }
            (Event::ModeClicked(_) | Event::ResetClicked, _, _) => {
                self.record_reset()?;
            }
            _ => {}
        }
        self.render_ui()
    }

    fn record_reset(&mut self) -> anyhow::Result<()> {
        if let Some(recorder) = &mut self.recorder {
            recorder.record(RecordEvent::Reset {
                difficulty: self.game.difficulty(),
                palette: self.game.palette().to_vec(),
                target: self.game.target(),
            })?;
        }
        Ok(())
    }

    fn render_ui(&mut self) -> anyhow::Result<()> {
        let game = &self.game;
        let ui = &mut self.ui;
        self.terminal.draw(|f| ui.render(f, game))?;
        Ok(())
    }

    fn setup_terminal() -> anyhow::Result<Terminal> {
        crossterm::terminal::enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        crossterm::execute!(
            stdout,
            crossterm::terminal::EnterAlternateScreen,
            crossterm::event::EnableMouseCapture
        )?;
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let terminal = ratatui::Terminal::new(backend)?;
        Ok(terminal)
    }

    fn teardown_terminal(&mut self) -> anyhow::Result<()> {
        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(
            self.terminal.backend_mut(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = self.teardown_terminal() {
            log::warn!("failed to tear down terminal: {e}");
        } else {
            log::debug!("tear down terminal");
        }
    }
}

/// Screen areas from the last draw, used to map mouse clicks back to events.
#[derive(Debug, Default)]
struct UiState {
    surfaces: [Rect; SURFACE_COUNT],
    modes: [Rect; 2],
    reset: Rect,
}

impl UiState {
    fn hit_test(&self, x: u16, y: u16) -> Option<Event> {
        if let Some(i) = self.surfaces.iter().position(|r| contains(*r, x, y)) {
            return Some(Event::SurfaceClicked(i));
        }
        if let Some(i) = self.modes.iter().position(|r| contains(*r, x, y)) {
            return Some(Event::ModeClicked(Difficulty::ALL[i]));
        }
        contains(self.reset, x, y).then_some(Event::ResetClicked)
    }

    fn render(&mut self, f: &mut Frame, game: &ColorGame) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(30)].as_ref())
            .split(f.size());
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(5),
                    Constraint::Length(3),
                    Constraint::Min(0),
                ]
                .as_ref(),
            )
            .split(chunks[0]);

        self.render_header(f, main_chunks[0], game);
        self.render_controls(f, main_chunks[1], game);
        self.render_surfaces(f, main_chunks[2], game);
        self.render_side(f, chunks[1], game);
    }

    fn render_header(&mut self, f: &mut Frame, area: Rect, game: &ColorGame) {
        let board = game.board();
        let style = Style::default()
            .bg(board.header_accent.into())
            .fg(board.header_accent.contrast().into());
        let paragraph = Paragraph::new(vec![
            Line::from("The Great"),
            Line::from(Span::styled(
                board.header.to_uppercase(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("Guessing Game"),
        ])
        .style(style)
        .block(Block::default().style(style))
        .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }

    fn render_controls(&mut self, f: &mut Frame, area: Rect, game: &ColorGame) {
        let board = game.board();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(
                [
                    Constraint::Length(16),
                    Constraint::Min(0),
                    Constraint::Length(13),
                    Constraint::Length(13),
                ]
                .as_ref(),
            )
            .split(area);

        self.reset = chunks[0];
        let paragraph = Paragraph::new(Line::from(board.reset_label.text().to_uppercase()))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, chunks[0]);

        let paragraph = Paragraph::new(Line::from(board.message.text()))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, chunks[1]);

        for (i, mode) in Difficulty::ALL.into_iter().enumerate() {
            let area = chunks[2 + i];
            self.modes[i] = area;
            let style = if board.selected_mode == mode {
                Style::default()
                    .bg(crate::color::HEADER_ACCENT.into())
                    .fg(ratatui::style::Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let paragraph = Paragraph::new(Line::from(mode.label().to_uppercase()))
                .style(style)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center);
            f.render_widget(paragraph, area);
        }
    }

    fn render_surfaces(&mut self, f: &mut Frame, area: Rect, game: &ColorGame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)].as_ref())
            .split(area);
        let board = game.board();
        for (row_index, row) in rows.iter().enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 3); GRID_COLUMNS].as_ref())
                .split(row.inner(&ratatui::layout::Margin {
                    horizontal: 1,
                    vertical: 0,
                }));
            for (column, cell) in cells.iter().enumerate() {
                let i = row_index * GRID_COLUMNS + column;
                let area = cell.inner(&ratatui::layout::Margin {
                    horizontal: 1,
                    vertical: 1,
                });
                match board.surfaces[i] {
                    Some(color) => {
                        self.surfaces[i] = area;
                        f.render_widget(swatch(i, color), area);
                    }
                    None => {
                        self.surfaces[i] = Rect::default();
                    }
                }
            }
        }
    }

    fn render_side(&mut self, f: &mut Frame, area: Rect, game: &ColorGame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(0)].as_ref())
            .split(area);

        let score = game.score();
        let mut lines = score
            .iter()
            .map(|(k, v)| Line::from(format!("{k:<8}{v:>10}")))
            .collect::<Vec<_>>();
        if game.state() == GameState::Won {
            lines.push(Line::from(Span::styled(
                "solved",
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        let paragraph = Paragraph::new(lines)
            .block(self.make_block("Score"))
            .alignment(Alignment::Left);
        f.render_widget(paragraph, chunks[0]);

        let paragraph = Paragraph::new(vec![
            Line::from("Guess:      '1'..'6' / click"),
            Line::from("Easy mode:  'e' key"),
            Line::from("Hard mode:  'h' key"),
            Line::from("New colors: 'r' / SPACE"),
            Line::from("Quit:       'q' key"),
        ])
        .block(self.make_block("Help"))
        .alignment(Alignment::Left);
        f.render_widget(paragraph, chunks[1]);
    }

    fn make_block(&self, name: &str) -> Block<'static> {
        Block::default().borders(Borders::ALL).title(Span::styled(
            name.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
    }
}

fn swatch(i: usize, color: Color) -> Paragraph<'static> {
    let style = Style::default()
        .bg(color.into())
        .fg(color.contrast().into());
    Paragraph::new(Line::from(format!("{}", i + 1))).style(style)
}

fn contains(r: Rect, x: u16, y: u16) -> bool {
    r.x <= x && x < r.x + r.width && r.y <= y && y < r.y + r.height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_maps_areas_to_events() {
        let mut ui = UiState::default();
        ui.surfaces[4] = Rect::new(10, 10, 5, 3);
        ui.modes[0] = Rect::new(40, 0, 13, 3);
        ui.modes[1] = Rect::new(53, 0, 13, 3);
        ui.reset = Rect::new(0, 0, 16, 3);

        assert_eq!(ui.hit_test(10, 10), Some(Event::SurfaceClicked(4)));
        assert_eq!(ui.hit_test(14, 12), Some(Event::SurfaceClicked(4)));
        assert_eq!(ui.hit_test(15, 12), None);
        assert_eq!(ui.hit_test(41, 1), Some(Event::ModeClicked(Difficulty::Easy)));
        assert_eq!(ui.hit_test(53, 2), Some(Event::ModeClicked(Difficulty::Hard)));
        assert_eq!(ui.hit_test(3, 1), Some(Event::ResetClicked));
    }

    #[test]
    fn empty_areas_never_match() {
        let ui = UiState::default();
        assert_eq!(ui.hit_test(0, 0), None);
    }
}
