use crate::config::config::Config;
use crate::driver::Driver;
use crate::ui::actions::Action;
use crate::ui::key_dispatcher::KeyDispatcher;
use crate::utils::logging::LogRingBuffer;
use crate::widgets::bar_chart_widget::BarChartWidget;
use crate::widgets::help_widget::HelpWidget;
use crate::widgets::log_widget::LogWidget;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Upper bound on how long the loop waits for input
const MAX_POLL: Duration = Duration::from_millis(250);
const MIN_INTERVAL_MS: u64 = 10;
const MAX_INTERVAL_MS: u64 = 5000;

/// The terminal front end: key handling, layout and the poll loop that
/// feeds timer ticks to the driver
pub struct SortTui {
    driver: Driver<BarChartWidget>,
    dispatcher: KeyDispatcher,
    help: HelpWidget,
    log: LogWidget,
    config: Config,
    interval_ms: u64,
    show_help: bool,
    show_log: bool,
    should_quit: bool,
}

impl SortTui {
    pub fn new(driver: Driver<BarChartWidget>, config: Config, log_buffer: LogRingBuffer) -> Self {
        let dispatcher = KeyDispatcher::new();
        let help = HelpWidget::new(dispatcher.help_entries());
        Self {
            driver,
            dispatcher,
            help,
            log: LogWidget::new(log_buffer),
            interval_ms: config.auto.interval_ms,
            show_help: false,
            show_log: config.display.show_log_panel,
            should_quit: false,
            config,
        }
    }

    pub fn driver(&self) -> &Driver<BarChartWidget> {
        &self.driver
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    /// Main run loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        if self.config.behavior.auto_start {
            self.apply_action(Action::ToggleAuto);
        }

        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            let timeout = self
                .driver
                .time_until_tick(Instant::now())
                .map_or(MAX_POLL, |wait| wait.min(MAX_POLL));

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key_event(key);
                }
            }

            self.driver.tick(Instant::now());
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Some(action) = self.dispatcher.dispatch(&key) {
            self.apply_action(action);
        }
    }

    pub fn apply_action(&mut self, action: Action) {
        if self.show_help && !action.allowed_in_help() {
            debug!(target: "ui", "Ignoring {:?} while help is open", action);
            return;
        }

        match action {
            Action::Step => {
                self.driver.manual_step();
            }
            Action::ToggleAuto => {
                if !self.driver.stop_auto() {
                    self.driver
                        .start_auto(Duration::from_millis(self.interval_ms));
                }
            }
            Action::FasterAuto => self.change_interval(-(self.config.auto.interval_step_ms as i64)),
            Action::SlowerAuto => self.change_interval(self.config.auto.interval_step_ms as i64),
            Action::Reset => self.driver.reset(),
            Action::Generate => {
                let seq = &self.config.sequence;
                self.driver.regenerate(seq.size, seq.min, seq.max);
            }
            Action::SelectAlgorithm(algorithm) => self.driver.select_algorithm(algorithm),
            Action::NextAlgorithm => {
                let next = self.driver.algorithm().next();
                self.driver.select_algorithm(next);
            }
            Action::ToggleValues => self.driver.presenter_mut().toggle_values(),
            Action::ToggleLog => self.show_log = !self.show_log,
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Quit => {
                info!(target: "ui", "Quit requested");
                self.should_quit = true;
            }
        }
    }

    fn change_interval(&mut self, delta_ms: i64) {
        let updated = (self.interval_ms as i64 + delta_ms)
            .clamp(MIN_INTERVAL_MS as i64, MAX_INTERVAL_MS as i64) as u64;
        if updated == self.interval_ms {
            return;
        }
        self.interval_ms = updated;
        debug!(target: "ui", "Auto interval now {}ms", updated);
        self.driver
            .set_auto_interval(Duration::from_millis(updated), Instant::now());
    }

    pub fn status_line(&self) -> String {
        let auto = if self.driver.is_auto_running() {
            format!("auto {}ms", self.interval_ms)
        } else {
            format!("paused ({}ms)", self.interval_ms)
        };
        let state = if self.driver.is_complete() {
            "sorted"
        } else {
            "sorting"
        };
        format!(
            " {} | {} | steps: {} | {} | ? for help ",
            self.driver.algorithm(),
            state,
            self.driver.steps_taken(),
            auto
        )
    }

    fn draw(&self, f: &mut Frame) {
        let mut constraints = vec![Constraint::Min(5)];
        if self.show_log {
            constraints.push(Constraint::Length(10));
        }
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(f.area());

        let title = format!(" {} sort ", self.driver.algorithm());
        self.driver.presenter().draw(f, chunks[0], &title);

        if self.show_log {
            self.log.draw(f, chunks[1]);
        }

        let status_color = if self.driver.is_complete() {
            Color::Green
        } else {
            Color::White
        };
        let status = Paragraph::new(self.status_line())
            .style(Style::default().fg(status_color).bg(Color::DarkGray));
        f.render_widget(status, chunks[chunks.len() - 1]);

        if self.show_help {
            self.help.draw(f, f.area());
        }
    }
}

/// Set up the terminal, run the app and always restore the terminal
pub fn run_tui(mut app: SortTui) -> Result<()> {
    enable_raw_mode()
        .map_err(|e| anyhow::anyhow!("Failed to enable raw mode: {}. Try --headless.", e))?;

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(anyhow::anyhow!("Failed to setup terminal: {}", e));
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(anyhow::anyhow!("Failed to create terminal: {}", e));
        }
    };

    let res = app.run(&mut terminal);

    // Always restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.map_err(|e| anyhow::anyhow!("TUI error: {}", e))
}
