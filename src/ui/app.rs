use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ratatui::{backend::CrosstermBackend, widgets::ListState, Frame, Terminal};
use std::io;
use std::time::Duration;
use tracing::warn;

use super::components;
use super::events::{map_key, KeyAction};
use super::layout::DashboardLayout;
use super::map::render_map;
use super::state::{LoadingIndicator, LogLevel, TerminalView};
use crate::api::{FeedSource, HttpFeedClient};
use crate::controller::DashboardController;
use crate::models::{Config, DistrictId};
use crate::styling::RiskClass;
use crate::view::{MapView, ViewEvent};

const PAGE_SIZE: isize = 10;

/// One row of the sub-district list
#[derive(Debug, Clone)]
pub struct DistrictEntry {
    pub id: DistrictId,
    pub label: String,
    pub risk_class: RiskClass,
}

/// Terminal dashboard: a sub-district list drives hover and selection
pub struct DashboardApp {
    pub controller: DashboardController<TerminalView>,
    entries: Vec<DistrictEntry>,
    filtered: Vec<usize>,
    list_state: ListState,
    hovered: Option<DistrictId>,
    search: Option<String>,
    matcher: SkimMatcherV2,
    pub should_quit: bool,
}

impl DashboardApp {
    pub fn new(config: &Config) -> Self {
        Self {
            controller: DashboardController::new(TerminalView::new(config.export_dir.clone())),
            entries: Vec::new(),
            filtered: Vec::new(),
            list_state: ListState::default(),
            hovered: None,
            search: None,
            matcher: SkimMatcherV2::default(),
            should_quit: false,
        }
    }

    /// Load the feeds through the controller and build the list
    pub async fn load<S>(&mut self, source: &S) -> Result<()>
    where
        S: FeedSource + ?Sized,
    {
        self.controller.start(source).await;

        if let Some(data) = self.controller.data() {
            self.entries = data
                .districts
                .iter()
                .map(|d| DistrictEntry {
                    id: d.id,
                    label: if d.names.district.is_empty() {
                        d.names.sub_district.clone()
                    } else {
                        format!("{} · {}", d.names.sub_district, d.names.district)
                    },
                    risk_class: d.risk_class,
                })
                .collect();
            let count = self.entries.len();
            self.controller
                .view_mut()
                .log(LogLevel::Success, format!("Loaded {} sub-districts", count));
        }

        self.apply_filter();
        self.hover_cursor()
    }

    pub fn selected_id(&self) -> Option<DistrictId> {
        self.list_state
            .selected()
            .and_then(|i| self.filtered.get(i))
            .map(|&entry| self.entries[entry].id)
    }

    pub fn visible_entries(&self) -> Vec<&DistrictEntry> {
        self.filtered.iter().map(|&i| &self.entries[i]).collect()
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let area = f.area();
        let layout = DashboardLayout::new(area);
        let view = self.controller.view();

        components::render_summary(f, layout.header, view.summary.as_ref());

        let rows: Vec<(String, RiskClass)> = self
            .filtered
            .iter()
            .map(|&i| (self.entries[i].label.clone(), self.entries[i].risk_class))
            .collect();
        components::render_district_list(f, layout.district_list, &rows, &mut self.list_state, self.search.as_deref());

        render_map(f, layout.map, view);
        components::render_detail_panel(f, layout.detail, view);
        components::render_legend(f, layout.legend, view);
        components::render_status_bar(f, layout.status_bar, view.latest_log());

        match &view.indicator {
            LoadingIndicator::Loading => components::render_loading_indicator(f, area, "Loading data..."),
            LoadingIndicator::Error(message) => components::render_error(f, area, message),
            LoadingIndicator::Hidden => {}
        }
    }

    pub fn handle_key_event(&mut self, key: KeyCode) -> Result<()> {
        let Some(action) = map_key(key, self.search.is_some()) else {
            return Ok(());
        };

        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::MoveUp => self.move_cursor(-1)?,
            KeyAction::MoveDown => self.move_cursor(1)?,
            KeyAction::PageUp => self.move_cursor(-PAGE_SIZE)?,
            KeyAction::PageDown => self.move_cursor(PAGE_SIZE)?,
            KeyAction::Select => {
                if let Some(id) = self.selected_id() {
                    self.controller.handle_event(ViewEvent::Select(id))?;
                }
            }
            KeyAction::ClearSelection => self.clear_selection(),
            KeyAction::ToggleLayer(layer) => {
                let visible = !self.controller.is_layer_visible(layer);
                self.controller.handle_event(ViewEvent::LayerToggled { layer, visible })?;
                if self.controller.data().is_some() {
                    self.controller.view_mut().log(
                        LogLevel::Info,
                        format!("{} {}", layer.title(), if visible { "shown" } else { "hidden" }),
                    );
                }
            }
            KeyAction::Export => {
                if self.controller.data().is_none() {
                    self.controller
                        .view_mut()
                        .log(LogLevel::Warning, "Nothing to export until data has loaded");
                    return Ok(());
                }
                // The view already reports the failure in the status bar
                if let Err(e) = self.controller.handle_event(ViewEvent::ExportRequested) {
                    warn!("Export failed: {:#}", e);
                }
            }
            KeyAction::StartSearch => self.search = Some(String::new()),
            KeyAction::SearchInput(c) => {
                if let Some(query) = self.search.as_mut() {
                    query.push(c);
                }
                self.apply_filter();
                self.hover_cursor()?;
            }
            KeyAction::SearchBackspace => {
                if let Some(query) = self.search.as_mut() {
                    query.pop();
                }
                self.apply_filter();
                self.hover_cursor()?;
            }
            KeyAction::EndSearch => self.search = None,
        }
        Ok(())
    }

    fn move_cursor(&mut self, delta: isize) -> Result<()> {
        if self.filtered.is_empty() {
            return Ok(());
        }
        let last = self.filtered.len() as isize - 1;
        let current = self.list_state.selected().unwrap_or(0) as isize;
        self.list_state.select(Some((current + delta).clamp(0, last) as usize));
        self.hover_cursor()
    }

    /// Keep the hovered district in step with the list cursor
    fn hover_cursor(&mut self) -> Result<()> {
        let next = self.selected_id();
        if next == self.hovered {
            return Ok(());
        }
        if let Some(previous) = self.hovered.take() {
            self.controller.handle_event(ViewEvent::PointerLeave(previous))?;
        }
        if let Some(id) = next {
            self.controller.handle_event(ViewEvent::PointerEnter(id))?;
        }
        self.hovered = next;
        Ok(())
    }

    fn clear_selection(&mut self) {
        let bounds = self.controller.data().and_then(|data| data.district_bounds());
        let view = self.controller.view_mut();
        view.detail = None;
        if let Some(bounds) = bounds {
            view.fit_bounds(bounds);
        }
    }

    /// Narrow the list to fuzzy matches of the search query, best first
    fn apply_filter(&mut self) {
        let query = self.search.as_deref().unwrap_or("");
        self.filtered = if query.is_empty() {
            (0..self.entries.len()).collect()
        } else {
            let mut scored: Vec<(i64, usize)> = self
                .entries
                .iter()
                .enumerate()
                .filter_map(|(i, e)| self.matcher.fuzzy_match(&e.label, query).map(|score| (score, i)))
                .collect();
            scored.sort_by(|a, b| b.0.cmp(&a.0));
            scored.into_iter().map(|(_, i)| i).collect()
        };

        self.list_state
            .select(if self.filtered.is_empty() { None } else { Some(0) });
    }
}

/// Run the terminal dashboard until the user quits
pub async fn run_app(config: &Config) -> Result<()> {
    let client = HttpFeedClient::new(config)?;

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, config, &client).await;

    // Cleanup terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &Config,
    client: &HttpFeedClient,
) -> Result<()> {
    let mut app = DashboardApp::new(config);

    app.controller.view_mut().show_loading();
    terminal.draw(|f| app.draw(f))?;
    app.load(client).await?;

    loop {
        terminal.draw(|f| app.draw(f))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key_event(key.code)?;
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
