//! Live Table View
//!
//! Holds the dashboard's state: the last coin list, the search term and the
//! display theme. Poll results and console commands are applied one at a
//! time by the dashboard task; rendering is a pure function of this state.

use chrono::{DateTime, Utc};
use tabled::{builder::Builder, settings::Style};

use crate::domain::{filter_by_name, format_usd, Coin};
use super::input::ViewCommand;
use super::poller::PollEvent;

pub const TITLE: &str = "Crypto Tracker";
pub const LOADING_TEXT: &str = "Loading...";

const ANSI_RESET: &str = "\x1b[0m";

/// Display theme, purely presentational
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label on the toggle: names the theme you switch *to*
    fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "[:dark] moon",
            Theme::Dark => "[:dark] sun",
        }
    }

    fn title_ansi(self) -> &'static str {
        match self {
            Theme::Light => "\x1b[1;30;47m",
            Theme::Dark => "\x1b[1;97;100m",
        }
    }

    fn body_ansi(self) -> &'static str {
        match self {
            Theme::Light => "\x1b[30m",
            Theme::Dark => "\x1b[97m",
        }
    }
}

/// What the table area currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// No poll has resolved yet
    Loading,
    /// Last successful poll
    Ready { coins: Vec<Coin>, updated_at: DateTime<Utc> },
    /// A poll failed; the table is replaced by the message
    Failed { message: String },
}

#[derive(Debug, Clone)]
pub struct LiveTableView {
    state: ViewState,
    search_term: String,
    theme: Theme,
    ansi: bool,
}

impl Default for LiveTableView {
    fn default() -> Self {
        Self::new(false)
    }
}

impl LiveTableView {
    pub fn new(ansi: bool) -> Self {
        Self {
            state: ViewState::Loading,
            search_term: String::new(),
            theme: Theme::Light,
            ansi,
        }
    }

    /// Start with a search term already set
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Start in dark mode
    pub fn with_dark_mode(mut self, dark: bool) -> Self {
        self.theme = if dark { Theme::Dark } else { Theme::Light };
        self
    }

    /// Replace the working copy wholesale, or switch to the error state.
    pub fn apply(&mut self, event: PollEvent) {
        self.state = match event {
            PollEvent::Loaded { coins, fetched_at } => ViewState::Ready {
                coins,
                updated_at: fetched_at,
            },
            PollEvent::Failed(err) => ViewState::Failed {
                message: err.public_message(),
            },
        };
    }

    /// Apply a console command. `Quit` is the dashboard's business.
    pub fn handle(&mut self, command: &ViewCommand) {
        match command {
            ViewCommand::Search(term) => self.set_search_term(term.clone()),
            ViewCommand::ClearSearch => self.set_search_term(String::new()),
            ViewCommand::ToggleTheme => self.toggle_dark_mode(),
            ViewCommand::Unknown(raw) => tracing::warn!("Unknown command: {}", raw),
            ViewCommand::Quit => {}
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn toggle_dark_mode(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, ViewState::Failed { .. })
    }

    /// Current list, if a poll has succeeded
    pub fn coins(&self) -> Option<&[Coin]> {
        match &self.state {
            ViewState::Ready { coins, .. } => Some(coins),
            _ => None,
        }
    }

    /// Coins that pass the search filter, in poll order
    pub fn visible_coins(&self) -> Vec<&Coin> {
        self.coins()
            .map(|coins| filter_by_name(coins, &self.search_term))
            .unwrap_or_default()
    }

    pub fn render(&self) -> String {
        match &self.state {
            ViewState::Loading => LOADING_TEXT.to_string(),
            ViewState::Failed { message } => format!("Error: {}", message),
            ViewState::Ready { coins, updated_at } => self.render_ready(coins, updated_at),
        }
    }

    fn render_ready(&self, coins: &[Coin], updated_at: &DateTime<Utc>) -> String {
        let visible = filter_by_name(coins, &self.search_term);

        let header = format!("{}    Search: {}    {}", TITLE, self.search_term, self.theme.toggle_label());
        let status = format!(
            "Updated {} UTC - showing {} of {}",
            updated_at.format("%H:%M:%S"),
            visible.len(),
            coins.len()
        );
        let table = render_table(&visible, self.theme);

        if self.ansi {
            format!(
                "{}{}{}\n{}{}\n\n{}{}",
                self.theme.title_ansi(),
                header,
                ANSI_RESET,
                status,
                self.theme.body_ansi(),
                table,
                ANSI_RESET
            )
        } else {
            format!("{}\n{}\n\n{}", header, status, table)
        }
    }
}

fn render_table(coins: &[&Coin], theme: Theme) -> String {
    let mut builder = Builder::default();
    builder.push_record(["#", "Name", "Price"]);
    for coin in coins {
        builder.push_record([coin.id.clone(), coin.display_name(), format_usd(coin.price)]);
    }

    let mut table = builder.build();
    match theme {
        Theme::Light => table.with(Style::modern()),
        Theme::Dark => table.with(Style::rounded()),
    };
    table.to_string()
}
