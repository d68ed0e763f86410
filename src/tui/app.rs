use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::api::{ApiEvent, Dispatcher, TripService};
use crate::model::TripId;

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::route::Route;
use super::screens::{
    HelpState, TripFormState, TripResultsState, draw_help, draw_trip_form, draw_trip_results,
};
use super::widgets::{NoticeKind, StatusBarContext, draw_status_bar};

/// How long the event loop waits for input before checking for planner results.
const TICK: Duration = Duration::from_millis(100);

/// How long a transient notice stays in the status bar.
pub const NOTICE_DURATION: Duration = Duration::from_secs(4);

/// All screens the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Trip intake form.
    TripForm,
    /// Results for one trip.
    TripResults,
    /// Keybinding help for the screen underneath.
    Help,
}

#[derive(Debug, Clone)]
struct Notice {
    text: String,
    kind: NoticeKind,
    expires_at: Instant,
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    route: Route,
    trip_form: TripFormState,
    trip_results: TripResultsState,
    help: HelpState,
    dispatcher: Dispatcher,
    events: UnboundedReceiver<ApiEvent>,
    notice: Option<Notice>,
    should_quit: bool,
}

impl App {
    /// Creates the app and enters `initial`, dispatching its fetch if it has one.
    ///
    /// Planner requests are spawned on `runtime`.
    pub fn new(service: Arc<dyn TripService>, runtime: Handle, initial: Route) -> Self {
        let (dispatcher, events) = Dispatcher::new(service, runtime);
        let mut app = Self {
            screen: Screen::TripForm,
            route: Route::Intake,
            trip_form: TripFormState::new(),
            trip_results: TripResultsState::new(),
            help: HelpState::new(),
            dispatcher,
            events,
            notice: None,
            should_quit: false,
        };
        app.navigate(initial);
        app
    }

    /// Main event loop: draw → poll input → apply planner results → expire notice.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(TICK)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
            let now = Instant::now();
            while let Ok(event) = self.events.try_recv() {
                self.handle_api_event(event, now);
            }
            self.expire_notice(now);
        }
        Ok(())
    }

    /// Renders the current screen above the status bar.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [content_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        match self.screen {
            Screen::TripForm => draw_trip_form(&self.trip_form, frame, content_area),
            Screen::TripResults => draw_trip_results(&self.trip_results, frame, content_area),
            Screen::Help => draw_help(&self.help, frame, content_area),
        }

        let ctx = StatusBarContext {
            route_path: self.route.path(),
            base_url: self.dispatcher.base_url().to_string(),
            notice: self.notice.as_ref().map(|n| (n.text.clone(), n.kind)),
        };
        draw_status_bar(&ctx, frame, status_area);
    }

    /// Handles a key event: global keys first, then the active screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.apply(Action::Quit);
            return;
        }
        if key.code == KeyCode::F(1) {
            self.apply(Action::ShowHelp);
            return;
        }

        let action = match self.screen {
            Screen::TripForm => self.trip_form.handle_key(key),
            Screen::TripResults => self.trip_results.handle_key(key),
            Screen::Help => self.help.handle_key(key),
        };
        self.apply(action);
    }

    /// Applies a screen action to global state.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(route) => self.navigate(route),
            Action::SubmitTrip(request) => {
                let generation = self.dispatcher.submit(request);
                self.trip_form.track_submit(generation);
            }
            Action::LoadTrip(trip_id) => self.load_trip(trip_id),
            Action::ShowHelp => {
                if self.screen != Screen::Help {
                    self.help.open_from(self.screen);
                    self.screen = Screen::Help;
                }
            }
            Action::CloseHelp => self.screen = self.help.origin(),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Moves to `route`. Entering results always starts a fresh lookup;
    /// entering intake from elsewhere starts an empty form.
    fn navigate(&mut self, route: Route) {
        tracing::info!(from = %self.route, to = %route, "navigating");
        match &route {
            Route::Intake => {
                if self.route != Route::Intake {
                    self.trip_form = TripFormState::new();
                }
                self.screen = Screen::TripForm;
            }
            Route::Results(trip_id) => {
                self.load_trip(trip_id.clone());
                self.screen = Screen::TripResults;
            }
        }
        self.route = route;
    }

    fn load_trip(&mut self, trip_id: TripId) {
        let logs_url = self.dispatcher.logs_url(&trip_id);
        let generation = self.dispatcher.fetch(trip_id.clone());
        self.trip_results.begin_load(trip_id, generation, logs_url);
    }

    /// Applies a settled planner request.
    pub fn handle_api_event(&mut self, event: ApiEvent, now: Instant) {
        match event {
            ApiEvent::Submitted {
                generation,
                outcome,
            } => {
                let action = self.trip_form.finish_submit(generation, outcome);
                if let Some((text, kind)) = self.trip_form.take_notice() {
                    self.show_notice(text, kind, now);
                }
                self.apply(action);
            }
            ApiEvent::Fetched {
                generation,
                trip_id,
                outcome,
            } => {
                self.trip_results.finish_load(generation, &trip_id, outcome);
            }
        }
    }

    fn show_notice(&mut self, text: String, kind: NoticeKind, now: Instant) {
        self.notice = Some(Notice {
            text,
            kind,
            expires_at: now + NOTICE_DURATION,
        });
    }

    /// Clears the notice once its time is up.
    pub fn expire_notice(&mut self, now: Instant) {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| now >= notice.expires_at)
        {
            self.notice = None;
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn trip_form(&self) -> &TripFormState {
        &self.trip_form
    }

    pub fn trip_results(&self) -> &TripResultsState {
        &self.trip_results
    }

    /// Text and tone of the live notice, if any.
    pub fn notice(&self) -> Option<(&str, NoticeKind)> {
        self.notice.as_ref().map(|n| (n.text.as_str(), n.kind))
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Blocks until the next planner request settles, then applies it.
    #[cfg(test)]
    fn settle_next(&mut self) {
        let event = self
            .events
            .blocking_recv()
            .expect("dispatcher keeps a sender alive");
        self.handle_api_event(event, Instant::now());
    }
}
