use std::{io::Stdout, sync::Arc, time::Duration};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Frame, Terminal, layout::Position, prelude::CrosstermBackend};
use tokio::sync::mpsc;
use tui_input::InputRequest;
use uuid::Uuid;

use crate::{
    config::Config,
    corpus::{Corpus, CorpusStore, LoadOutcome},
    events::{
        AppEvent, EventBus, LogEventPayload, ResolutionCompletedPayload, ResolutionFailedPayload,
    },
    resolver::{Resolution, ResponseSource, Resolver, fallback_reply},
    services::gemini::GeminiService,
    state::{AppState, View},
    types::logs::{Log, LogLevel},
    widgets::{app_layout::AppLayout, input_box::InputBox},
};

pub struct App {
    event_bus: EventBus,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    resolver: Arc<Resolver<GeminiService>>,
    corpus_store: CorpusStore,
    state: AppState,
}

const FRAMES_PER_SECOND: f32 = 30.0;

impl App {
    pub fn new(
        terminal: Terminal<CrosstermBackend<Stdout>>,
        config: &Config,
    ) -> Result<Self, anyhow::Error> {
        let resolver = Resolver::new(GeminiService::new(config)?);

        let mut app = Self {
            event_bus: EventBus::new(),
            terminal,
            resolver: Arc::new(resolver),
            corpus_store: CorpusStore::new(&config.verses_path),
            state: AppState::default(),
        };

        app.log(LogLevel::Info, &format!("Starting with {}", config.summary()));
        if config.gemini_api_key.trim().is_empty() {
            app.log(
                LogLevel::Warn,
                "GEMINI_API_KEY is not set, unmatched messages get fallback replies",
            );
        }

        app.corpus();

        Ok(app)
    }

    pub async fn start(&mut self) -> Result<(), anyhow::Error> {
        self.state.is_app_running = true;

        let period = Duration::from_secs_f32(1.0 / FRAMES_PER_SECOND);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();

        while self.state.is_app_running {
            tokio::select! {
                _ = interval.tick() => self.render()?,
                Some(event) = self.event_bus.recv() => self.handle_app_event(event),
                Some(Ok(event)) = events.next() => self.handle_terminal_event(&event),
            }
        }

        Ok(())
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Log(payload) => self.log(payload.level, &payload.message),
            AppEvent::ResolutionCompleted(payload) => {
                if !self.take_pending(&payload.turn_id) {
                    return;
                }

                self.state.conversation.push_assistant(&payload.text);
            }
            AppEvent::ResolutionFailed(payload) => {
                if !self.take_pending(&payload.turn_id) {
                    return;
                }

                self.log(
                    LogLevel::Error,
                    &format!("Resolve task failed: {}", payload.error),
                );

                let name = self.state.conversation.user_name().unwrap_or_default();
                let reply = fallback_reply(name, &mut rand::thread_rng());
                self.state.conversation.push_assistant(&reply);
            }
        }
    }

    /// Clears the in-flight turn if `turn_id` is it. A reply for any other turn
    /// belongs to a conversation that has since been reset.
    fn take_pending(&mut self, turn_id: &str) -> bool {
        if self.state.pending_turn.as_deref() != Some(turn_id) {
            self.log(LogLevel::Info, "Dropped a reply for a conversation that was reset");
            return false;
        }

        self.state.pending_turn = None;
        true
    }

    fn handle_terminal_event(&mut self, event: &Event) {
        let Event::Key(key) = event else {
            return;
        };

        if key.kind != KeyEventKind::Press {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.exit(),
            KeyCode::Char('c') if ctrl => self.exit(),
            KeyCode::Char('n') if ctrl => self.new_conversation(),
            KeyCode::Char('r') if ctrl => self.change_name(),
            KeyCode::Tab => self.toggle_logs(),
            KeyCode::F(5) => self.reload_corpus(),
            KeyCode::Enter => self.submit(),
            _ if self.state.view.accepts_input() => {
                if let Some(request) = input_request(key) {
                    self.state.input.handle(request);
                    self.state.warning = None;
                }
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        match self.state.view {
            View::NameCapture => self.submit_name(),
            View::Chat => self.submit_utterance(),
            View::Logs => {}
        }
    }

    fn submit_name(&mut self) {
        let raw = self.state.input.value().to_string();

        match self.state.conversation.set_name(&raw) {
            Ok(()) => {
                self.state.input.reset();
                self.state.warning = None;
                self.state.view = View::Chat;

                let name = self.state.conversation.user_name().unwrap_or_default();
                let text = format!("Conversation started for {name}");
                self.log(LogLevel::Info, &text);
            }
            Err(err) => self.state.warning = Some(err.to_string()),
        }
    }

    fn submit_utterance(&mut self) {
        if self.state.is_resolving() {
            return;
        }

        let raw = self.state.input.value().to_string();
        let utterance = match self.state.conversation.begin_turn(&raw) {
            Ok(utterance) => utterance,
            Err(err) => {
                self.state.warning = Some(err.to_string());
                return;
            }
        };

        let name = self
            .state
            .conversation
            .user_name()
            .unwrap_or_default()
            .to_string();

        self.state.input.reset();

        let turn_id = Uuid::new_v4().to_string();
        self.state.pending_turn = Some(turn_id.clone());

        let corpus = self.corpus();

        spawn_resolution(
            Arc::clone(&self.resolver),
            corpus,
            utterance,
            name,
            turn_id,
            self.event_bus.sender(),
        );
    }

    fn new_conversation(&mut self) {
        if self.state.conversation.user_name().is_none() {
            return;
        }

        self.state.conversation.new_conversation();
        self.state.pending_turn = None;
        self.state.input.reset();
        self.state.warning = None;
        self.state.view = View::Chat;
        self.log(LogLevel::Info, "Started a new conversation");
    }

    fn change_name(&mut self) {
        self.state.conversation.change_name();
        self.state.pending_turn = None;
        self.state.input.reset();
        self.state.warning = None;
        self.state.view = View::NameCapture;
        self.log(LogLevel::Info, "Name cleared");
    }

    fn toggle_logs(&mut self) {
        self.state.view = match self.state.view {
            View::Logs if self.state.conversation.user_name().is_some() => View::Chat,
            View::Logs => View::NameCapture,
            _ => View::Logs,
        };
    }

    fn reload_corpus(&mut self) {
        self.corpus_store.invalidate();
        self.state.error = None;
        self.log(LogLevel::Info, "Verse cache cleared, reloading");
        self.corpus();
    }

    /// Cached corpus; reports a fresh load or a load failure once.
    fn corpus(&mut self) -> Arc<Corpus> {
        let load = self.corpus_store.get();

        match load.outcome {
            LoadOutcome::Cached => {}
            LoadOutcome::Loaded { .. } if load.corpus.is_empty() => {
                self.log(
                    LogLevel::Warn,
                    "Verse file has no entries, replies will come from AI or fallback only",
                );
            }
            LoadOutcome::Loaded { entries } => {
                let categories = load.corpus.categories().len();
                let text = format!("Loaded {entries} verses in {categories} categories");
                self.log(LogLevel::Info, &text);
            }
            LoadOutcome::Failed(err) => {
                let text = format!("{err}. Replies will come from AI or fallback only.");
                self.log(LogLevel::Error, &text);
                self.state.error = Some(text);
            }
        }

        load.corpus
    }

    fn log(&mut self, level: LogLevel, text: &str) {
        self.state.log(Log::new(text, level));
    }

    fn render(&mut self) -> Result<(), anyhow::Error> {
        let state = &self.state;
        self.terminal.draw(|frame| draw(frame, state))?;
        Ok(())
    }

    fn exit(&mut self) {
        self.state.is_app_running = false;
    }
}

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(AppLayout::new(state), area);

    if !state.view.accepts_input() || state.is_resolving() {
        return;
    }

    let input_area = AppLayout::areas(area).input;
    let scroll = InputBox::scroll(&state.input, input_area);
    let x = input_area.x + 1 + state.input.visual_cursor().saturating_sub(scroll) as u16;

    frame.set_cursor_position(Position::new(x, input_area.y + 1));
}

fn spawn_resolution(
    resolver: Arc<Resolver<GeminiService>>,
    corpus: Arc<Corpus>,
    utterance: String,
    name: String,
    turn_id: String,
    sender: mpsc::Sender<AppEvent>,
) {
    tokio::spawn(async move {
        let task = tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            resolver
                .resolve(&corpus, &utterance, &name, &mut rng)
                .await
        });

        let event = match task.await {
            Ok(resolution) => {
                // Receiver is gone only while the app is shutting down.
                let _ = sender.send(AppEvent::Log(resolution_log(&resolution))).await;

                AppEvent::ResolutionCompleted(ResolutionCompletedPayload {
                    turn_id,
                    text: resolution.text,
                })
            }
            Err(err) => AppEvent::ResolutionFailed(ResolutionFailedPayload {
                turn_id,
                error: err.to_string(),
            }),
        };

        let _ = sender.send(event).await;
    });
}

fn resolution_log(resolution: &Resolution) -> LogEventPayload {
    match &resolution.source {
        ResponseSource::Corpus { reference } => LogEventPayload {
            level: LogLevel::Info,
            message: format!("Matched verse {reference}"),
        },
        ResponseSource::Generated => LogEventPayload {
            level: LogLevel::Info,
            message: String::from("No verse matched, replied with generated text"),
        },
        ResponseSource::Fallback { error } => LogEventPayload {
            level: LogLevel::Warn,
            message: format!("No verse matched and the responder failed ({error}), used a fallback reply"),
        },
    }
}

fn input_request(key: &KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('u') if ctrl => Some(InputRequest::DeleteLine),
        KeyCode::Char('w') if ctrl => Some(InputRequest::DeletePrevWord),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(InputRequest::InsertChar(c)),
        KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
        KeyCode::Delete => Some(InputRequest::DeleteNextChar),
        KeyCode::Left => Some(InputRequest::GoToPrevChar),
        KeyCode::Right => Some(InputRequest::GoToNextChar),
        KeyCode::Home => Some(InputRequest::GoToStart),
        KeyCode::End => Some(InputRequest::GoToEnd),
        _ => None,
    }
}
