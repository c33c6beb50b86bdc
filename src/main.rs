//! weather-lookup - current temperature for a city, in the terminal

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_lookup::action::Action;
use weather_lookup::api::{self, WeatherClient};
use weather_lookup::components::{
    CityForm, CityFormProps, Component, WeatherWidget, WeatherWidgetProps,
};
use weather_lookup::config::{Config, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use weather_lookup::effect::Effect;
use weather_lookup::logging;
use weather_lookup::reducer::reducer;
use weather_lookup::state::{AppState, Focus, SPINNER_TICK_MS};

/// Current temperature lookup backed by OpenWeatherMap
#[derive(Parser, Debug)]
#[command(name = "weather-lookup")]
#[command(about = "Look up the current temperature for a city")]
struct Args {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Current-weather endpoint
    #[arg(long, env = "OPENWEATHER_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Request timeout in seconds (minimum 1)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// City to look up right away
    #[arg(long, short)]
    city: Option<String>,

    /// Append logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum LookupComponentId {
    Form,
    Controls,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum LookupContext {
    Form,
    Controls,
}

impl EventRoutingState<LookupComponentId, LookupContext> for AppState {
    fn focused(&self) -> Option<LookupComponentId> {
        match self.focus {
            Focus::Form if self.form_armed() => Some(LookupComponentId::Form),
            _ => Some(LookupComponentId::Controls),
        }
    }

    fn modal(&self) -> Option<LookupComponentId> {
        None
    }

    fn binding_context(&self, id: LookupComponentId) -> LookupContext {
        match id {
            LookupComponentId::Form => LookupContext::Form,
            LookupComponentId::Controls => LookupContext::Controls,
        }
    }

    fn default_context(&self) -> LookupContext {
        LookupContext::Controls
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        api_key,
        api_url,
        timeout_secs,
        city,
        log_file,
        debug: debug_args,
    } = Args::parse();

    let config = match Config::new(api_key, api_url, timeout_secs, city, log_file) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(path) = &config.log_file {
        logging::init(path)?;
    }
    tracing::info!(api_url = %config.api_url, timeout = ?config.timeout, "starting weather-lookup");

    let client = WeatherClient::from_config(&config).map_err(io::Error::other)?;

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::new()) })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let initial_action = config.initial_city.clone().map(Action::CitySubmit);
    let result = run_app(
        &mut terminal,
        &debug,
        store,
        client,
        initial_action,
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("weather-lookup exited");
    Ok(())
}

struct LookupUi {
    widget: WeatherWidget,
    form: CityForm,
}

impl LookupUi {
    fn new() -> Self {
        Self {
            widget: WeatherWidget,
            form: CityForm::new(),
        }
    }

    fn form_props(state: &AppState, is_focused: bool) -> CityFormProps<'_> {
        CityFormProps {
            value: &state.city_input,
            is_focused,
            is_armed: state.form_armed(),
            on_change: Action::CityInputChange,
            on_submit: Action::CitySubmit,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<LookupComponentId>,
    ) {
        let form_area = WeatherWidget::form_area(area);
        event_ctx.set_component_area(LookupComponentId::Controls, area);
        event_ctx.set_component_area(LookupComponentId::Form, form_area);

        let form_focused = render_ctx.is_focused() && state.focus == Focus::Form;
        let props = WeatherWidgetProps {
            state,
            is_focused: render_ctx.is_focused() && !form_focused,
        };
        self.widget.render(frame, area, props);

        self.form.set_armed(state.form_armed());
        self.form
            .render(frame, form_area, Self::form_props(state, form_focused));
    }

    fn handle_controls_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherWidgetProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .widget
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_form_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.form.set_armed(state.form_armed());
        let actions: Vec<_> = self
            .form
            .handle_event(event, Self::form_props(state, true))
            .into_iter()
            .collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: WeatherClient,
    initial_action: Option<Action>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(LookupUi::new()));
    let mut bus: EventBus<AppState, Action, LookupComponentId, LookupContext> = EventBus::new();
    let keybindings: Keybindings<LookupContext> = Keybindings::new();

    let ui_form = Rc::clone(&ui);
    bus.register(LookupComponentId::Form, move |event, state| {
        ui_form.borrow_mut().handle_form_event(&event.kind, state)
    });

    let ui_controls = Rc::clone(&ui);
    bus.register(LookupComponentId::Controls, move |event, state| {
        ui_controls
            .borrow_mut()
            .handle_controls_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            initial_action,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &client),
        )
        .await
}

/// Handle effects by spawning tasks. Lookups share one task key, so a new
/// submission aborts the lookup it supersedes.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: &WeatherClient) {
    match effect {
        Effect::FetchTemperature { city, request_id } => {
            let client = client.clone();
            ctx.tasks().spawn("temperature", async move {
                api::lookup_action(&client, &city, request_id).await
            });
        }
    }
}
