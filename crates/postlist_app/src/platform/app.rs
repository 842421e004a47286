use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use postlist_core::{update, AppState, Msg, PostId, PostListViewModel};
use postlist_engine::{
    ensure_state_dir, EngineHandle, MemoryPostsApi, PostsApi, ReqwestPostsApi,
};
use postlist_logging::{postlist_info, postlist_warn};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::persistence::FileParamStore;
use super::ui::commands::{parse_command, Command, HELP};
use super::ui::render::{render, render_editor};
use super::ui::viewport::{VisibilityCapability, Viewport};

const POLL_INTERVAL: Duration = Duration::from_millis(20);
const VIEWPORT_ROWS: usize = 6;
const DEMO_LATENCY: Duration = Duration::from_millis(150);

enum Input {
    Line(String),
    Closed,
}

pub fn run_app() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("resolving the working directory")?;
    let (mut config, config_error) = match AppConfig::load_from(&cwd) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    config.apply_overrides(|name| std::env::var(name).ok());

    ensure_state_dir(&config.state_dir).with_context(|| {
        format!("preparing state directory {}", config.state_dir.display())
    })?;
    logging::initialize(config.log_destination, &config.state_dir);
    if let Some(err) = config_error {
        postlist_warn!("Using default configuration: {:#}", err);
    }

    let api: Arc<dyn PostsApi> = match config.api_settings() {
        Some(settings) => {
            postlist_info!("Using posts API at {}", settings.base_url);
            Arc::new(ReqwestPostsApi::new(settings).context("configuring the posts API")?)
        }
        None => {
            postlist_info!("No API configured; serving demo posts");
            Arc::new(MemoryPostsApi::seeded().with_latency(DEMO_LATENCY))
        }
    };
    let engine = EngineHandle::new(api).context("starting the engine")?;
    let runner = EffectRunner::new(engine, FileParamStore::open(&config.state_dir));
    let mut host = Host::new(
        AppState::with_config(config.core_config()),
        runner,
        io::stdout(),
    );

    let input = spawn_input_reader();
    host.say(HELP)?;
    host.mount()?;
    loop {
        match input.recv_timeout(POLL_INTERVAL) {
            Ok(Input::Line(line)) => match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => host.handle_command(command)?,
                Err(err) => host.say(&err.to_string())?,
            },
            Ok(Input::Closed) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
        host.pump()?;
    }
    host.unmount()?;
    Ok(())
}

fn spawn_input_reader() -> mpsc::Receiver<Input> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Input::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    postlist_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
        let _ = tx.send(Input::Closed);
    });
    rx
}

/// Owns the state and runs every message through `update`.
struct Host<W> {
    state: AppState,
    runner: EffectRunner<FileParamStore>,
    viewport: Viewport,
    view: PostListViewModel,
    msg_rx: mpsc::Receiver<Msg>,
    out: W,
}

impl<W: Write> Host<W> {
    fn new(state: AppState, runner: EffectRunner<FileParamStore>, out: W) -> Self {
        let (visibility_tx, msg_rx) = mpsc::channel();
        let mut viewport = Viewport::new(VIEWPORT_ROWS);
        viewport.register_visibility_callback(Box::new(move |visible| {
            let _ = visibility_tx.send(Msg::SentinelVisibilityChanged(visible));
        }));
        Self {
            state,
            runner,
            viewport,
            view: PostListViewModel::default(),
            msg_rx,
            out,
        }
    }

    fn mount(&mut self) -> io::Result<()> {
        let params = self.runner.params();
        self.dispatch(Msg::Mounted(params))
    }

    fn unmount(&mut self) -> io::Result<()> {
        self.dispatch(Msg::Unmounted)?;
        self.runner.shutdown();
        Ok(())
    }

    /// Feeds finished engine work and queued messages through `update`.
    fn pump(&mut self) -> io::Result<()> {
        for msg in self.runner.drain_events() {
            self.dispatch(msg)?;
        }
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg)?;
        }
        Ok(())
    }

    fn handle_command(&mut self, command: Command) -> io::Result<()> {
        let msg = match command {
            Command::Type(text) => Msg::SearchTextChanged(text),
            Command::Clear => Msg::SearchCleared,
            Command::Sort(sort) => Msg::SortSelected(sort),
            Command::Scroll(by) => {
                self.viewport.scroll_down(by, self.view.rows.len());
                return self.redraw();
            }
            Command::Up(by) => {
                self.viewport.scroll_up(by);
                return self.redraw();
            }
            Command::More => Msg::LoadMoreRequested,
            Command::Edit(row) => match self.row_id(row) {
                Some(id) => Msg::EditRequested(id),
                None => return self.say(&format!("there is no row {row}")),
            },
            Command::Delete(row) => match self.row_id(row) {
                Some(id) => Msg::DeleteRequested(id),
                None => return self.say(&format!("there is no row {row}")),
            },
            Command::Yes => Msg::DeleteConfirmed,
            Command::No => Msg::DeleteDismissed,
            Command::Retry => Msg::RetryRequested,
            Command::Dismiss => Msg::NotificationsDismissed,
            Command::Open(params) => {
                self.runner.store_mut().replace_all(params.clone());
                Msg::ParamsChanged(params)
            }
            Command::Reload => {
                self.dispatch(Msg::Unmounted)?;
                Msg::Mounted(self.runner.params())
            }
            Command::Help => return self.say(HELP),
            Command::Quit => return Ok(()),
        };
        self.dispatch(msg)?;
        self.pump()
    }

    fn row_id(&self, row: usize) -> Option<PostId> {
        let index = row.checked_sub(1)?;
        self.view.rows.get(index).map(|row| row.id.clone())
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let redraw = state.consume_dirty();
        if redraw {
            self.view = state.view();
        }
        self.state = state;
        let edits = self.runner.run(effects);
        if redraw {
            self.redraw()?;
        }
        for post in &edits {
            write!(self.out, "{}", render_editor(post))?;
        }
        self.out.flush()
    }

    fn redraw(&mut self) -> io::Result<()> {
        self.viewport.refresh(self.view.rows.len());
        write!(self.out, "{}", render(&self.view, &self.viewport))?;
        self.out.flush()
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }
}
