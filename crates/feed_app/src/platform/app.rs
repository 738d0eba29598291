use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use feed_core::{FeedStore, Msg};
use feed_engine::{CachedSource, EngineHandle, PageCache, RepositorySource, ReqwestSource};
use feed_logging::{feed_debug, feed_info, feed_warn};
use log::LevelFilter;

use super::commands::{self, Command, HELP};
use super::config::{self, Cli, FeedSettings, RenderKind};
use super::effects::EffectRunner;
use super::logging;
use super::render::{MarkupRenderer, Renderer, TextRenderer};

enum Input {
    Line(Result<Command, String>),
    Closed,
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (mut settings, load_error) = match config::load_settings(&cli.config) {
        Ok(settings) => (settings, None),
        Err(err) => (FeedSettings::default(), Some(err)),
    };
    cli.apply(&mut settings);

    let level = if settings.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(settings.log_destination, level, &settings.log_file);
    if let Some(err) = load_error {
        feed_warn!("Using default settings: {:#}", err);
    }

    let source = build_source(&settings)?;
    let mut runner = EffectRunner::new(EngineHandle::new(source));
    let mut store = FeedStore::new(config::feed_props(&settings, cli.query()));
    let renderer: Box<dyn Renderer> = match cli.render {
        RenderKind::Text => Box::new(TextRenderer),
        RenderKind::Markup => Box::new(MarkupRenderer),
    };

    let (input_tx, input_rx) = mpsc::channel::<Input>();
    thread::spawn(move || read_commands(input_tx));

    let effects = store.dispatch(Msg::Mounted {
        width: settings.viewport_width,
        height: settings.viewport_height,
    });
    runner.run(effects, Instant::now());

    let frame_interval = settings.frame_interval();
    let mut frame: u64 = 0;
    let mut stdout = io::stdout();
    'frames: loop {
        frame += 1;
        feed_logging::set_frame(frame);

        let mut inbox = Vec::new();
        let mut wait = Some(frame_interval);
        loop {
            let received = match wait.take() {
                Some(timeout) => input_rx.recv_timeout(timeout).ok(),
                None => input_rx.try_recv().ok(),
            };
            let Some(input) = received else { break };
            match input {
                Input::Closed | Input::Line(Ok(Command::Quit)) => break 'frames,
                Input::Line(Ok(Command::Help)) => println!("{HELP}"),
                Input::Line(Ok(Command::ToggleCurrentSummary)) => {
                    if let Some(repository) = store.state().current_repository() {
                        inbox.push(Msg::ToggleSummary {
                            repository_id: repository.id,
                        });
                    }
                }
                Input::Line(Ok(Command::Feed(msg @ Msg::WindowResized { .. }))) => {
                    if runner.is_listening_for_resize() {
                        inbox.push(msg);
                    } else {
                        feed_debug!("Resize ignored, no listener attached");
                    }
                }
                Input::Line(Ok(Command::Feed(msg))) => inbox.push(msg),
                Input::Line(Err(err)) => eprintln!("{err} (type 'help')"),
            }
        }

        inbox.extend(runner.poll(Instant::now()));
        for msg in inbox {
            let effects = store.dispatch(msg);
            runner.run(effects, Instant::now());
        }

        if store.consume_dirty() {
            let view = store.view();
            writeln!(stdout, "{}", renderer.render(&view)).context("writing frame")?;
            stdout.flush().context("flushing frame")?;
        }
    }

    let effects = store.dispatch(Msg::Unmounted);
    runner.run(effects, Instant::now());
    feed_info!("Exiting after {} frames", frame);
    Ok(())
}

fn build_source(settings: &FeedSettings) -> anyhow::Result<Arc<dyn RepositorySource>> {
    let source = ReqwestSource::new(settings.source_settings()).context("building http client")?;
    if !settings.cache_enabled {
        return Ok(Arc::new(source));
    }
    let cache = PageCache::new(settings.cache_dir.clone(), settings.cache_ttl());
    Ok(Arc::new(CachedSource::new(source, cache)))
}

fn read_commands(tx: mpsc::Sender<Input>) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        if tx.send(Input::Line(commands::parse(&line))).is_err() {
            return;
        }
    }
    let _ = tx.send(Input::Closed);
}
