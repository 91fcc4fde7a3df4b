//! Terminal front-end and entry point.
//!
//! A thin line-oriented shell around the library: it reads configuration,
//! starts telemetry, loads the selected backend's list, then turns each line
//! typed on stdin into an application event and re-renders the list.
//!
//! # Lifecycle
//!
//! 1. **Load**: Parse config, initialize telemetry, build state and dispatcher
//! 2. **Mount**: Dispatch `Event::Mounted` (one traced list call)
//! 3. **Loop**: Parse line → handle event → render
//! 4. **Exit**: On `quit` or end of input, flush buffered spans
//!
//! # Commands
//!
//! - `list` / `reload`: Fetch the list again
//! - `add <name>`: Create a todo
//! - `rm <id>`: Delete a todo
//! - `backend go|java`: Switch backend
//! - `help`: Show commands
//! - `quit`: Exit

#![allow(clippy::multiple_crate_versions)]

use std::io::Write;
use std::ops::ControlFlow;
use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader};

use todo_tracer::observability::{init_telemetry, TelemetryHandle};
use todo_tracer::ui::input::{parse_line, Command, HELP};
use todo_tracer::{AppState, Config, Dispatcher, Event};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();

    let telemetry = match init_telemetry(&config) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("todo-tracer: {e}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = run(&config, &telemetry).await;
    shutdown(telemetry).await;

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("todo-tracer: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config, telemetry: &TelemetryHandle) -> todo_tracer::Result<()> {
    let (mut state, dispatcher) = todo_tracer::initialize(config, telemetry.tracer())?;

    tracing::debug!(backend = %state.backend, "mounting");
    dispatcher.handle(&mut state, &Event::Mounted).await?;
    draw(&state)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if step(&dispatcher, &mut state, &line).await?.is_break() {
            break;
        }
    }

    tracing::debug!("command loop finished");
    Ok(())
}

async fn step(
    dispatcher: &Dispatcher,
    state: &mut AppState,
    line: &str,
) -> todo_tracer::Result<ControlFlow<()>> {
    let event = match parse_line(line) {
        Ok(Command::Event(event)) => event,
        Ok(Command::Help) => {
            println!("{HELP}");
            return Ok(ControlFlow::Continue(()));
        }
        Ok(Command::Nothing) => return Ok(ControlFlow::Continue(())),
        Err(message) => {
            println!("{message}");
            return Ok(ControlFlow::Continue(()));
        }
    };

    let flow = dispatcher.handle(state, &event).await?;
    if flow.is_continue() {
        draw(state)?;
    }
    Ok(flow)
}

fn draw(state: &AppState) -> todo_tracer::Result<()> {
    let mut stdout = std::io::stdout().lock();
    todo_tracer::ui::render(state, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

async fn shutdown(telemetry: TelemetryHandle) {
    match tokio::task::spawn_blocking(move || telemetry.shutdown()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => eprintln!("todo-tracer: {e}"),
        Err(e) => eprintln!("todo-tracer: telemetry shutdown task failed: {e}"),
    }
}
