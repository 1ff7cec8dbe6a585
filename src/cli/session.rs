//! Interactive `imgdash dashboard` session.
//!
//! Input lines are read on a helper thread and delivered over a channel; the
//! loop waits on that channel with a timeout equal to the next pending banner
//! timer, so informational banners disappear on time even while the user is
//! idle. Image loads are polled on every wake-up instead of awaited, so a
//! second `fetch` supersedes one that is still loading. All dashboard state
//! is touched only from the loop's thread.

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use colored::Colorize;

use crate::api::{ImageApi, Orientation};
use crate::dashboard::{Dashboard, FetchOutcome, FetchProgress, PendingFetch};
use crate::ui::{NavItem, Tab, UiPort};

/// Wake-up interval when no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Wake-up interval while an image is loading.
const LOAD_POLL: Duration = Duration::from_millis(50);

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Select(String),
    Mode(String),
    Orientation(Option<Orientation>),
    Fetch,
    Refresh,
    Status,
    Stats,
    Tab(Tab),
    Nav(NavItem),
    Help,
    Quit,
}

/// Parse a line of input. Empty lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.collect::<Vec<_>>().join(" ");

    let require_arg = |what: &str| -> Result<String, String> {
        if arg.is_empty() {
            Err(format!("usage: {verb} <{what}>"))
        } else {
            Ok(arg.clone())
        }
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "select" | "type" | "s" => SessionCommand::Select(require_arg("type")?),
        "mode" | "m" => SessionCommand::Mode(require_arg("direct|json|redirect")?),
        "orientation" | "o" => match arg.as_str() {
            "" | "any" | "none" => SessionCommand::Orientation(None),
            other => SessionCommand::Orientation(Some(other.parse()?)),
        },
        "fetch" | "f" => SessionCommand::Fetch,
        "refresh" | "r" => SessionCommand::Refresh,
        "status" => SessionCommand::Status,
        "stats" => SessionCommand::Stats,
        "tab" | "t" => SessionCommand::Tab(require_arg("tab")?.parse()?),
        "nav" | "go" => SessionCommand::Nav(require_arg("images|help")?.parse()?),
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

/// Whether the session keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Session state kept between commands: the fetch whose image is still
/// loading, if any.
#[derive(Debug, Default)]
pub struct Session {
    pending: Option<PendingFetch>,
}

impl Session {
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply one command to the dashboard.
    pub fn apply<A: ImageApi, P: UiPort>(
        &mut self,
        dashboard: &mut Dashboard<A, P>,
        command: SessionCommand,
    ) -> Flow {
        match command {
            SessionCommand::Select(name) => {
                dashboard.select_category(&name);
            }
            SessionCommand::Mode(mode) => {
                dashboard.select_mode(&mode);
            }
            SessionCommand::Orientation(orientation) => dashboard.set_orientation(orientation),
            SessionCommand::Fetch => {
                if let Ok(pending) = dashboard.start_fetch() {
                    let previous = self.pending.replace(pending);
                    if let Some(previous) = previous {
                        self.report(dashboard.poll_fetch(previous));
                    }
                }
            }
            SessionCommand::Refresh => {
                dashboard.load_categories();
            }
            SessionCommand::Status => dashboard.load_service_status(),
            SessionCommand::Stats => dashboard.load_type_stats(),
            SessionCommand::Tab(tab) => {
                dashboard.switch_tab(tab);
            }
            SessionCommand::Nav(item) => {
                dashboard.navigate(item);
            }
            SessionCommand::Help => print_help(),
            SessionCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Advance the pending fetch and fire due timers. Call on every wake-up.
    pub fn tick<A: ImageApi, P: UiPort>(&mut self, dashboard: &mut Dashboard<A, P>) {
        if let Some(pending) = self.pending.take() {
            match dashboard.poll_fetch(pending) {
                FetchProgress::Pending(pending) => self.pending = Some(pending),
                done => self.report(done),
            }
        }
        dashboard.tick();
    }

    /// How long the loop may sleep before the next [`tick`](Self::tick).
    pub fn next_wake<A: ImageApi, P: UiPort>(&self, dashboard: &Dashboard<A, P>) -> Duration {
        let timer = dashboard.ui().next_timer_in().unwrap_or(IDLE_POLL);
        if self.is_loading() {
            timer.min(LOAD_POLL)
        } else {
            timer
        }
    }

    fn report(&self, progress: FetchProgress) {
        if let FetchProgress::Done(FetchOutcome::Superseded) = progress {
            println!("{}", "(stale result dropped)".dimmed());
        }
    }
}

/// Run the interactive loop until `quit` or end of input.
pub fn run<A: ImageApi, P: UiPort>(dashboard: &mut Dashboard<A, P>) {
    print_help();
    dashboard.start();

    let mut session = Session::default();
    let lines = spawn_stdin_reader();
    loop {
        match lines.recv_timeout(session.next_wake(dashboard)) {
            Ok(line) => match parse_command(&line) {
                Ok(Some(command)) => {
                    if session.apply(dashboard, command) == Flow::Quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => println!("{}", e.yellow()),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        session.tick(dashboard);
    }
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines().map_while(Result::ok) {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn print_help() {
    println!("{}", "imgdash dashboard".bold().cyan());
    println!("{}", "=".repeat(40));
    for (cmd, what) in [
        ("select <type>", "choose an image type"),
        ("mode <direct|json|redirect>", "choose the API variant"),
        ("orientation <h|v|any>", "filter by orientation"),
        ("fetch", "fetch a random image"),
        ("refresh", "reload types, status and counts"),
        ("status / stats", "reload one panel"),
        ("tab <name>", "switch tab on the current page"),
        ("nav <images|help>", "go to another page"),
        ("quit", "leave"),
    ] {
        println!("  {:<30} {}", cmd, what.dimmed());
    }
    println!();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
