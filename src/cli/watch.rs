//! Interactive board that keeps running until the user quits.
//!
//! Fetches run on background tasks and report back over a channel, so the
//! board stays responsive to new commands while a request is in flight.
use super::ui;
use crate::core::board::{FetchTicket, RateBoard};
use crate::core::currency::Currency;
use crate::core::rates::{RateProvider, RateTable};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use tracing::{debug, info};

const HELP: &str =
    "Commands: r | refresh | <enter>, base <CODE>, date <YYYY-MM-DD> | date today, help, q | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchCommand {
    Refresh,
    Base(Currency),
    /// `None` selects today.
    Date(Option<NaiveDate>),
    Help,
    Quit,
}

impl FromStr for WatchCommand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let command = parts.next().map(str::to_lowercase);
        let argument = parts.next();
        if parts.next().is_some() {
            return Err(anyhow!("Too many arguments: {}", s.trim()));
        }

        match (command.as_deref(), argument) {
            (None, _) | (Some("r" | "refresh"), None) => Ok(WatchCommand::Refresh),
            (Some("b" | "base"), Some(code)) => Ok(WatchCommand::Base(code.parse()?)),
            (Some("d" | "date"), Some(arg)) if arg.eq_ignore_ascii_case("today") => {
                Ok(WatchCommand::Date(None))
            }
            (Some("d" | "date"), Some(arg)) => NaiveDate::parse_from_str(arg, "%Y-%m-%d")
                .map(|date| WatchCommand::Date(Some(date)))
                .map_err(|e| anyhow!("Invalid date {arg}: {e}. Expected YYYY-MM-DD")),
            (Some("h" | "help" | "?"), None) => Ok(WatchCommand::Help),
            (Some("q" | "quit" | "exit"), None) => Ok(WatchCommand::Quit),
            _ => Err(anyhow!("Unknown command: {}", s.trim())),
        }
    }
}

type Completion = (FetchTicket, Result<RateTable>);

pub struct WatchSession<W: Write> {
    board: RateBoard,
    provider: Arc<dyn RateProvider>,
    out: W,
    mid_only: bool,
    clear_screen: bool,
    today: fn() -> NaiveDate,
    notice: Option<String>,
}

impl<W: Write> WatchSession<W> {
    pub fn new(
        base: Currency,
        provider: Arc<dyn RateProvider>,
        out: W,
        mid_only: bool,
        today: fn() -> NaiveDate,
    ) -> Self {
        WatchSession {
            board: RateBoard::new(base, today()),
            provider,
            out,
            mid_only,
            clear_screen: false,
            today,
            notice: None,
        }
    }

    /// Clears the terminal before every redraw.
    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    pub fn board(&self) -> &RateBoard {
        &self.board
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs until `quit` or end of input. The first fetch targets `date`, or
    /// today when no date is given.
    pub async fn run<R>(&mut self, input: R, date: Option<NaiveDate>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let (tx, mut rx) = unbounded_channel::<Completion>();
        let mut lines = input.lines();

        let first = match date {
            Some(date) => self.board.set_date(date, (self.today)())?,
            None => self.board.refresh((self.today)())?,
        };
        self.spawn_fetch(first, &tx);
        self.redraw()?;

        loop {
            tokio::select! {
                Some((ticket, outcome)) = rx.recv() => {
                    if self.board.complete(&ticket, outcome) {
                        self.redraw()?;
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        debug!("Input closed, leaving watch mode");
                        break;
                    };
                    match line.parse::<WatchCommand>() {
                        Ok(WatchCommand::Quit) => break,
                        Ok(command) => self.apply(command, &tx),
                        Err(e) => self.notice = Some(e.to_string()),
                    }
                    self.redraw()?;
                }
            }
        }

        info!("Watch mode finished");
        Ok(())
    }

    fn apply(&mut self, command: WatchCommand, tx: &UnboundedSender<Completion>) {
        let today = (self.today)();
        let issued = match command {
            WatchCommand::Refresh => self.board.refresh(today),
            WatchCommand::Base(base) => self.board.set_base(base, today),
            WatchCommand::Date(date) => self.board.set_date(date.unwrap_or(today), today),
            WatchCommand::Help => {
                self.notice = Some(HELP.to_string());
                return;
            }
            WatchCommand::Quit => return,
        };

        match issued {
            Ok(ticket) => {
                self.notice = None;
                self.spawn_fetch(ticket, tx);
            }
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    fn spawn_fetch(&self, ticket: FetchTicket, tx: &UnboundedSender<Completion>) {
        let provider = Arc::clone(&self.provider);
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = provider.fetch_rates(&ticket.request).await;
            if tx.send((ticket, outcome)).is_err() {
                debug!(seq = ticket.seq, "Board closed before fetch completed");
            }
        });
    }

    fn redraw(&mut self) -> Result<()> {
        if self.clear_screen {
            console::Term::stdout().clear_screen()?;
        }
        writeln!(self.out, "{}", self.board.display(self.mid_only))?;
        if let Some(notice) = &self.notice {
            writeln!(
                self.out,
                "{}",
                ui::style_text(notice, ui::StyleType::Subtle)
            )?;
        }
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }
}

pub async fn run(
    provider: Arc<dyn RateProvider>,
    base: Currency,
    date: Option<NaiveDate>,
    mid_only: bool,
) -> Result<()> {
    let stdout = std::io::stdout();
    let clear_screen = console::Term::stdout().is_term();
    let mut session = WatchSession::new(base, provider, stdout, mid_only, local_today)
        .with_clear_screen(clear_screen);
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    session.run(input, date).await
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
