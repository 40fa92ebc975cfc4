//! Line-oriented command shell over the view manager.

use std::io::{self, BufRead, Write};

use geomark_core::{GeoPoint, InputEvent, LocationDirectory, TokenLedger, ViewManager};

use crate::console::ConsoleAdapter;

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    /// Open a venue by id.
    Open(String),
    /// Close the open venue.
    Close,
    /// Click the map at latitude, longitude.
    Click(f64, f64),
    /// Press a key, named the way the map UI names keys.
    Key(String),
    /// Show the open venue and its regions.
    Status,
    /// List commands and venues.
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line; empty and unrecognized lines are `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.trim().splitn(2, ' ');
        let head = parts.next()?;
        let rest = parts.next().unwrap_or("").trim();
        match head {
            "open" if !rest.is_empty() => Some(Self::Open(rest.to_string())),
            "close" => Some(Self::Close),
            "click" => {
                let mut nums = rest.split_whitespace();
                let lat = nums.next()?.parse().ok()?;
                let lng = nums.next()?.parse().ok()?;
                Some(Self::Click(lat, lng))
            }
            "key" if !rest.is_empty() => Some(Self::Key(rest.to_string())),
            "status" => Some(Self::Status),
            "help" => Some(Self::Help),
            "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// The interactive shell; owns the manager and the input ledger.
pub struct Shell {
    manager: ViewManager,
    input: TokenLedger,
}

impl Shell {
    pub fn new(directory: LocationDirectory) -> Self {
        Self {
            manager: ViewManager::new(directory),
            input: TokenLedger::new(),
        }
    }

    pub fn manager(&self) -> &ViewManager {
        &self.manager
    }

    /// Read commands from `reader` until quit or end of input.
    pub fn run(&mut self, reader: impl BufRead, mut out: impl Write) -> io::Result<()> {
        self.print_help(&mut out)?;
        for line in reader.lines() {
            let line = line?;
            match ShellCommand::parse(&line) {
                Some(ShellCommand::Quit) => break,
                Some(command) => self.execute(command, &mut out)?,
                None => {
                    if !line.trim().is_empty() {
                        writeln!(out, "unrecognized: {}", line.trim())?;
                    }
                }
            }
        }
        self.manager.detach(&mut self.input);
        Ok(())
    }

    fn execute(&mut self, command: ShellCommand, out: &mut impl Write) -> io::Result<()> {
        match command {
            ShellCommand::Open(id) => {
                let target = Box::new(ConsoleAdapter::new());
                match self.manager.attach(&id, target, &mut self.input) {
                    Ok(()) => writeln!(out, "opened {}", id)?,
                    Err(err) => writeln!(out, "open failed: {}", err)?,
                }
            }
            ShellCommand::Close => {
                self.manager.detach(&mut self.input);
                writeln!(out, "closed")?;
            }
            ShellCommand::Click(lat, lng) => {
                self.feed(InputEvent::Click(GeoPoint::new(lat, lng)), out)?;
            }
            ShellCommand::Key(key) => {
                self.feed(InputEvent::Key(key), out)?;
            }
            ShellCommand::Status => self.print_status(out)?,
            ShellCommand::Help => self.print_help(out)?,
            ShellCommand::Quit => {}
        }
        Ok(())
    }

    fn feed(&mut self, event: InputEvent, out: &mut impl Write) -> io::Result<()> {
        if let Err(err) = self.manager.dispatch(event) {
            writeln!(out, "error: {}", err)?;
        }
        Ok(())
    }

    fn print_status(&self, out: &mut impl Write) -> io::Result<()> {
        let Some(session) = self.manager.session() else {
            writeln!(out, "no venue open")?;
            return Ok(());
        };
        writeln!(
            out,
            "{}: {} mode, {} regions",
            session.location().name,
            session.mode(),
            session.registry().len()
        )?;
        for (i, region) in session.registry().iter().enumerate() {
            let marker = if session.focused_index() == Some(i) {
                "*"
            } else {
                " "
            };
            writeln!(out, " {}{} {} at {}", marker, i, region.color, region.center())?;
        }
        Ok(())
    }

    fn print_help(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "commands:")?;
        writeln!(out, "  open <venue>       open a venue by id")?;
        writeln!(out, "  close              close the open venue")?;
        writeln!(out, "  click <lat> <lng>  click the map")?;
        writeln!(out, "  key <name>         press a key (. toggles draw mode)")?;
        writeln!(out, "  status             show the open venue")?;
        writeln!(out, "  help               this text")?;
        writeln!(out, "  quit               leave")?;
        writeln!(out, "venues:")?;
        for id in self.manager.directory().ids() {
            writeln!(out, "  {}", id)?;
        }
        Ok(())
    }
}
