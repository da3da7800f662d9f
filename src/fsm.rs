use anyhow::{bail, Result};

use crate::commands;
use crate::error::SessionError;
use crate::node::Side;
use crate::session::{Session, SessionState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Show,
    RotateLeft,
    RotateRight,
    Add,
    New,
    Dump,
    Help,
    Quit,
}

impl TryFrom<&str> for Command {
    type Error = SessionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "show" | "s" => Ok(Command::Show),
            "left" | "l" => Ok(Command::RotateLeft),
            "right" | "r" => Ok(Command::RotateRight),
            "add" | "a" => Ok(Command::Add),
            "new" | "n" => Ok(Command::New),
            "dump" | "d" => Ok(Command::Dump),
            "help" | "h" => Ok(Command::Help),
            "quit" | "q" => Ok(Command::Quit),
            _ => Err(SessionError::InvalidCommand),
        }
    }
}

#[allow(clippy::upper_case_acronyms)]
pub struct FSM<'a> {
    session: &'a mut Session,
}

impl<'a> FSM<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    /// Runs one tokenized command line. Returns whether the user asked to quit.
    pub fn handle<S: AsRef<str>>(&mut self, args: &[S]) -> Result<bool> {
        let (name, rest) = args.split_first().ok_or(SessionError::InvalidCommand)?;
        let command = Command::try_from(name.as_ref())?;

        match command {
            Command::RotateLeft | Command::RotateRight => {
                if rest.len() != 1 {
                    bail!(SessionError::InvalidValue);
                }
            }
            _ => {
                if !rest.is_empty() {
                    bail!(SessionError::InvalidCommand);
                }
            }
        }

        match self.session.get_state() {
            SessionState::Unbalanced => match command {
                Command::Add => bail!(SessionError::TreeUnbalanced),
                _ => self.handle_common(command, rest)?,
            },
            SessionState::Balanced => match command {
                Command::Add => commands::tree::add(self.session)?,
                _ => self.handle_common(command, rest)?,
            },
        }

        Ok(command == Command::Quit)
    }

    fn handle_common<S: AsRef<str>>(&mut self, command: Command, rest: &[S]) -> Result<()> {
        match command {
            Command::Show => commands::tree::show(self.session)?,
            Command::RotateLeft => commands::rotate::rotate(self.session, parse_value(rest)?, Side::Left)?,
            Command::RotateRight => commands::rotate::rotate(self.session, parse_value(rest)?, Side::Right)?,
            Command::New => commands::tree::new(self.session)?,
            Command::Dump => commands::tree::dump(self.session)?,
            Command::Help => commands::help::help(),
            Command::Quit => (),
            Command::Add => bail!(SessionError::InvalidCommand),
        }

        Ok(())
    }
}

fn parse_value<S: AsRef<str>>(rest: &[S]) -> Result<i32> {
    let value = rest.first().ok_or(SessionError::InvalidValue)?;
    let value = value.as_ref().parse::<i32>().map_err(|_| SessionError::InvalidValue)?;

    Ok(value)
}
