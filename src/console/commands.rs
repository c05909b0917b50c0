use crate::core::errors::{Error, Result};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Cd,
    Help,
    Ls,
    Quit,
    Rec,
}

impl CommandKind {
    pub const ALL: [CommandKind; 5] = [
        CommandKind::Cd,
        CommandKind::Help,
        CommandKind::Ls,
        CommandKind::Quit,
        CommandKind::Rec,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Cd => "cd",
            CommandKind::Help => "help",
            CommandKind::Ls => "ls",
            CommandKind::Quit => "quit",
            CommandKind::Rec => "rec",
        }
    }

    pub fn usage(&self) -> &'static str {
        match self {
            CommandKind::Cd => "cd <path>",
            CommandKind::Help => "help",
            CommandKind::Ls => "ls",
            CommandKind::Quit => "quit",
            CommandKind::Rec => "rec",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            CommandKind::Cd => "change the current directory (`..` for the parent)",
            CommandKind::Help => "show this help",
            CommandKind::Ls => "list the current directory",
            CommandKind::Quit => "exit",
            CommandKind::Rec => "list recent directories and show one by number",
        }
    }
}

/// A non-blank input line split into command token and first argument.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub name: &'a str,
    pub arg: Option<&'a str>,
}

pub fn parse_line(line: &str) -> Option<ParsedLine<'_>> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;
    Some(ParsedLine {
        name,
        arg: tokens.next(),
    })
}

/// Maps command names to handlers. Built once at startup from
/// [`CommandKind::ALL`], so every command has exactly one entry.
pub struct CommandTable<H> {
    handlers: HashMap<&'static str, (CommandKind, H)>,
}

impl<H: Copy> CommandTable<H> {
    pub fn build(mut handler_for: impl FnMut(CommandKind) -> H) -> Result<Self> {
        let mut handlers = HashMap::with_capacity(CommandKind::ALL.len());
        for kind in CommandKind::ALL {
            if handlers
                .insert(kind.name(), (kind, handler_for(kind)))
                .is_some()
            {
                return Err(Error::DuplicateCommand(kind.name()));
            }
        }
        Ok(Self { handlers })
    }

    /// Case-insensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<(CommandKind, H)> {
        self.handlers.get(name.to_lowercase().as_str()).copied()
    }
}
