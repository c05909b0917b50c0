use crate::console::commands::CommandKind;
use crate::core::errors::Error;
use crate::models::file_entry::{DirectoryEntry, EntryKind};
use serde_json::json;
use std::io::{self, Write};

/// Presentation of everything the shell has to say.
pub trait Renderer {
    fn banner(&mut self) -> io::Result<()>;
    fn prompt(&mut self, current: &str) -> io::Result<()>;
    fn listing(&mut self, path: &str, entries: &[DirectoryEntry]) -> io::Result<()>;
    fn recent(&mut self, paths: &[&str]) -> io::Result<()>;
    fn index_prompt(&mut self, count: usize) -> io::Result<()>;
    fn help(&mut self, commands: &[CommandKind]) -> io::Result<()>;
    fn error(&mut self, err: &Error) -> io::Result<()>;

    /// Entries skipped during a snapshot.
    fn warnings(&mut self, errors: &[Error]) -> io::Result<()> {
        for err in errors {
            self.error(err)?;
        }
        Ok(())
    }
}

pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "fsnav {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.out, "Type `help` for a list of commands.")
    }

    fn prompt(&mut self, current: &str) -> io::Result<()> {
        write!(self.out, "{}> ", current)?;
        self.out.flush()
    }

    fn listing(&mut self, path: &str, entries: &[DirectoryEntry]) -> io::Result<()> {
        writeln!(self.out, "{}:", path)?;
        if entries.is_empty() {
            return writeln!(self.out, "  (empty)");
        }
        let width = entries
            .iter()
            .map(|e| e.size.to_string().len())
            .max()
            .unwrap_or(1);
        for entry in entries {
            let tag = match entry.kind {
                EntryKind::Directory => "<DIR> ",
                EntryKind::File => "<FILE>",
            };
            writeln!(
                self.out,
                "  {} {:>width$}  {}",
                tag,
                entry.size,
                entry.name,
                width = width
            )?;
        }
        writeln!(self.out, "({} entries)", entries.len())
    }

    fn recent(&mut self, paths: &[&str]) -> io::Result<()> {
        writeln!(self.out, "Recent directories:")?;
        for (i, path) in paths.iter().enumerate() {
            writeln!(self.out, "  {}. {}", i + 1, path)?;
        }
        Ok(())
    }

    fn index_prompt(&mut self, count: usize) -> io::Result<()> {
        write!(self.out, "Directory number [1-{}]: ", count)?;
        self.out.flush()
    }

    fn help(&mut self, commands: &[CommandKind]) -> io::Result<()> {
        writeln!(self.out, "Commands:")?;
        for cmd in commands {
            writeln!(self.out, "  {:<10} {}", cmd.usage(), cmd.summary())?;
        }
        Ok(())
    }

    fn error(&mut self, err: &Error) -> io::Result<()> {
        writeln!(self.out, "error: {}", err)
    }
}

/// One JSON object per line, tagged by `event`.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, value: serde_json::Value) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, &value)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn banner(&mut self) -> io::Result<()> {
        self.emit(json!({ "event": "banner", "version": env!("CARGO_PKG_VERSION") }))
    }

    fn prompt(&mut self, current: &str) -> io::Result<()> {
        self.emit(json!({ "event": "prompt", "path": current }))
    }

    fn listing(&mut self, path: &str, entries: &[DirectoryEntry]) -> io::Result<()> {
        self.emit(json!({ "event": "listing", "path": path, "entries": entries }))
    }

    fn recent(&mut self, paths: &[&str]) -> io::Result<()> {
        self.emit(json!({ "event": "recent", "paths": paths }))
    }

    fn index_prompt(&mut self, count: usize) -> io::Result<()> {
        self.emit(json!({ "event": "index_prompt", "count": count }))
    }

    fn help(&mut self, commands: &[CommandKind]) -> io::Result<()> {
        let commands: Vec<_> = commands
            .iter()
            .map(|c| json!({ "usage": c.usage(), "summary": c.summary() }))
            .collect();
        self.emit(json!({ "event": "help", "commands": commands }))
    }

    fn error(&mut self, err: &Error) -> io::Result<()> {
        self.emit(json!({ "event": "error", "code": err.code(), "message": err.to_string() }))
    }
}
