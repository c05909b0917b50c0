use crate::console::commands::{parse_line, CommandKind, CommandTable};
use crate::console::render::Renderer;
use crate::core::errors::{Error, Result};
use crate::services::navigator::Navigator;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

type Handler<R, D> = fn(&mut Shell<R, D>, Option<&str>) -> Result<Flow>;

/// Blocking read-dispatch loop over a [`Navigator`].
///
/// Command failures are reported through the renderer and the loop goes
/// on; only failing to read input or write output ends `run` with an error.
pub struct Shell<R, D> {
    navigator: Navigator,
    input: R,
    renderer: D,
    table: CommandTable<Handler<R, D>>,
}

impl<R: BufRead, D: Renderer> Shell<R, D> {
    pub fn new(navigator: Navigator, input: R, renderer: D) -> Result<Self> {
        let table = CommandTable::build(|kind| -> Handler<R, D> {
            match kind {
                CommandKind::Cd => Self::cd,
                CommandKind::Help => Self::help,
                CommandKind::Ls => Self::ls,
                CommandKind::Quit => Self::quit,
                CommandKind::Rec => Self::rec,
            }
        })?;
        Ok(Self {
            navigator,
            input,
            renderer,
            table,
        })
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn into_renderer(self) -> D {
        self.renderer
    }

    /// Prints the banner and anything skipped while opening the start directory.
    pub fn greet(&mut self, banner: bool, startup_warnings: &[Error]) -> Result<()> {
        if banner {
            self.renderer.banner()?;
        }
        self.renderer.warnings(startup_warnings)?;
        Ok(())
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.renderer.prompt(self.navigator.current_dir())?;
            let Some(line) = self.read_line()? else {
                tracing::debug!("end of input");
                return Ok(());
            };
            if self.execute(&line)? == Flow::Quit {
                return Ok(());
            }
        }
    }

    pub fn execute(&mut self, line: &str) -> Result<Flow> {
        let Some(parsed) = parse_line(line) else {
            return Ok(Flow::Continue);
        };
        match self.table.lookup(parsed.name) {
            Some((kind, handler)) => {
                tracing::debug!(command = kind.name(), arg = parsed.arg, "dispatch");
                handler(self, parsed.arg)
            }
            None => {
                self.report(Error::UnknownCommand(parsed.name.to_string()))?;
                Ok(Flow::Continue)
            }
        }
    }

    fn cd(&mut self, arg: Option<&str>) -> Result<Flow> {
        let Some(target) = arg else {
            return Ok(Flow::Continue);
        };
        match self.navigator.change_directory(target) {
            Ok(denied) => self.renderer.warnings(&denied)?,
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn help(&mut self, _arg: Option<&str>) -> Result<Flow> {
        self.renderer.help(&CommandKind::ALL)?;
        Ok(Flow::Continue)
    }

    fn ls(&mut self, _arg: Option<&str>) -> Result<Flow> {
        let nav = &self.navigator;
        self.renderer
            .listing(nav.current_dir(), nav.list_current_directory())?;
        Ok(Flow::Continue)
    }

    fn quit(&mut self, _arg: Option<&str>) -> Result<Flow> {
        Ok(Flow::Quit)
    }

    fn rec(&mut self, _arg: Option<&str>) -> Result<Flow> {
        let recent = self.navigator.list_recent_directories();
        if recent.is_empty() {
            self.report(Error::NoRecentDirectories)?;
            return Ok(Flow::Continue);
        }
        let count = recent.len();
        self.renderer.recent(&recent)?;
        self.renderer.index_prompt(count)?;

        let Some(line) = self.read_line()? else {
            return Ok(Flow::Quit);
        };
        let answer = line.trim();
        let index = match answer.parse::<i64>() {
            Ok(index) => index,
            Err(_) => {
                self.report(Error::InvalidIndex(answer.to_string()))?;
                return Ok(Flow::Continue);
            }
        };
        match self.navigator.list_directory_by_recent_index(index) {
            Ok((path, entries)) => self.renderer.listing(path, entries)?,
            Err(err) => {
                tracing::warn!("{}", err);
                self.renderer.error(&err)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn report(&mut self, err: Error) -> Result<()> {
        tracing::warn!("{}", err);
        self.renderer.error(&err)?;
        Ok(())
    }

    /// Invalid UTF-8 is replaced, not fatal; the line then fails as a
    /// command or an index like any other bad input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
