use anyhow::Result;
use fsnav::console::render::{JsonRenderer, TextRenderer};
use fsnav::console::shell::Shell;
use fsnav::services::navigator::Navigator;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn fixture() -> Result<TempDir> {
    let root = tempdir()?;
    fs::create_dir(root.path().join("sub"))?;
    fs::write(root.path().join("sub").join("inner.txt"), vec![0u8; 7])?;
    fs::write(root.path().join("note.txt"), vec![0u8; 500])?;
    Ok(root)
}

/// Runs a text session over `root` and returns (final dir, stdout).
fn run_text(root: &Path, input: &str) -> Result<(String, String)> {
    let (nav, _) = Navigator::open(root)?;
    let mut shell = Shell::new(nav, Cursor::new(input.to_string()), TextRenderer::new(Vec::new()))?;
    shell.run()?;
    let current = shell.navigator().current_dir().to_string();
    let out = String::from_utf8(shell.into_renderer().into_inner())?;
    Ok((current, out))
}

#[test]
fn test_ls_prints_cached_listing() -> Result<()> {
    let root = fixture()?;
    let (_, out) = run_text(root.path(), "ls\nquit\n")?;
    let sub = out.find("  <DIR>    7  sub").expect("sub row");
    let note = out.find("  <FILE> 500  note.txt").expect("note row");
    assert!(sub < note);
    Ok(())
}

#[test]
fn test_commands_are_case_insensitive_and_indented() -> Result<()> {
    let root = fixture()?;
    let (_, out) = run_text(root.path(), "    LS\n")?;
    assert!(out.contains("(2 entries)"));
    Ok(())
}

#[test]
fn test_unknown_command_is_reported_and_loop_continues() -> Result<()> {
    let root = fixture()?;
    let (_, out) = run_text(root.path(), "frobnicate\nls\n")?;
    assert!(out.contains("error: unknown command: frobnicate"));
    assert!(out.contains("(2 entries)"));
    Ok(())
}

#[test]
fn test_cd_without_argument_is_ignored() -> Result<()> {
    let root = fixture()?;
    let (current, out) = run_text(root.path(), "cd\n")?;
    assert_eq!(current, root.path().to_string_lossy());
    assert!(!out.contains("error"));
    Ok(())
}

#[test]
fn test_cd_then_prompt_shows_new_directory() -> Result<()> {
    let root = fixture()?;
    let (current, out) = run_text(root.path(), "cd sub\nls\n")?;
    let sub = root.path().join("sub");
    assert_eq!(current, sub.to_string_lossy());
    assert!(out.contains(&format!("{}> ", sub.display())));
    assert!(out.contains("inner.txt"));
    Ok(())
}

#[test]
fn test_cd_to_missing_directory_reports_error() -> Result<()> {
    let root = fixture()?;
    let (current, out) = run_text(root.path(), "cd nosuchdir\nls\n")?;
    assert_eq!(current, root.path().to_string_lossy());
    assert!(out.contains("error: path not found: nosuchdir"));
    assert!(out.contains("note.txt"));
    Ok(())
}

#[test]
fn test_rec_lists_and_selects_by_index() -> Result<()> {
    let root = fixture()?;
    let (_, out) = run_text(root.path(), "cd sub\nrec\n2\n")?;
    let sub = root.path().join("sub");
    assert!(out.contains(&format!("  1. {}\n", root.path().display())));
    assert!(out.contains(&format!("  2. {}\n", sub.display())));
    assert!(out.contains("Directory number [1-2]: "));
    assert!(out.contains(&format!("{}:\n", sub.display())));
    Ok(())
}

#[test]
fn test_rec_out_of_range_is_recoverable() -> Result<()> {
    let root = fixture()?;
    let (_, out) = run_text(root.path(), "rec\n2\nls\n")?;
    assert!(out.contains("error: index 2 is out of range (1..=1)"));
    assert!(out.contains("(2 entries)"));
    Ok(())
}

#[test]
fn test_rec_rejects_non_numeric_index() -> Result<()> {
    let root = fixture()?;
    let (_, out) = run_text(root.path(), "rec\nfirst\n")?;
    assert!(out.contains("error: invalid index: \"first\""));
    Ok(())
}

#[test]
fn test_quit_stops_reading_input() -> Result<()> {
    let root = fixture()?;
    let (_, out) = run_text(root.path(), "quit\nls\n")?;
    assert!(!out.contains("entries)"));
    Ok(())
}

#[test]
fn test_help_lists_every_command() -> Result<()> {
    let root = fixture()?;
    let (_, out) = run_text(root.path(), "help\n")?;
    for usage in ["cd <path>", "help", "ls", "quit", "rec"] {
        assert!(out.contains(&format!("  {:<10} ", usage)), "missing {}", usage);
    }
    Ok(())
}

#[test]
fn test_json_session_emits_one_event_per_line() -> Result<()> {
    let root = fixture()?;
    let (nav, denied) = Navigator::open(root.path())?;
    let input = Cursor::new("ls\nbogus\n".to_string());
    let mut shell = Shell::new(nav, input, JsonRenderer::new(Vec::new()))?;
    shell.greet(true, &denied)?;
    shell.run()?;
    let out = String::from_utf8(shell.into_renderer().into_inner())?;

    let events: Vec<serde_json::Value> = out
        .lines()
        .map(serde_json::from_str)
        .collect::<std::result::Result<_, _>>()?;
    let kinds: Vec<&str> = events.iter().filter_map(|e| e["event"].as_str()).collect();
    assert_eq!(
        kinds,
        ["banner", "prompt", "listing", "prompt", "error", "prompt"]
    );
    assert_eq!(events[2]["entries"][0]["name"], "sub");
    assert_eq!(events[2]["entries"][0]["kind"], "directory");
    assert_eq!(events[4]["code"], "unknown_command");
    Ok(())
}

#[test]
fn test_invalid_utf8_line_is_reported_and_loop_continues() -> Result<()> {
    let root = fixture()?;
    let (nav, _) = Navigator::open(root.path())?;
    let input = Cursor::new(b"\xff\nls\n".to_vec());
    let mut shell = Shell::new(nav, input, TextRenderer::new(Vec::new()))?;
    shell.run()?;
    let out = String::from_utf8(shell.into_renderer().into_inner())?;
    assert!(out.contains("error: unknown command: \u{fffd}"));
    assert!(out.contains("(2 entries)"));
    Ok(())
}
