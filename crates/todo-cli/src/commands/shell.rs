//! Line-oriented edit surface. Each line is one intent; the list is
//! re-rendered after every intent, and view parameters live for the session.

use super::{open_store, workspace};
use crate::render;
use anyhow::Result;
use chrono::NaiveDate;
use std::io::{self, BufRead, IsTerminal, Write};
use todo_core::error::CoreError;
use todo_core::id::TaskId;
use todo_core::intent::Intent;
use todo_core::task::parse_date;
use todo_core::theme::Theme;

const HELP: &str = "\
add <text>                 add a task
toggle <id>                mark done / not done
edit <id> [text]           change text (no text cancels)
due <id> [YYYY-MM-DD]      set or clear the due date
priority <id>              cycle low -> medium -> high
rm <id>                    delete a task
clear                      delete completed tasks
move <id> <target>         move a task into target's place (manual sort only)
status <all|active|completed>
filter-priority <all|low|medium|high>
search [text]              filter by text (no text clears)
sort <due|priority|manual> toggle a sort order
theme [dark|light]         set or toggle the theme
list | help | quit";

#[derive(Debug, PartialEq, Eq)]
enum Line {
    Intent(Intent),
    ToggleTheme,
    List,
    Help,
    Quit,
    Empty,
}

fn task_id(raw: &str, usage: &str) -> Result<TaskId, CoreError> {
    if raw.is_empty() {
        return Err(CoreError::InvalidCommand(format!("usage: {}", usage)));
    }
    TaskId::parse(raw)
}

fn parse_line(line: &str) -> Result<Line, CoreError> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let (first, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let tail = tail.trim();

    let intent = match word {
        "" => return Ok(Line::Empty),
        "list" | "ls" => return Ok(Line::List),
        "help" | "?" => return Ok(Line::Help),
        "quit" | "exit" => return Ok(Line::Quit),
        "add" => Intent::Add(rest.to_string()),
        "toggle" => Intent::ToggleComplete(task_id(rest, "toggle <id>")?),
        "edit" => Intent::EditText(task_id(first, "edit <id> [text]")?, tail.to_string()),
        "due" => {
            let id = task_id(first, "due <id> [YYYY-MM-DD]")?;
            let date = match tail {
                "" | "none" => None,
                s => Some(parse_date(s)?),
            };
            Intent::SetDueDate(id, date)
        }
        "priority" => Intent::CyclePriority(task_id(rest, "priority <id>")?),
        "rm" | "delete" => Intent::Remove(task_id(rest, "rm <id>")?),
        "clear" => Intent::ClearCompleted,
        "move" => Intent::Reorder {
            dragged: task_id(first, "move <id> <target>")?,
            target: task_id(tail, "move <id> <target>")?,
        },
        "status" => Intent::SetStatusFilter(rest.parse()?),
        "filter-priority" => Intent::SetPriorityFilter(rest.parse()?),
        "search" => Intent::SetSearch(rest.to_string()),
        "sort" => Intent::ToggleSort(rest.parse()?),
        "theme" if rest.is_empty() => return Ok(Line::ToggleTheme),
        "theme" => Intent::SetTheme(rest.parse()?),
        other => {
            return Err(CoreError::InvalidCommand(format!(
                "unknown command '{}' (try `help`)",
                other
            )))
        }
    };
    Ok(Line::Intent(intent))
}

fn set_theme(theme: Option<Theme>) -> Result<Theme> {
    let ws = workspace()?;
    let mut settings = ws.settings()?;
    settings.theme = theme.unwrap_or_else(|| settings.theme.toggle());
    ws.save_settings(&settings)?;
    Ok(settings.theme)
}

pub fn run(today: NaiveDate, json: bool) -> Result<()> {
    let mut store = open_store()?;
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();

    render::to_stdout(&store.snapshot(today), json)?;
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };

        let mut intent = match parse_line(&line?) {
            Ok(Line::Empty) => continue,
            Ok(Line::Quit) => break,
            Ok(Line::Help) => {
                println!("{}", HELP);
                continue;
            }
            Ok(Line::List) => {
                render::to_stdout(&store.snapshot(today), json)?;
                continue;
            }
            Ok(Line::ToggleTheme) => {
                println!("Theme: {}", set_theme(None)?);
                continue;
            }
            Ok(Line::Intent(Intent::SetTheme(theme))) => {
                println!("Theme: {}", set_theme(Some(theme))?);
                continue;
            }
            Ok(Line::Intent(intent)) => intent,
            Err(e) => {
                eprintln!("error: {}", e);
                continue;
            }
        };

        if let Err(e) = store.resolve(&mut intent) {
            eprintln!("error: {}", e);
            continue;
        }
        let is_mutation = intent.is_mutation();
        let outcome = store.apply(intent)?;
        if is_mutation && !outcome.persisted {
            eprintln!("(no change)");
        }
        render::to_stdout(&store.snapshot(today), json)?;
    }
    Ok(())
}
