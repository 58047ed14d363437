use anyhow::Result;
use std::io::Write;
use todo_core::project::{DueStatus, RenderSink, Snapshot};

/// Human-readable listing.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> RenderSink for TextSink<W> {
    type Error = anyhow::Error;

    fn render(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        if snapshot.is_empty {
            writeln!(self.out, "No tasks to show.")?;
        }
        for entry in &snapshot.tasks {
            let task = entry.task;
            let mark = if task.completed { 'x' } else { ' ' };
            write!(
                self.out,
                "{:<8} [{}] {}  ({}",
                task.id.short(),
                mark,
                task.text,
                task.priority
            )?;
            if let Some(due) = task.due_date {
                write!(self.out, ", due {}", due)?;
            }
            write!(self.out, ")")?;
            match entry.due_status {
                DueStatus::Overdue => write!(self.out, " OVERDUE")?,
                DueStatus::DueToday => write!(self.out, " TODAY")?,
                DueStatus::None => {}
            }
            writeln!(self.out)?;
        }

        let stats = snapshot.stats;
        writeln!(
            self.out,
            "Total: {} | Active: {} | Completed: {}",
            stats.total, stats.active, stats.completed
        )?;
        if snapshot.has_completed {
            writeln!(self.out, "Run `clear-completed` to remove completed tasks.")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Snapshot as a single pretty JSON document.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> RenderSink for JsonSink<W> {
    type Error = anyhow::Error;

    fn render(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        writeln!(self.out, "{}", serde_json::to_string_pretty(snapshot)?)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Render to stdout in the requested format.
pub fn to_stdout(snapshot: &Snapshot<'_>, json: bool) -> Result<()> {
    let stdout = std::io::stdout().lock();
    if json {
        JsonSink::new(stdout).render(snapshot)
    } else {
        TextSink::new(stdout).render(snapshot)
    }
}
