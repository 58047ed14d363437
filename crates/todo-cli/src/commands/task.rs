//! One-shot list mutations. Each resolves its id arguments, applies a
//! single change and reports what happened.

use super::open_store;
use anyhow::Result;
use chrono::NaiveDate;

pub fn add(text: String) -> Result<()> {
    let mut store = open_store()?;
    match store.add(&text)? {
        Some(id) => println!("Added {}", id.short()),
        None => println!("Nothing added (empty text)."),
    }
    Ok(())
}

pub fn toggle(id: String) -> Result<()> {
    let mut store = open_store()?;
    let id = store.find(&id)?;
    store.toggle_complete(&id)?;
    if let Some(task) = store.get(&id) {
        let state = if task.completed { "done" } else { "not done" };
        println!("{} marked {}", id.short(), state);
    }
    Ok(())
}

pub fn edit(id: String, text: String) -> Result<()> {
    let mut store = open_store()?;
    let id = store.find(&id)?;
    store.edit_text(&id, &text)?;
    if let Some(task) = store.get(&id) {
        println!("{} {}", id.short(), task.text);
    }
    Ok(())
}

pub fn due(id: String, date: Option<NaiveDate>) -> Result<()> {
    let mut store = open_store()?;
    let id = store.find(&id)?;
    store.set_due_date(&id, date)?;
    match date {
        Some(date) => println!("{} due {}", id.short(), date),
        None => println!("{} has no due date", id.short()),
    }
    Ok(())
}

pub fn priority(id: String) -> Result<()> {
    let mut store = open_store()?;
    let id = store.find(&id)?;
    store.cycle_priority(&id)?;
    if let Some(task) = store.get(&id) {
        println!("{} priority {}", id.short(), task.priority);
    }
    Ok(())
}

pub fn remove(id: String) -> Result<()> {
    let mut store = open_store()?;
    let id = store.find(&id)?;
    store.remove(&id)?;
    println!("Removed {}", id.short());
    Ok(())
}

pub fn clear_completed() -> Result<()> {
    let mut store = open_store()?;
    let removed = store.clear_completed()?;
    println!("Removed {} completed task(s)", removed);
    Ok(())
}

pub fn reorder(dragged: String, target: String) -> Result<()> {
    let mut store = open_store()?;
    let dragged = store.find(&dragged)?;
    let target = store.find(&target)?;
    if store.reorder(&dragged, &target)? {
        println!("Moved {} to {}'s place", dragged.short(), target.short());
    } else {
        println!("Order unchanged");
    }
    Ok(())
}
