use super::open_store;
use crate::render;
use anyhow::Result;
use chrono::NaiveDate;
use todo_core::project::Stats;

pub fn run(
    status: String,
    priority: String,
    search: String,
    sort: String,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let mut store = open_store()?;
    store.set_status_filter(status.parse()?);
    store.set_priority_filter(priority.parse()?);
    store.set_search(&search);
    store.set_sort(sort.parse()?);

    render::to_stdout(&store.snapshot(today), json)
}

pub fn stats(json: bool) -> Result<()> {
    let store = open_store()?;
    let stats = Stats::of(store.tasks());

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }
    println!(
        "Total: {} | Active: {} | Completed: {}",
        stats.total, stats.active, stats.completed
    );
    Ok(())
}
