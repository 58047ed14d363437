use super::workspace;
use anyhow::Result;
use todo_core::theme::Theme;

pub fn run(mode: Option<String>) -> Result<()> {
    let ws = workspace()?;
    let mut settings = ws.settings()?;
    settings.theme = match mode {
        Some(mode) => mode.parse::<Theme>()?,
        None => settings.theme.toggle(),
    };
    ws.save_settings(&settings)?;
    println!("Theme: {}", settings.theme);
    Ok(())
}
