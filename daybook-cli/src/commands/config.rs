use anyhow::Result;
use chrono::Weekday;
use daybook_core::config::DaybookConfig;
use daybook_core::GridPadding;
use owo_colors::OwoColorize;

pub fn run(
    mut config: DaybookConfig,
    week_start: Option<Weekday>,
    grid_padding: Option<GridPadding>,
) -> Result<()> {
    let config_path = DaybookConfig::config_path()?;

    if week_start.is_some() || grid_padding.is_some() {
        if let Some(week_start) = week_start {
            config.week_start = week_start;
        }
        if let Some(grid_padding) = grid_padding {
            config.grid_padding = grid_padding;
        }
        config.save()?;
        println!("{}", "  Saved settings".green());
        println!();
    }

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Events:  {}", config.slot().path_for(&config.slot_key).display());
    println!();
    println!("{}", "Grid".bold());
    println!("  Week start:  {}", config.week_start);
    println!("  Padding:     {}", config.grid_padding);

    Ok(())
}
