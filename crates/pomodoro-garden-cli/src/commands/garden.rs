use std::error::Error;

use clap::Subcommand;
use pomodoro_garden_core::{Config, GardenLayout, RewardKind};

use super::{open_session, print_json, save_timer};
use crate::render;
use crate::terminal::TerminalPresenter;

#[derive(Subcommand)]
pub enum GardenAction {
    /// Draw the garden
    Show {
        /// Ground grid width, overrides the configured column count
        #[arg(long)]
        columns: Option<u32>,
        /// Sky width in pixels
        #[arg(long, requires = "height")]
        width: Option<f64>,
        /// Sky height in pixels
        #[arg(long, requires = "width")]
        height: Option<f64>,
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Grow a reward without running the timer (tree, flower, butterfly)
    Add { kind: RewardKind },
    /// Name a tree; an empty name clears it
    Name { id: String, name: String },
    /// Remove everything from the garden
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub fn run(action: GardenAction) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let assume_yes = matches!(action, GardenAction::Clear { yes: true });
    let (mut session, caught_up) = open_session(&config, TerminalPresenter::new(assume_yes))?;
    if let Some(event) = &caught_up {
        print_json(event)?;
    }

    match action {
        GardenAction::Show {
            columns,
            width,
            height,
            json,
        } => {
            let snapshot = if columns.is_some() || width.is_some() {
                let layout = GardenLayout::new(
                    columns.unwrap_or(config.garden.columns),
                    width.unwrap_or(config.garden.sky_width_px),
                    height.unwrap_or(config.garden.sky_height_px),
                );
                session.resize(layout)
            } else {
                session.snapshot()
            };
            if json {
                print_json(&snapshot)?;
            } else {
                print!("{}", render::garden(&snapshot, &session.preferences().locale));
            }
        }
        GardenAction::Add { kind } => {
            session.add_reward(kind);
            if let Some(item) = session.garden().items().last() {
                print_json(item)?;
            }
        }
        GardenAction::Name { id, name } => {
            session.rename_tree(&id, &name)?;
            println!("ok");
        }
        GardenAction::Clear { .. } => {
            if session.clear_garden() {
                println!("garden cleared");
            } else {
                println!("garden kept");
            }
        }
    }

    save_timer(&session);
    Ok(())
}
