use std::error::Error;

use clap::ValueEnum;
use pomodoro_garden_core::{Database, Locale, Preferences, Theme, Translator};

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

pub fn theme(choice: Option<ThemeChoice>) -> Result<(), Box<dyn Error>> {
    let db = Database::open()?;
    let mut prefs = Preferences::load(&db);

    match choice {
        Some(ThemeChoice::Light) => prefs.set_theme(&db, Theme::Light),
        Some(ThemeChoice::Dark) => prefs.set_theme(&db, Theme::Dark),
        Some(ThemeChoice::Toggle) => {
            prefs.toggle_theme(&db);
        }
        None => {}
    }

    println!(
        "{} ({})",
        prefs.theme,
        prefs.locale.translate(prefs.theme.toggle_label_key())
    );
    Ok(())
}

pub fn lang(locale: Option<Locale>) -> Result<(), Box<dyn Error>> {
    let db = Database::open()?;
    let mut prefs = Preferences::load(&db);

    if let Some(locale) = locale {
        prefs.set_locale(&db, locale);
    }

    println!("{} {}", prefs.locale, prefs.locale.translate("title"));
    Ok(())
}
