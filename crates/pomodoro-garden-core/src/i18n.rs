//! Built-in translations.
//!
//! Lookups never fail: a key missing from the table translates to itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Key-to-text lookup consumed by the session coordinator.
pub trait Translator {
    fn translate<'a>(&self, key: &'a str) -> &'a str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    Pt,
    En,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::Pt => "pt",
            Locale::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        code.parse().ok()
    }

    /// Unsupported or missing codes fall back to the default locale.
    pub fn from_code_or_default(code: Option<&str>) -> Self {
        code.and_then(Self::from_code).unwrap_or_default()
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::Es => ES,
            Locale::Pt => PT,
            Locale::En => EN,
        }
    }
}

impl Translator for Locale {
    fn translate<'a>(&self, key: &'a str) -> &'a str {
        self.table()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or(key)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "es" => Ok(Locale::Es),
            "pt" => Ok(Locale::Pt),
            "en" => Ok(Locale::En),
            other => Err(ValidationError::UnsupportedLocale(other.to_string())),
        }
    }
}

const ES: &[(&str, &str)] = &[
    ("title", "🍅 Jardín Pomodoro"),
    ("subtitle", "Concéntrate y cultiva tu bosque"),
    ("mode_focus", "Enfoque"),
    ("mode_short", "Descanso Corto"),
    ("mode_long", "Descanso Largo"),
    ("status_ready", "Listo para cultivar"),
    ("status_growing", "Creciendo..."),
    ("status_paused", "En pausa"),
    ("btn_start", "Comenzar"),
    ("btn_pause", "Pausar"),
    ("btn_resume", "Continuar"),
    ("legend_title", "Tu Recompensa:"),
    ("legend_tree", "25 min = Árbol Frutal"),
    ("legend_flower", "5 min = Flor"),
    ("legend_butterfly", "15 min = Mariposa (Vuela)"),
    ("garden_title", "Tu Jardín"),
    ("reset_btn", "Reiniciar Jardín (Borrar todo)"),
    (
        "clear_confirm",
        "¿Estás seguro de que quieres talar todo tu bosque? Esta acción no se puede deshacer.",
    ),
    (
        "mode_change_confirm",
        "El temporizador está corriendo. ¿Quieres detenerlo y cambiar de modo?",
    ),
    ("alert_tree", "¡Tiempo completado! Has cultivado: Un Árbol"),
    ("alert_flower", "¡Tiempo completado! Has cultivado: Una Flor"),
    ("alert_butterfly", "¡Tiempo completado! Has cultivado: Una Mariposa"),
    ("plants_label", "Plantas"),
    ("butterflies_label", "Mariposas"),
    ("toggle_to_dark", "🌚 Oscuro"),
    ("toggle_to_light", "🌞 Claro"),
    ("name_prompt", "Nombre del árbol:"),
];

const PT: &[(&str, &str)] = &[
    ("title", "🍅 Jardim Pomodoro"),
    ("subtitle", "Concentre-se e cultive sua floresta"),
    ("mode_focus", "Foco"),
    ("mode_short", "Pausa Curta"),
    ("mode_long", "Pausa Longa"),
    ("status_ready", "Pronto para cultivar"),
    ("status_growing", "Crescendo..."),
    ("status_paused", "Pausado"),
    ("btn_start", "Começar"),
    ("btn_pause", "Pausar"),
    ("btn_resume", "Continuar"),
    ("legend_title", "Sua Recompensa:"),
    ("legend_tree", "25 min = Árvore Frutífera"),
    ("legend_flower", "5 min = Flor"),
    ("legend_butterfly", "15 min = Borboleta (Voa)"),
    ("garden_title", "Seu Jardim"),
    ("reset_btn", "Reiniciar Jardim (Apagar tudo)"),
    (
        "clear_confirm",
        "Tem certeza que deseja derrubar todo o bosque? Esta ação não pode ser desfeita.",
    ),
    (
        "mode_change_confirm",
        "O temporizador está em execução. Deseja parar e trocar o modo?",
    ),
    ("alert_tree", "Tempo concluído! Você cultivou: Uma Árvore"),
    ("alert_flower", "Tempo concluído! Você cultivou: Uma Flor"),
    ("alert_butterfly", "Tempo concluído! Você cultivou: Uma Borboleta"),
    ("plants_label", "Plantas"),
    ("butterflies_label", "Borboletas"),
    ("toggle_to_dark", "🌚 Escuro"),
    ("toggle_to_light", "🌞 Claro"),
    ("name_prompt", "Nome da árvore:"),
];

const EN: &[(&str, &str)] = &[
    ("title", "🍅 Pomodoro Garden"),
    ("subtitle", "Focus and grow your forest"),
    ("mode_focus", "Focus"),
    ("mode_short", "Short Break"),
    ("mode_long", "Long Break"),
    ("status_ready", "Ready to grow"),
    ("status_growing", "Growing..."),
    ("status_paused", "Paused"),
    ("btn_start", "Start"),
    ("btn_pause", "Pause"),
    ("btn_resume", "Resume"),
    ("legend_title", "Your Reward:"),
    ("legend_tree", "25 min = Fruit Tree"),
    ("legend_flower", "5 min = Flower"),
    ("legend_butterfly", "15 min = Butterfly (Flies)"),
    ("garden_title", "Your Garden"),
    ("reset_btn", "Reset Garden (Erase all)"),
    (
        "clear_confirm",
        "Are you sure you want to clear the forest? This action cannot be undone.",
    ),
    (
        "mode_change_confirm",
        "The timer is running. Do you want to stop and change mode?",
    ),
    ("alert_tree", "Time complete! You cultivated: A Tree"),
    ("alert_flower", "Time complete! You cultivated: A Flower"),
    ("alert_butterfly", "Time complete! You cultivated: A Butterfly"),
    ("plants_label", "Plants"),
    ("butterflies_label", "Butterflies"),
    ("toggle_to_dark", "🌚 Dark"),
    ("toggle_to_light", "🌞 Light"),
    ("name_prompt", "Tree name:"),
];
