//! Asset register library exports

use clap::ValueEnum;

use crate::core::theme::Theme;

pub mod core;
pub mod platform;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// `--theme` values. Kept apart from `core::theme::Theme` so the core stays
/// free of CLI types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
}

impl From<ThemeChoice> for Theme {
    fn from(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Light => Theme::Light,
            ThemeChoice::Dark => Theme::Dark,
        }
    }
}
