use clap::{Args, ValueEnum};
use ft_core::{FixedDelay, Result};
use ft_storage::ArticleTemplate;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::registry::SourceRegistry;

/// Duration written as `1500ms`, `2s`, `1m30s` or a bare number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_millis = 0u64;
        let mut number = String::new();
        let mut unit = String::new();
        let mut has_value = false;

        let mut flush = |number: &mut String, unit: &mut String| -> std::result::Result<(), String> {
            if number.is_empty() {
                return if unit.is_empty() {
                    Ok(())
                } else {
                    Err(format!("Missing number before unit: {}", unit))
                };
            }
            let value: u64 = number
                .parse()
                .map_err(|_| format!("Invalid number in duration: {}", number))?;
            let scale = match unit.as_str() {
                "ms" => 1,
                "" | "s" => 1_000,
                "m" => 60_000,
                "h" => 3_600_000,
                other => return Err(format!("Invalid duration unit: {}", other)),
            };
            total_millis = value
                .checked_mul(scale)
                .and_then(|millis| total_millis.checked_add(millis))
                .ok_or_else(|| "Duration too large".to_string())?;
            has_value = true;
            number.clear();
            unit.clear();
            Ok(())
        };

        for c in s.trim().chars() {
            if c.is_ascii_digit() {
                if !unit.is_empty() {
                    flush(&mut number, &mut unit)?;
                }
                number.push(c);
            } else if c.is_ascii_alphabetic() {
                unit.push(c);
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }
        flush(&mut number, &mut unit)?;

        if !has_value {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_millis(total_millis)))
    }
}

/// Options shared by the commands that run the feed pipeline.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// JSON file with the feed list, replacing the built-in one
    #[arg(long)]
    pub sources: Option<PathBuf>,

    /// Pause between articles (e.g. 1500ms, 2s)
    #[arg(long)]
    pub delay: Option<HumanDuration>,
}

/// The three ways the pipeline is run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Daily space and earth news, bilingual frontmatter files
    News,
    /// News plus filtered Islamic and AI feeds; clears old files first
    Landing,
    /// Malay digest of the newest NASA items
    Agent,
}

impl Variant {
    pub fn default_delay(&self) -> Duration {
        match self {
            Variant::News => Duration::from_millis(1_500),
            Variant::Landing => Duration::from_millis(3_000),
            Variant::Agent => Duration::from_millis(2_000),
        }
    }

    pub fn registry(&self) -> SourceRegistry {
        match self {
            Variant::News => SourceRegistry::news(),
            Variant::Landing => SourceRegistry::landing(),
            Variant::Agent => SourceRegistry::agent(),
        }
    }

    pub fn template(&self) -> ArticleTemplate {
        match self {
            Variant::News | Variant::Landing => ArticleTemplate::Frontmatter,
            Variant::Agent => ArticleTemplate::Digest,
        }
    }

    pub fn cleans_output(&self) -> bool {
        matches!(self, Variant::Landing)
    }
}

impl RunArgs {
    pub fn pacer(&self, variant: Variant) -> FixedDelay {
        FixedDelay::new(self.delay.map(|d| d.0).unwrap_or_else(|| variant.default_delay()))
    }

    /// The registry file if one was given, else the variant's preset.
    pub async fn registry(&self, variant: Variant) -> Result<SourceRegistry> {
        match &self.sources {
            Some(path) => SourceRegistry::load(path).await,
            None => Ok(variant.registry()),
        }
    }
}
