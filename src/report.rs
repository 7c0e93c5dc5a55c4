use crate::error::Result;
use crate::types::KingsStatistics;
use std::fmt::Write;

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// The four questions, each followed by its answer
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

pub fn render(stats: &KingsStatistics, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(stats)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
    }
}

pub fn render_text(stats: &KingsStatistics) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = writeln!(out, "1. How many monarchs are there in the list?");
    let _ = writeln!(out, "{}", stats.kings_count);
    let _ = writeln!(out, "2. Which monarch ruled the longest (and for how long)?");
    let _ = writeln!(
        out,
        "Name: {} Years: {}",
        stats.longest_ruling_monarch.name, stats.longest_ruling_monarch.years
    );
    let _ = writeln!(out, "3. Which house ruled the longest (and for how long)?");
    let _ = writeln!(
        out,
        "Name: {} Years: {}",
        stats.longest_ruling_house.name, stats.longest_ruling_house.years
    );
    let _ = writeln!(out, "4. What was the most common first name?");
    let _ = writeln!(out, "{}", stats.most_common_first_name);
    out
}
