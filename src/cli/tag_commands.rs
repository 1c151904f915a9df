// src/cli/tag_commands.rs
use crossterm::style::Stylize;
use std::io::{self, Write};

use crate::cli::error::CliResult;
use crate::cli::CommandContext;
use crate::domain::tag::Tag;
use crate::util::helper::is_stdout_piped;

/// Most frequent first; ties keep alphabetical order
fn by_frequency(mut counts: Vec<(Tag, usize)>) -> Vec<(Tag, usize)> {
    counts.sort_by(|(_, count_a), (_, count_b)| count_b.cmp(count_a));
    counts
}

pub async fn show_tags(ctx: &CommandContext<'_>, counts: bool) -> CliResult<()> {
    let dashboard = ctx.signed_in_dashboard().await?;
    let color = ctx.color && !is_stdout_piped();
    let mut stdout = io::stdout().lock();

    if counts {
        let tag_counts = by_frequency(dashboard.tag_counts());
        if tag_counts.is_empty() {
            eprintln!("No tags found");
        }
        for (tag, count) in tag_counts {
            if color {
                writeln!(stdout, "{} ({})", tag.value().green(), count)?;
            } else {
                writeln!(stdout, "{} ({})", tag.value(), count)?;
            }
        }
    } else {
        let tags = dashboard.all_tags();
        if tags.is_empty() {
            eprintln!("No tags found");
        }
        for tag in tags {
            writeln!(stdout, "{}", tag)?;
        }
    }

    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_counts_when_by_frequency_then_most_used_first_with_stable_ties() {
        let tag = |v: &str| Tag::new(v).unwrap();
        let counts = vec![(tag("a"), 1), (tag("b"), 3), (tag("c"), 1), (tag("d"), 2)];

        let sorted: Vec<(String, usize)> = by_frequency(counts)
            .into_iter()
            .map(|(t, n)| (t.value().to_string(), n))
            .collect();

        assert_eq!(
            sorted,
            vec![
                ("b".to_string(), 3),
                ("d".to_string(), 2),
                ("a".to_string(), 1),
                ("c".to_string(), 1)
            ]
        );
    }
}
