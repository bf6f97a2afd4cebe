use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use linken_core::LinkOptions;

use crate::commands::LinkArgs;

pub struct LinkHandler;

impl LinkHandler {
    pub fn handle(args: &LinkArgs, unlink: bool, debug: bool, quiet: bool) -> Result<()> {
        let verb = if unlink { "unlink" } else { "link" };
        if !quiet {
            Self::print_header(verb);
        }

        let options = LinkOptions::new().with_unlink(unlink).with_debug(debug);

        let report = linken_core::run(args.sources.as_slice(), args.dests.as_slice(), options)
            .with_context(|| format!("Failed to {verb} modules"))?;

        let total = report.total_affected();
        linken_logger::finish(&format!(
            "{}ed {total} module{} in {} project{}",
            capitalize(verb),
            if total == 1 { "" } else { "s" },
            report.consumers.len(),
            if report.consumers.len() == 1 { "" } else { "s" },
        ));

        Ok(())
    }

    fn print_header(verb: &str) {
        println!("{} {}", "linken".bright_cyan().bold(), verb.bright_white());
        println!();
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("link"), "Link");
        assert_eq!(capitalize("unlink"), "Unlink");
        assert_eq!(capitalize(""), "");
    }
}
