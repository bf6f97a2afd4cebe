use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;

use linken_constants::LINK_DIR;

pub struct ListHandler;

impl ListHandler {
    pub fn handle(dests: &[PathBuf]) -> Result<()> {
        for dest in dests {
            match linken_core::list_links(dest)? {
                None => {
                    linken_logger::info(&format!("{}: no {LINK_DIR} directory", dest.display()));
                }
                Some(links) if links.is_empty() => {
                    linken_logger::info(&format!("{}: no linked modules", dest.display()));
                }
                Some(links) => {
                    linken_logger::info(&format!(
                        "{}: {} linked module{}",
                        dest.display(),
                        links.len(),
                        if links.len() == 1 { "" } else { "s" }
                    ));
                    for link in links {
                        println!(
                            "  {} {} {}",
                            link.name.bright_white(),
                            "->".bright_black(),
                            link.target.display().to_string().bright_black()
                        );
                    }
                }
            }
        }

        Ok(())
    }
}
