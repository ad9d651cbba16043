//! Genre catalog listing.

use novelwriter::{NovelwriterConfig, NovelwriterResult};
use std::path::Path;

/// Print every genre with its subgenres.
pub fn list_genres(config: Option<&Path>) -> NovelwriterResult<()> {
    let config = NovelwriterConfig::load_with_override(config)?;
    for entry in &config.genres {
        println!("{}", entry.name);
        for subgenre in &entry.subgenres {
            println!("  - {}", subgenre);
        }
    }
    Ok(())
}
