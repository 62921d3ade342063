//! Episode file loading and the home listing

use crate::config::CatalogSettings;
use crate::error::Result;
use podcastr_core::{parse_episodes, Episode, EpisodeCatalog};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Read a JSON export of the episodes endpoint into a catalog
pub fn load_catalog(path: &Path, settings: &CatalogSettings) -> Result<EpisodeCatalog> {
    let json = std::fs::read_to_string(path)?;
    let episodes = parse_episodes(&json)?;
    info!(path = %path.display(), count = episodes.len(), "episodes loaded");

    let mut catalog = EpisodeCatalog::new(episodes, settings.latest_count);
    catalog.truncate(settings.limit);
    Ok(catalog)
}

/// Print latest episodes, then every episode with its queue index
pub fn write_catalog<W: Write>(catalog: &EpisodeCatalog, output: &mut W) -> std::io::Result<()> {
    writeln!(output, "Latest")?;
    for (index, episode) in catalog.latest().iter().enumerate() {
        write_row(output, index, episode)?;
    }

    writeln!(output)?;
    writeln!(output, "All episodes")?;
    for (row, episode) in catalog.others().iter().enumerate() {
        write_row(output, catalog.queue_index_of_other(row), episode)?;
    }

    Ok(())
}

fn write_row<W: Write>(output: &mut W, index: usize, episode: &Episode) -> std::io::Result<()> {
    writeln!(
        output,
        "{:>3}  {}  |  {}  |  {}  |  {}",
        index,
        episode.title,
        episode.members,
        episode.published_label().unwrap_or_else(|| "-".to_string()),
        episode.duration_as_string(),
    )
}
