use anyhow::{Context, Result};
use dongmap::{KidsroomEntry, KidsroomPatch, KidsroomStore};

use crate::cli::{Cli, KidsroomAction, KidsroomArgs};
use crate::config::DashboardConfig;

pub fn run(cli: &Cli, args: &KidsroomArgs) -> Result<()> {
    let config = DashboardConfig::load(cli.config.as_deref())?;
    let store = KidsroomStore::new(args.store.clone().unwrap_or(config.kidsroom_store));
    let mut entries = store.load();

    match &args.action {
        KidsroomAction::List => {
            if entries.is_empty() {
                println!("no kidsrooms in {}", store.path().display());
            }
            for (idx, entry) in entries.iter().enumerate() {
                println!("{idx}\t{}\t{}\t({:.6}, {:.6})", entry.name, entry.address, entry.lat, entry.lon);
            }
        }
        KidsroomAction::Add { address, lat, lon, name } => {
            let name = name.clone().unwrap_or_else(|| KidsroomEntry::name_from_address(address));
            store.add(&mut entries, KidsroomEntry::new(name.clone(), address.clone(), *lat, *lon))
                .context("[kidsroom] Failed to add entry")?;
            println!("added {name} ({lat:.6}, {lon:.6})");
        }
        KidsroomAction::Remove { index } => {
            let removed = store.remove(&mut entries, *index)
                .with_context(|| format!("[kidsroom] Failed to remove entry {index}"))?;
            println!("removed {}", removed.name);
        }
        KidsroomAction::Update { index, name, address, lat, lon } => {
            let patch = KidsroomPatch { name: name.clone(), address: address.clone(), lat: lat.clone(), lon: lon.clone() };
            store.update(&mut entries, *index, &patch)
                .with_context(|| format!("[kidsroom] Failed to update entry {index}"))?;
            let entry = &entries[*index];
            println!("updated {index}: {} - {} ({:.6}, {:.6})", entry.name, entry.address, entry.lat, entry.lon);
        }
        KidsroomAction::Fingerprint => {
            println!("{}", store.content_fingerprint().as_deref().unwrap_or("absent"));
        }
    }

    Ok(())
}
