use std::path::PathBuf;

use dongmap::Metric;

/// District population join and kidsroom store
#[derive(clap::Parser, Debug)]
#[command(name = "dongmap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// JSON configuration file; flags override its values
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Join district boundaries with population and derive area and density
    Align(AlignArgs),

    /// Manage the kidsroom location list
    Kidsroom(KidsroomArgs),
}

#[derive(clap::Args, Debug)]
pub struct AlignArgs {
    /// Demographic table (CSV, UTF-8 or EUC-KR)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub csv: Option<PathBuf>,

    /// District boundaries (GeoJSON)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub geo: Option<PathBuf>,

    /// Keep boundaries whose region name contains this
    #[arg(short, long)]
    pub region: Option<String>,

    /// Value to report a range for: population or density
    #[arg(short, long, default_value = "population")]
    pub metric: Metric,

    /// Write the joined table as GeoJSON
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct KidsroomArgs {
    /// Kidsroom JSON file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub action: KidsroomAction,
}

#[derive(clap::Subcommand, Debug)]
pub enum KidsroomAction {
    /// Print all entries with their indices
    List,

    /// Append an entry
    Add {
        /// Street address
        address: String,
        /// Latitude in degrees
        #[arg(allow_hyphen_values = true, value_parser = finite_coordinate)]
        lat: f64,
        /// Longitude in degrees
        #[arg(allow_hyphen_values = true, value_parser = finite_coordinate)]
        lon: f64,
        /// Display name, defaults to the last word of the address
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Delete the entry at INDEX
    Remove { index: usize },

    /// Overwrite fields of the entry at INDEX; unparsable coordinates are ignored
    Update {
        index: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<String>,
    },

    /// Print the SHA-256 of the stored file
    Fingerprint,
}

fn finite_coordinate(text: &str) -> Result<f64, String> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(value) => Err(format!("{value} is not a finite coordinate")),
        Err(e) => Err(e.to_string()),
    }
}
