use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "osm-fetch")]
#[command(about = "Fetch map data, elements, history, changesets and users from the OSM API", long_about = None)]
pub struct Cli {
    /// Directory containing osm-client.toml (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Directory for osm-fetch.log (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log everything, including request URLs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Download everything inside a bounding box
    Map {
        /// minLon,minLat,maxLon,maxLat
        #[arg(allow_hyphen_values = true)]
        bbox: String,
    },
    /// Fetch a single node, way or relation
    Element {
        /// Element reference, e.g. node/123 or w42
        id: String,

        /// Return the raw XML document instead of the normalized element
        #[arg(long)]
        xml: bool,
    },
    /// Fetch every version of an element
    History {
        /// Element reference, e.g. way/42
        id: String,

        /// Replace changeset ids with the changeset details
        #[arg(long)]
        changesets: bool,
    },
    /// Fetch changesets by id
    Changesets {
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        ids: Vec<String>,
    },
    /// Fetch a user's public profile
    User { id: String },
}
