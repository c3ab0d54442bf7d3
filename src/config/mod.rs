pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::CorruptFilePolicy;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use toml_config::{LoggingConfig, StoreConfig};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "place-journal")]
#[command(about = "Record places of interest in a local JSON journal")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory holding the places file (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Name of the places file inside the data directory
    #[arg(long, global = true)]
    pub file_name: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Fail instead of starting empty when the places file cannot be read"
    )]
    pub strict_load: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Print places as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Record a new place
    Add(PlaceArgs),
    /// List all places, newest first
    List,
    /// Show a single place
    Show { id: i64 },
    /// Change an existing place; fields not given keep their value
    Update {
        id: i64,
        #[command(flatten)]
        changes: UpdateArgs,
    },
    /// Remove a place
    Delete { id: i64 },
    /// Find places whose title, description or address contains the query
    Search { query: String },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct PlaceArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Path or URI of the photo
    #[arg(long)]
    pub image: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    #[arg(long)]
    pub address: Option<String>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Args)]
pub struct UpdateArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, conflicts_with = "clear_image")]
    pub image: Option<String>,

    #[arg(long, allow_negative_numbers = true, conflicts_with = "clear_location")]
    pub latitude: Option<f64>,

    #[arg(long, allow_negative_numbers = true, conflicts_with = "clear_location")]
    pub longitude: Option<f64>,

    #[arg(long, conflicts_with = "clear_address")]
    pub address: Option<String>,

    #[arg(long)]
    pub clear_image: bool,

    #[arg(long)]
    pub clear_location: bool,

    #[arg(long)]
    pub clear_address: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併設定檔與命令列參數，命令列優先
    pub fn store_config(&self) -> Result<StoreConfig> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::from_file(path)?,
            None => StoreConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = data_dir.clone();
        }
        if let Some(file_name) = &self.file_name {
            config.storage.file_name = file_name.clone();
        }
        if self.strict_load {
            config.storage.on_corrupt = CorruptFilePolicy::Fail;
        }
        if self.verbose {
            let logging = config.logging.get_or_insert(LoggingConfig {
                verbose: None,
                json: None,
            });
            logging.verbose = Some(true);
        }

        Ok(config)
    }
}
