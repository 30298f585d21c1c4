use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "prefs",
    about = "Inspect and edit preference files",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file; flags below override it
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the preferences file
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Preferences name (file name without extension)
    #[arg(short, long, global = true)]
    pub name: Option<String>,

    /// JSON backend used by object commands
    #[arg(long, global = true)]
    pub serializer: Option<SerializerArg>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SerializerArg {
    SerdeJson,
    SimdJson,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every stored entry
    List,
    /// Print a string value
    Get(KeyArgs),
    /// Store a string value
    Set(SetArgs),
    /// Remove a key, including an ordered set stored there
    Remove(KeyArgs),
    /// Check whether a key holds a value or an ordered set
    Contains(KeyArgs),
    /// Remove every entry
    Clear,
    /// Print an ordered string set
    ListGet(KeyArgs),
    /// Store an ordered string set
    ListSet(ListSetArgs),
    /// Print a serialized object
    ObjectGet(KeyArgs),
    /// Store a JSON object
    ObjectSet(ObjectSetArgs),
}

#[derive(Args)]
pub struct KeyArgs {
    pub key: String,
}

#[derive(Args)]
pub struct SetArgs {
    pub key: String,
    pub value: String,
}

#[derive(Args)]
pub struct ListSetArgs {
    pub key: String,
    pub values: Vec<String>,
}

#[derive(Args)]
pub struct ObjectSetArgs {
    pub key: String,
    /// JSON text of the value
    pub json: String,
}
