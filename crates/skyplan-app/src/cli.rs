use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "skyplan", version, about = "Browse and edit flight planning data")]
pub struct Cli {
    /// Verbose logging on stderr
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a resource as a table
    List {
        resource: ResourceKind,

        /// Keep rows containing this text in a searched column
        #[arg(short, long)]
        search: Option<String>,

        /// Apply the filter with this title (repeatable)
        #[arg(short, long = "filter")]
        filters: Vec<String>,

        /// Click the sort control of this column; twice reverses (repeatable)
        #[arg(long = "sort")]
        sort: Vec<String>,

        /// Page to show
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Print one entity as JSON
    Show { resource: ResourceKind, id: i64 },
    /// Create an entity from a JSON draft
    Create {
        resource: ResourceKind,

        /// Draft fields as a JSON object
        #[arg(short, long)]
        data: String,
    },
    /// Replace the editable fields of an entity
    Update {
        resource: ResourceKind,
        id: i64,

        /// Draft fields as a JSON object
        #[arg(short, long)]
        data: String,
    },
    /// Delete one entity, if its row offers deleting
    Delete { resource: ResourceKind, id: i64 },
    /// Print the weight and balance computed for a flight
    WeightBalance { flight_id: i64 },
    /// Print the settings file location and contents
    Config {
        /// Write a settings file with the defaults if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Aircraft,
    Aerodromes,
    Waypoints,
    Passengers,
    Flights,
    Users,
}

impl ResourceKind {
    /// Singular name for messages
    pub fn singular(&self) -> &'static str {
        match self {
            Self::Aircraft => "Aircraft profile",
            Self::Aerodromes => "Aerodrome",
            Self::Waypoints => "Waypoint",
            Self::Passengers => "Passenger",
            Self::Flights => "Flight",
            Self::Users => "User",
        }
    }
}
