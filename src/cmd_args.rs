use crate::browser::models::StatusFilter;
use crate::config::DEFAULT_DEBOUNCE_MS;
use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// API base URL. Falls back to CATALOG_API_URL, then the public API.
    #[clap(short = 'u', long, help = "catalog API base URL")]
    base_url: Option<String>,

    /// Status filter applied before the first search
    #[clap(short = 's', long, default_value = "any", help = "alive, dead, unknown or any")]
    status: StatusFilter,

    /// Quiet interval before a typed search term is sent
    #[clap(long, default_value_t = DEFAULT_DEBOUNCE_MS, help = "search debounce in milliseconds")]
    debounce_ms: u64,

    #[clap(short = 'v', long, help = "verbose logging")]
    verbose: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    base_url: Option<String>,
    status: StatusFilter,
    debounce_ms: u64,
    verbose: bool,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    fn from_clap(args: ClapArgs) -> Self {
        Self {
            base_url: args.base_url,
            status: args.status,
            debounce_ms: args.debounce_ms,
            verbose: args.verbose,
        }
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    pub fn debounce_ms(&self) -> u64 {
        self.debounce_ms
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
