use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Number of items to add before the prompt appears
    #[clap(short = 'n', long, default_value_t = 0, help = "items to pre-populate")]
    items: usize,

    /// Log level for diagnostics
    /// One of: error, warn, info, debug, trace. Default is 'error'.
    #[clap(short = 'l', long, default_value = "error", help = "log level")]
    log_level: String,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    items: usize,
    log_level: String,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        let args = ClapArgs::parse();
        Self {
            items: args.items,
            log_level: args.log_level,
        }
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = ClapArgs::parse_from(itr);
        Self {
            items: args.items,
            log_level: args.log_level,
        }
    }

    pub fn items(&self) -> usize {
        self.items
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}
