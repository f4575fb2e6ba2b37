use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "colosseum-pool match and rating backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Apply pending migrations and start the backend server
    Serve {
        /// Port number (optional, defaults to 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
    /// Apply pending database migrations and exit
    Migrate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["colosseum_pool", "serve", "--port", "9100"]).unwrap();
        assert_eq!(cli.command, Command::Serve { port: 9100 });
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["colosseum_pool", "serve"]).unwrap();
        assert_eq!(cli.command, Command::Serve { port: 8000 });

        let cli = Cli::try_parse_from(["colosseum_pool", "migrate"]).unwrap();
        assert_eq!(cli.command, Command::Migrate);
    }
}
