use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// City Chamber Hunt - find places, collect photos, export a report
#[derive(Parser, Debug)]
#[command(name = "hunt")]
#[command(about = "Find places, collect photos and export a hunt report", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding photos, maps, reports and hunt.toml
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Comma separated ISO country codes to restrict searches to ("" for worldwide)
    #[arg(long, global = true, value_name = "CODES")]
    pub country_codes: Option<String>,

    /// Maximum number of search results (1-50)
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub limit: Option<u32>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for places
    Search(SearchArgs),

    /// Attach a camera or library photo to a search result
    Attach(AttachArgs),

    /// Fetch a stock photo for a result that has none
    Fallback(PickArgs),

    /// Preload map snapshots for every search result
    Maps(SearchArgs),

    /// Preload maps and export the PDF report for a search
    Export(SearchArgs),

    /// List stored photos
    Photos,

    /// Remove the stored photo of a search result
    Forget(PickArgs),

    /// Show configuration and storage status
    Status,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Free-text place query (e.g., "bakery Toronto")
    pub query: String,
}

#[derive(Parser, Debug)]
pub struct PickArgs {
    /// Free-text place query
    pub query: String,

    /// Result number as listed by `hunt search`
    #[arg(long, default_value_t = 1)]
    pub pick: usize,
}

#[derive(Parser, Debug)]
pub struct AttachArgs {
    /// Free-text place query
    pub query: String,

    /// Result number as listed by `hunt search`
    #[arg(long, default_value_t = 1)]
    pub pick: usize,

    /// Image file to attach
    #[arg(long, value_name = "PATH")]
    pub file: PathBuf,

    /// Treat the file as a camera capture rather than a library pick
    #[arg(long)]
    pub camera: bool,

    /// The capture came from the front-facing camera
    #[arg(long, requires = "camera")]
    pub front_facing: bool,

    /// EXIF orientation of the capture (1-8); read from the file when omitted
    #[arg(long, requires = "camera", value_parser = clap::value_parser!(u32).range(1..=8))]
    pub orientation: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_attach_camera_flags() {
        let cli = Cli::try_parse_from([
            "hunt",
            "attach",
            "bakery",
            "--pick",
            "2",
            "--file",
            "selfie.jpg",
            "--camera",
            "--front-facing",
            "--orientation",
            "6",
        ])
        .unwrap();

        let Commands::Attach(args) = cli.command else {
            panic!("expected attach")
        };
        assert_eq!(args.pick, 2);
        assert!(args.camera && args.front_facing);
        assert_eq!(args.orientation, Some(6));
    }

    #[test]
    fn test_front_facing_requires_camera() {
        let result =
            Cli::try_parse_from(["hunt", "attach", "bakery", "--file", "a.jpg", "--front-facing"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_orientation_range() {
        let result = Cli::try_parse_from([
            "hunt", "attach", "x", "--file", "a.jpg", "--camera", "--orientation", "9",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["hunt", "photos", "--json", "--data-dir", "/tmp/hunt"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/hunt")));
    }
}
