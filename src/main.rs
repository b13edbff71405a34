use clap::Parser;
use dialoguer::{Input, Select};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use thiserror::Error;
use tv_rating_guide::{
    ChartMode, Controller, DEFAULT_BASE_URL, GuideOptions, MissingRating, ProgressEvent,
    RatingGuideError, SeriesFetcher, SubmitOutcome, View, points_json, rate_series, save_chart,
};

/// Chart the average rating of every season of a tv series
#[derive(Parser, Debug)]
#[command(name = "tv-rating-guide", version, about)]
struct Args {
    /// Name of the show to look up; omit it to start an interactive session
    query: Option<String>,

    /// Start an interactive session even if a query is given
    #[arg(short, long)]
    interactive: bool,

    /// Render a radar chart instead of a line chart
    #[arg(short, long)]
    radar: bool,

    /// Directory the chart SVG files are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Leave unrated episodes out of the season averages instead of counting them as 0
    #[arg(long)]
    exclude_unrated: bool,

    /// Root URL of the TVMaze API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Also print the chart points as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn guide_options(&self) -> GuideOptions {
        GuideOptions {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            missing_rating: if self.exclude_unrated {
                MissingRating::Exclude
            } else {
                MissingRating::AsZero
            },
            chart_mode: if self.radar {
                ChartMode::Radar
            } else {
                ChartMode::Line
            },
            output_dir: self.output_dir.clone(),
            ..GuideOptions::default()
        }
    }
}

/// Errors of the interactive session
#[derive(Debug, Error)]
enum CliError {
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Guide(#[from] RatingGuideError),
}

/// Handles progress events and prints formatted output to stdout
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::Searching { query } => {
            println!("Searching TVMaze for '{}'...", query);
        }
        ProgressEvent::SeriesFetched {
            series_name,
            episode_count,
        } => {
            println!("Found '{}' with {} episode(s)", series_name, episode_count);
        }
        ProgressEvent::SearchFailed { message, detail } => match detail {
            Some(detail) => println!("{} ({})", message, detail),
            None => println!("{}", message),
        },
        ProgressEvent::StaleResponseDiscarded { query } => {
            println!("Ignoring outdated results for '{}'", query);
        }
        ProgressEvent::RenderingChart { mode } => {
            println!("Rendering {}...", mode);
        }
        ProgressEvent::ChartWritten { path } => {
            println!("Chart saved to {}", path.display());
        }
    }
}

/// Prints the chart region: a notice, or the season table of the chart
fn print_view(view: &View) {
    match view {
        View::Nothing => {}
        View::Error(_) | View::TooFewSeasons => {
            if let Some(notice) = view.notice() {
                println!("\n{}\n", notice);
            }
        }
        View::Chart {
            title,
            mode,
            points,
        } => {
            println!("\n=== {} ({}) ===\n", title, mode);
            for point in points {
                println!(
                    "  Season {:>2}: {:>5.2}  {}",
                    point.season,
                    point.rating,
                    "#".repeat((point.rating * 4.0).round().max(0.0) as usize)
                );
            }
            println!();
        }
    }
}

/// Runs the search prompt loop until the user quits
fn run_interactive(
    fetcher: &dyn SeriesFetcher,
    options: &GuideOptions,
    initial_query: Option<String>,
) -> Result<(), CliError> {
    let mut controller = Controller::new(options.chart_mode);
    let mut next_query = initial_query;

    loop {
        let query = match next_query.take() {
            Some(query) => query,
            None => Input::<String>::new()
                .with_prompt("TV show (empty to quit)")
                .allow_empty(true)
                .interact_text()?,
        };

        if query.trim().is_empty() {
            return Ok(());
        }

        controller.set_query(query.trim());
        controller.submit(fetcher, handle_progress_event);

        loop {
            let view = controller.view(options.missing_rating);
            print_view(&view);

            if !matches!(view, View::Chart { .. }) {
                break;
            }

            let items = [
                "Save chart".to_string(),
                format!("Show {}", controller.chart_mode().toggled()),
                "New search".to_string(),
                "Quit".to_string(),
            ];
            let choice = Select::new()
                .with_prompt("What next?")
                .items(&items)
                .default(0)
                .interact()?;

            match choice {
                0 => {
                    save_chart(&view, options, handle_progress_event)?;
                }
                1 => {
                    controller.toggle_chart_mode();
                }
                2 => break,
                _ => return Ok(()),
            }
        }
    }
}

fn main() {
    let args = Args::parse();
    let options = args.guide_options();

    if !options.output_dir.is_dir() {
        eprintln!(
            "Error: Output directory does not exist: {}",
            options.output_dir.display()
        );
        process::exit(1);
    }

    let fetcher = match options.fetcher() {
        Ok(fetcher) => fetcher,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let query = args.query.clone();
    match query {
        Some(query) if !args.interactive => {
            match rate_series(&fetcher, &query, &options, handle_progress_event) {
                Ok(report) => {
                    print_view(&report.view);
                    if let (true, View::Chart { title, points, .. }) = (args.json, &report.view) {
                        match points_json(title, points) {
                            Ok(json) => println!("{}", json),
                            Err(e) => {
                                eprintln!("Error: {}", e);
                                process::exit(1);
                            }
                        }
                    }
                    if matches!(report.outcome, SubmitOutcome::Failed(_)) {
                        process::exit(1);
                    }
                }
                Err(e) => {
                    eprintln!("\nError: {}", e);
                    process::exit(1);
                }
            }
        }
        initial_query => {
            if let Err(e) = run_interactive(&fetcher, &options, initial_query) {
                eprintln!("\nError: {}", e);
                process::exit(1);
            }
        }
    }
}
