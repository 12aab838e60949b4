//! Command-line front end: one query per invocation over the crop dataset.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use agri_explorer::config::DEFAULT_DATA_FILE;
use agri_explorer::reshape::to_observations;
use agri_explorer::visualization::{self, ChartOptions, Notice, Rendered};
use agri_explorer::{
    sort_by_year, Element, ExplorerError, LoaderConfig, Locale, Observation, ObservationTable,
    ReshapeConfig,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "agri-explorer",
    about = "Explore agricultural production statistics across the Americas"
)]
struct Cli {
    /// Crop statistics CSV (wide form, one column per year)
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,
    /// Text encoding of the file (e.g. "latin1", "utf-8")
    #[arg(long, default_value = "latin1")]
    encoding: String,
    /// Field separator
    #[arg(long, default_value_t = ',')]
    separator: char,
    /// Language of chart titles and messages: "en" or "es"
    #[arg(long, default_value = "en")]
    locale: Locale,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show year range, countries and crops in the dataset
    Summary,
    /// Compare all countries for one year and variable
    CrossSection {
        #[arg(long)]
        year: i32,
        /// "Production", "Area harvested" or "Yield"
        #[arg(long)]
        element: Element,
        /// Draw a per-country histogram (with --html)
        #[arg(long)]
        histogram: bool,
        /// Draw a scatter plot (with --html)
        #[arg(long)]
        scatter: bool,
        /// Write the chart to this HTML file instead of printing rows
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Compare countries over time for one crop and variable
    Trend {
        /// Country to include; repeat for several
        #[arg(long = "country", required = true)]
        countries: Vec<String>,
        #[arg(long)]
        crop: String,
        #[arg(long)]
        element: Element,
        /// Write the chart to this HTML file instead of printing rows
        #[arg(long)]
        html: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ExplorerError> {
    let separator = u8::try_from(cli.separator)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| ExplorerError::DataLoad {
            path: cli.data.display().to_string(),
            reason: format!("separator {:?} is not a single ASCII character", cli.separator),
        })?;
    let loader = LoaderConfig::new(&cli.data)
        .with_encoding(cli.encoding.as_str())
        .with_separator(separator);
    let table = ObservationTable::load(&loader, &ReshapeConfig::default())?;
    let locale = cli.locale;

    match cli.command {
        Commands::Summary => summary(&table),
        Commands::CrossSection {
            year,
            element,
            histogram,
            scatter,
            html,
        } => match html {
            Some(out) => {
                let options = ChartOptions {
                    histogram,
                    scatter,
                    locale,
                    ..ChartOptions::default()
                };
                let rendered = visualization::render_cross_section(&table, year, element, &options)?;
                write_chart(rendered, &out, locale)?;
            }
            None => {
                let rows = to_observations(&table.cross_section(year, element)?)?;
                print_rows(&rows, Notice::NoDataForYear, locale);
            }
        },
        Commands::Trend {
            countries,
            crop,
            element,
            html,
        } => match html {
            Some(out) => {
                let options = ChartOptions {
                    locale,
                    ..ChartOptions::default()
                };
                let rendered =
                    visualization::render_trend(&table, &countries, &crop, element, &options)?;
                write_chart(rendered, &out, locale)?;
            }
            None => {
                let df = sort_by_year(&table.trend(&countries, &crop, element)?)?;
                print_rows(&to_observations(&df)?, Notice::NoDataForCombination, locale);
            }
        },
    }
    Ok(())
}

fn summary(table: &ObservationTable) {
    println!("observations: {}", table.len());
    match table.year_range() {
        Some((lo, hi)) => println!("years:        {lo}-{hi}"),
        None => println!("years:        none"),
    }
    println!("countries:    {}", table.countries().join(", "));
    println!("crops:        {}", table.crops().join(", "));
}

fn print_rows(rows: &[Observation], empty: Notice, locale: Locale) {
    if rows.is_empty() {
        println!("{}", empty.message_in(locale));
        return;
    }
    let width = rows.iter().map(|o| o.country.len()).max().unwrap_or(0);
    for o in rows {
        println!(
            "{:<width$}  {:<20}  {:<14}  {}  {:>16.2} {}",
            o.country,
            o.crop,
            o.element.label(),
            o.year,
            o.value,
            o.unit(),
        );
    }
}

fn write_chart(rendered: Rendered, out: &Path, locale: Locale) -> Result<(), ExplorerError> {
    match rendered {
        Rendered::Notice(notice) => println!("{}", notice.message_in(locale)),
        Rendered::Chart(html) => {
            let lang = locale.tag();
            let page = format!(
                "<!DOCTYPE html>\n<html lang=\"{lang}\"><head><meta charset=\"utf-8\"><title>agri-explorer</title></head><body>\n{html}\n</body></html>\n"
            );
            std::fs::write(out, page)?;
            log::info!("chart written to {}", out.display());
            println!("wrote {}", out.display());
        }
    }
    Ok(())
}
