use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use timetable_generator::display::print_timetable;
use timetable_generator::form::{export_file_name, export_timetable_csv, TimetableRequest};
use timetable_generator::parser::load_teachers;
use timetable_generator::schedule::{Allocator, DEFAULT_MAX_ATTEMPTS};
use timetable_generator::{generate_timetable, logger, web};

#[derive(Parser, Debug)]
#[command(name = "timetable-generator", version, about = "Weekly class timetable generator")]
struct Cli {
    /// Debug-level logging for this crate
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one timetable from a teacher CSV and write it out as CSV
    Generate(GenerateArgs),
    /// Serve the JSON API
    Serve {
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
        #[command(flatten)]
        allocator: AllocatorArgs,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// CSV with columns name,subject,classes_per_week,minutes_per_class
    #[arg(short, long)]
    teachers: PathBuf,
    #[arg(short, long)]
    school: String,
    #[arg(long, default_value_t = 6)]
    periods_per_day: u32,
    #[arg(long, default_value_t = 45)]
    period_length: u32,
    /// Output file; defaults to "<school>_timetable.csv"
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[command(flatten)]
    allocator: AllocatorArgs,
}

#[derive(Args, Debug)]
struct AllocatorArgs {
    /// Fixed seed for reproducible timetables
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,
    /// Place leftover sessions in the first free block after random attempts run out
    #[arg(long)]
    first_fit_fallback: bool,
    /// Process teachers in random order
    #[arg(long)]
    shuffle_teachers: bool,
}

impl AllocatorArgs {
    fn build(&self) -> Allocator {
        Allocator::new()
            .seed(self.seed)
            .max_attempts(self.max_attempts)
            .first_fit_fallback(self.first_fit_fallback)
            .shuffle_teachers(self.shuffle_teachers)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);

    match cli.command {
        Command::Serve { port, allocator } => {
            println!("Starting web server on port {}...", port);
            println!("POST a timetable request to http://localhost:{}/api/timetable", port);
            web::start_server(port, allocator.build()).await?;
        }
        Command::Generate(args) => run_generate(args)?,
    }

    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Loading teachers from {}", args.teachers.display());
    let teachers = load_teachers(&args.teachers)?;

    let request = TimetableRequest {
        school_name: args.school,
        periods_per_day: args.periods_per_day,
        period_length_minutes: args.period_length,
        teachers,
        seed: None,
    };

    let response = generate_timetable(&request, &args.allocator.build())?;
    print_timetable(&response.school_name, &response.table, &response.teachers);

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(export_file_name(&response.school_name)));
    export_timetable_csv(&response.table, &output)?;
    println!("\nTimetable saved to: {}", output.display());

    Ok(())
}
