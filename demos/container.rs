use optionable::{CommandLineBinder, Optionable, Verbosity};

#[derive(Debug, Default, Optionable)]
struct Settings {
    #[optionable(parent)]
    verbosity: Verbosity,
    #[optionable(description = "The number of workers to start.", required)]
    workers: i32,
    #[optionable(short = 'o', description = "Where to write the report.")]
    output: String,
    #[optionable(description = "The fraction of requests to sample.")]
    ratio: f64,
}

fn main() {
    let mut settings = Settings::default();
    CommandLineBinder::new("container --workers N [-o OUTPUT] [-r RATIO] [-v]").bind(&mut settings);

    if settings.verbosity.is_verbose() {
        println!("Bound settings: {settings:?}");
    }

    println!(
        "Starting {} workers (sampling {}).",
        settings.workers, settings.ratio
    );
}
