use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bus_planner::data::MemoryRouteData;
use bus_planner::domain::{DomainError, Leg, RouteId, ScheduleTime, Sequence, StopSymbol};
use bus_planner::planner::{DataError, SequenceSchedule};
use bus_planner::schedule::{DayType, DayTypeSelector};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("usage: bus-planner <route-file.json> <day-type> <HH:MM> <ROUTE[/DIR]:FROM[:TO]>...")]
    Usage,

    #[error("invalid leg '{0}': expected ROUTE[/DIR]:FROM[:TO]")]
    InvalidLeg(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Data(#[from] DataError),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), CliError> {
    let [path, day_type, time, leg_args @ ..] = args else {
        return Err(CliError::Usage);
    };
    if leg_args.is_empty() {
        return Err(CliError::Usage);
    }

    let time = ScheduleTime::parse_hhmm(time).map_err(DomainError::from)?;
    let data = MemoryRouteData::from_path(path)?;
    info!(path = %path, routes = data.routes().count(), "Loaded route file");

    let mut sequence = Sequence::default();
    for arg in leg_args {
        sequence.push(parse_leg(&data, arg)?);
    }

    let selector = DayTypeSelector::new(DayType::new(day_type.as_str()));
    let schedule = SequenceSchedule::new(&sequence, &selector, &data)?;

    println!("{sequence}");
    if schedule.instances().is_empty() {
        println!("No connections on {day_type}");
        return Ok(());
    }

    let next = schedule.time_position(time);
    for (i, instance) in schedule.instances().iter().enumerate() {
        let marker = if Some(i) == next { ">" } else { " " };
        println!("{marker} {instance}");
    }
    if next.is_none() {
        println!("No more connections after {time}");
    }
    Ok(())
}

/// Parse `ROUTE[/DIR]:FROM[:TO]` into a leg of the loaded data.
fn parse_leg(data: &MemoryRouteData, arg: &str) -> Result<Leg, CliError> {
    let mut parts = arg.split(':');
    let (Some(route), Some(from)) = (parts.next(), parts.next()) else {
        return Err(CliError::InvalidLeg(arg.to_string()));
    };
    let to = parts.next();
    if route.is_empty() || parts.next().is_some() {
        return Err(CliError::InvalidLeg(arg.to_string()));
    }

    let from = StopSymbol::parse(from).map_err(DomainError::from)?;
    let to = to
        .map(StopSymbol::parse)
        .transpose()
        .map_err(DomainError::from)?;

    Ok(data.leg(&RouteId::parse(route), &from, to.as_ref())?)
}
