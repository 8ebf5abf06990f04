extern crate geocoord;

use std::env;
use std::fs::File;
use std::io::{self, BufReader};

use failure::Error;
use geocoord::airports::AirportCollection;
use geocoord::events::read_events;
use geocoord::flight::write_flights;
use geocoord::tracker::{reconstruct_flights, TrackerConfig};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return help();
    }

    if let Err(error) = run(&args[1], &args[2], args.get(3).map(String::as_str)) {
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}

fn run(airports_path: &str, events_path: &str, output_path: Option<&str>) -> Result<(), Error> {
    let airports = AirportCollection::load_from_file(airports_path)?;
    let events = read_events(BufReader::new(File::open(events_path)?))?;

    eprintln!("airports: {}", airports.len());
    eprintln!("events:   {}", events.len());

    let flights = reconstruct_flights(&events, &airports, &TrackerConfig::default())?;
    let landed = flights.iter().filter(|flight| flight.has_landed()).count();

    eprintln!("flights:  {} ({} landed, {} in the air)", flights.len(), landed, flights.len() - landed);

    match output_path {
        Some(path) => write_flights(&flights, File::create(path)?),
        None => write_flights(&flights, io::stdout()),
    }
}

fn help() {
    println!("usage: flights <airports.json> <events.txt> [flights.json]");
}
