mod cli;

use std::error::Error;

use clap::Parser;
use cli::Cli;
use rexgen::Generator;
use simple_logger::SimpleLogger;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();
    match args.verbosity {
        1 => SimpleLogger::new().with_level(log::LevelFilter::Warn).init()?,
        2 => SimpleLogger::new().with_level(log::LevelFilter::Info).init()?,
        3 => SimpleLogger::new().with_level(log::LevelFilter::max()).init()?,
        _ => { /* No higher log levels */ }
    }

    let mut generator = if args.distinct_runes {
        Generator::new_distinct_runes(&args.pattern, &args.flags)?
    } else if let Some(prob) = args.prob {
        if !(prob > 0.0 && prob < 1.0) {
            return Err("prob must be strictly between 0 and 1".into());
        }
        Generator::new_with_probability(&args.pattern, &args.flags, (prob * i64::MAX as f64) as i64)?
    } else {
        Generator::new(&args.pattern, &args.flags)?
    };

    for _ in 0..args.number {
        println!("{}", generator.generate());
    }

    Ok(())
}
