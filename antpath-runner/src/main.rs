use anyhow::Result;
use antpath_runner::{load_settings, parse_vertex_count, run_instances, Settings};
use clap::{arg, ArgMatches, Command};
use serde_json::json;
use std::io::{self, Write};

fn cli() -> Command {
    Command::new("antpath")
        .about("Searches random weighted graphs for cheap covering paths with an ant colony")
        .arg(
            arg!([VERTICES] "Number of graph vertices, read from stdin when omitted")
                .value_parser(clap::value_parser!(String))
                .allow_negative_numbers(true),
        )
        .arg(
            arg!(--settings <SETTINGS> "Settings json string or path to json file")
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            arg!(--instances <INSTANCES> "Number of graph instances")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(arg!(--seed <SEED> "Master seed").value_parser(clap::value_parser!(u64)))
        .arg(arg!(--json "Print results as a json document"))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let matches = cli().get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let mut settings = match matches.get_one::<String>("settings") {
        Some(settings) => load_settings(settings)?,
        None => Settings::default(),
    };
    if let Some(&num_instances) = matches.get_one::<usize>("instances") {
        settings.num_instances = num_instances;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        settings.seed = Some(seed);
    }
    let vertex_count = match matches.get_one::<String>("VERTICES") {
        Some(vertices) => parse_vertex_count(vertices)?,
        None => prompt_vertex_count()?,
    };

    let as_json = matches.get_flag("json");
    let mut reports = Vec::new();
    let summary = run_instances(vertex_count, &settings, |report| {
        if as_json {
            reports.push(report.clone());
        } else {
            println!("Instance {} - path cost: {}", report.instance, report.cost);
        }
    })?;

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "instances": reports,
                "summary": summary,
            }))?
        );
    } else {
        println!("Average cost: {}", summary.average_cost);
    }
    Ok(())
}

fn prompt_vertex_count() -> Result<usize> {
    println!("Enter the number of graph vertices:");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    parse_vertex_count(&line)
}
