// Copyright (c) 2022 Bastiaan Marinus van de Weerd

mod cli;
mod error;
mod ring;
mod search;
mod util;
util::mod_days![09, 12, 14, 16, 17, 18, 19, 20, 21, 22, 23, 24];

fn main() -> anyhow::Result<()> {
	use {anyhow::Context as _, clap::Parser as _, tracing_subscriber::EnvFilter};

	let args = cli::Args::parse();
	let filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(&args.log))
		.with_context(|| format!("invalid log filter {:?}", args.log))?;
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();

	anyhow::ensure!(DAYS.contains(&args.day), error::Error::UnknownDay(args.day));
	let (part, path) = args.selection();
	let input = std::fs::read_to_string(&path)
		.with_context(|| format!("reading {}", path.display()))?;

	let started = std::time::Instant::now();
	let answer = run(args.day, part, &input)
		.with_context(|| format!("day {:02}, {part}", args.day))?;
	tracing::info!(day = args.day, %part, elapsed = ?started.elapsed(), "solved");

	println!("{answer}");
	Ok(())
}
