use clap::Parser;
use log::info;
use vithmm::io::ModelFile;
use vithmm::utils::timer;

///
/// Decode an observation sequence with a model loaded from JSON
///
#[derive(Parser, Debug)]
struct Opts {
    /// Model definition file
    #[clap(long)]
    model: std::path::PathBuf,
    /// Comma-separated observation symbols
    #[clap(long)]
    obs: String,
}

fn main() -> vithmm::error::Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();

    let model = ModelFile::from_json_file(&opts.model)?.to_model()?;
    let observations: Vec<String> = opts
        .obs
        .split(',')
        .map(|o| o.trim().to_string())
        .collect();
    let (path, t) = timer(|| model.decode(&observations));
    info!("decoded {} observations in {}ms", observations.len(), t);
    for x in path? {
        println!("{}", x);
    }
    Ok(())
}
