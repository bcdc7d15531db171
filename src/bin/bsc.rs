use clap::Parser;
use log::info;
use vithmm::accuracy::error_rate;
use vithmm::mocks::mock_bsc;
use vithmm::utils::timer;

///
/// Sample a binary symmetric channel HMM and decode the sample back
///
/// Each trial draws a fresh state/observation sequence, runs the
/// decoder on the observations alone and reports how much of the true
/// state sequence was recovered.
///
#[derive(Parser, Debug)]
struct Opts {
    /// Sequence length
    #[clap(short = 'n', long, default_value = "100")]
    length: usize,
    /// State flip probability
    #[clap(long, default_value = "0.1")]
    alpha: f64,
    /// Observation error probability
    #[clap(long, default_value = "0.1")]
    epsilon: f64,
    /// Random seed of the first trial
    #[clap(long, default_value = "0")]
    seed: u64,
    /// Number of trials
    #[clap(long, default_value = "1")]
    trials: u64,
}

fn main() -> vithmm::error::Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();
    println!("# opts={:?}", opts);

    let model = mock_bsc(opts.alpha, opts.epsilon);
    for trial in 0..opts.trials {
        let seed = opts.seed + trial;
        let (states, observations) = model.sample(opts.length, seed)?;
        let (decoded, t) = timer(|| model.decode(&observations));
        let decoded = decoded?;
        info!("decoded n={} in {}ms", opts.length, t);
        println!(
            "trial={} seed={} error={}",
            trial,
            seed,
            error_rate(&states, &decoded)?
        );
    }
    Ok(())
}
