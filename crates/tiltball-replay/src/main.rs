mod replay;
mod synth;

use tracing_subscriber::EnvFilter;

use tiltball_core::TiltballConfig;

use replay::ReplayArgs;

fn main() {
    // stdout carries snapshots; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = TiltballConfig::load();

    let args = match ReplayArgs::parse(std::env::args().skip(1), config.replay.synthetic_ticks) {
        Ok(args) => args,
        Err(e) => {
            tracing::error!(error = %e, "Usage: tiltball-replay [--input=PATH | --synthetic=N] [--seed=S] [--format=json|msgpack] [--reset-every=K]");
            std::process::exit(2);
        },
    };

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    if let Err(e) = replay::run(&config, &args, &mut out) {
        tracing::error!(error = %e, "Replay failed");
        std::process::exit(1);
    }
}
