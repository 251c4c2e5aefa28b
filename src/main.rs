use ecr_stale_images::Logger;
use ecr_stale_images::cli::{Args, Runner};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse_args();
    let logger = Logger::new(args.verbose);

    let result = match Runner::new(args) {
        Ok(runner) => runner.run().await.map(|_| ()),
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        logger.error(&e.to_string());
        process::exit(1);
    }
}
