use std::process;

use guardsmith::{
    cli::{Args, Command},
    logging,
};

fn main() {
    let args = Args::parse_args();
    logging::init_tracing(args.quiet, args.verbose, args.debug);

    let exit_code = Command::from_args(args).run();
    process::exit(exit_code);
}
