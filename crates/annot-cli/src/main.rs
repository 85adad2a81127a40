mod cli;
mod commands;
mod logging;

use cli::{CheckParams, DumpParams, build_cli, verbosity};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("check", m)) => {
            logging::init(verbosity(m));
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("dump", m)) => {
            logging::init(verbosity(m));
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
