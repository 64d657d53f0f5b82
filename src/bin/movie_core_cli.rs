use movie_core::{cli::run_cli, config::AppConfig, init};

fn main() {
    init();

    let config = AppConfig::from_env_and_args(std::env::args().skip(1));
    if let Err(err) = run_cli(&config) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
