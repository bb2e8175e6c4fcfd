use assoc_tables::config::GenConfig;

fn main() {
    // the run summary is logged at info
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    if let Err(err) = assoc_tables::run(&GenConfig::default()) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
