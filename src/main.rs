fn main() {
    use anubis::config::Config;
    use anubis::error::ErrorReporter;
    use anubis::executor::EXIT_FAILURE;
    use anubis::io::LineInput;
    use anubis::repl::Shell;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut input = match LineInput::from_args(&args, &config.prompt) {
        Ok(input) => input,
        Err(e) => {
            ErrorReporter::new(config.verbose_errors).report(&e);
            std::process::exit(EXIT_FAILURE);
        }
    };
    log::debug!("starting, interactive: {}, search path: {:?}", input.is_interactive(), config.search_path);

    let mut shell = Shell::new(&config);
    std::process::exit(shell.run(&mut input));
}
