use mazeblock::{
    app::App,
    maze::{DEFAULT_SIZE, parse_size},
    session::SessionConfig,
};

/// Log file written next to the working directory, since the terminal
/// belongs to the UI while the app runs.
const LOG_FILE_NAME: &str = "mazeblock.log";

fn main() -> std::io::Result<()> {
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Usage: mazeblock [size] [seed]
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let size = args.next().map_or(DEFAULT_SIZE, |s| parse_size(&s));
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());
    tracing::info!("Starting with size {} and seed {:?}", size, seed);

    let mut app = App::new(SessionConfig {
        size,
        seed,
        ..Default::default()
    });

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run(&mut stdout);
    App::restore_terminal(&mut stdout)?;
    if let Err(e) = &result {
        tracing::error!("App exited with error: {}", e);
    }
    result
}
