use clap::Parser;
use colorgame::ui::App;
use colorgame::Options;

fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    setup_logger(&options)?;

    let game = options.new_game();
    let recorder = options.open_recorder()?;
    let app = App::new(game, recorder)?;
    app.run()?;
    Ok(())
}

fn setup_logger(options: &Options) -> anyhow::Result<()> {
    if let Some(path) = &options.logfile {
        let file = std::fs::File::create(path)
            .map_err(|e| anyhow::anyhow!("failed to create log file {path:?}: {e}"))?;
        simplelog::WriteLogger::init(options.loglevel, simplelog::Config::default(), file)?;
        log::info!("colorgame started: mode={}", options.mode);
    }
    Ok(())
}
