use clap::Parser;
use color_eyre::eyre::Report;

use game::GameConfig;
use tui::App;

mod game;
mod tui;

/// A small terminal word-guessing game. The answer is always "woof",
/// unless you bring your own.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Override the target word (4 ascii letters)
    #[arg(long)]
    word: Option<String>,

    /// Number of allowed guesses
    #[arg(long, default_value_t = game::MAX_ATTEMPTS)]
    attempts: usize,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tui::initialize_panic_handler();

    let args = Args::parse();
    let word = args.word.as_deref().unwrap_or(game::TARGET);
    let config = GameConfig::new(word, args.attempts).map_err(Report::msg)?;

    let mut terminal = tui::init()?;
    let mut app = App::init(config);
    let app_result = app.run(&mut terminal).await;
    tui::restore()?;
    app_result?;

    // leave the finished board behind in the scrollback
    for scored in app.scored_rows() {
        println!("{scored}");
    }

    Ok(())
}
