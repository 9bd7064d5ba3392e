use std::num::NonZero;

use anyhow::anyhow;
use env_logger::{Builder, Env};
use log::info;

use masyu::{BoardBuilder, Circle, Config, Location};

fn main() -> anyhow::Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    info!("solving with {} search", config.depth);

    let size = NonZero::new(4).ok_or_else(|| anyhow!("board size must be positive"))?;
    // the outer ring, pinned down by its corners and two white circles
    let mut board = BoardBuilder::with_dims((size, size))
        .add_circles([Location(0, 0), Location(3, 3)], Circle::Black)
        .add_circles([Location(2, 0), Location(0, 2)], Circle::White)
        .build()
        .map_err(|reasons| anyhow!("invalid puzzle: {reasons:?}"))?;

    let (width, height) = board.dims();
    info!("built a {width}x{height} puzzle");
    println!("{board}");

    let report = board.solve_with(config.depth)?;
    println!("{board}");
    println!("{:?} after {:?}, {} edges forced", report.validity, report.elapsed, report.forced);

    Ok(())
}
