//! Grid Tiling Example
//!
//! Builds a few boxes, runs the predicates on them and splits one of them
//! into spatiotemporal tiles.
//!
//! Run with `RUST_LOG=debug` to see the grid log lines.

use chrono::TimeDelta;
use stbox::prelude::*;
use std::error::Error;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== Spatiotemporal Box Tiling ===\n");

    let trip: STBox =
        "SRID=3857;STBOX T((0,0,2001-01-01 08:00:00),(12,7,2001-01-01 20:00:00))".parse()?;
    let depot = STBox::xy(10.0, 5.0, 14.0, 9.0).with_srid(3857);
    let morning = STBox::t(
        "2001-01-01 06:00:00".parse()?,
        "2001-01-01 12:00:00".parse()?,
    );

    println!("Trip:    {}", trip);
    println!("Depot:   {}", depot);
    println!("Morning: {}\n", morning);

    println!("trip overlaps depot:   {}", trip.overlaps(&depot)?);
    println!("trip overlaps morning: {}", trip.overlaps(&morning)?);
    println!("depot right of trip:   {}", depot.right(&trip)?);
    if let Some(shared) = trip.intersection(&depot)? {
        println!("shared area:           {}", shared);
    }
    println!();

    let config = GridConfig::new(5.0)
        .with_time_cell_size(TimeDelta::hours(6))
        .with_origin_srid(3857);
    println!("Grid config:\n{}\n", config.to_json()?);

    let grid = trip.grid(&config)?;
    println!(
        "{} cells from {:?} to {:?}",
        grid.cell_count(),
        grid.min_coords(),
        grid.max_coords()
    );
    for tile in grid {
        let touches_depot = tile.bounds.overlaps(&depot)?;
        println!(
            "  {:?} {}{}",
            tile.coords.as_slice(),
            tile.bounds,
            if touches_depot { "  <- depot" } else { "" }
        );
    }

    let single = tile_at(&[2, 1, 4], &config)?;
    println!("\nCell (2, 1, 4) on its own: {}", single);

    Ok(())
}
