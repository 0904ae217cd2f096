use std::sync::Arc;

use anyhow::Result;
use dashboard_lib::preferences::ZoomPreference;
use dashboard_lib::store::KeyValueStore;

use crate::args::ZoomCommand;

pub fn run(store: Arc<dyn KeyValueStore>, command: ZoomCommand) -> Result<()> {
    let mut zoom = ZoomPreference::load(store);
    let level = match command {
        ZoomCommand::In => zoom.increase(),
        ZoomCommand::Out => zoom.decrease(),
        ZoomCommand::Reset => zoom.reset(),
        ZoomCommand::Show => zoom.level(),
    };
    println!("{}%", level);
    Ok(())
}
