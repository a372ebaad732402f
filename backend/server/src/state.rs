use std::sync::Arc;

use super::{
    config::Config,
    sheets::{GoogleSheets, SheetStore},
};

pub struct State {
    pub config: Config,
    pub sheets: Arc<dyn SheetStore>,
}

impl State {
    pub fn new() -> Arc<Self> {
        let config = Config::load();
        let sheets: Arc<dyn SheetStore> = Arc::new(GoogleSheets::new());

        Arc::new(Self { config, sheets })
    }
}
