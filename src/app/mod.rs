use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::info;

use crate::api;
use crate::config::Config;
use crate::geo::GeoDb;

pub struct App {
    server: JoinHandle<()>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        // 索引在服务器可用之前同步构建完成，此后只读共享
        let db = Arc::new(GeoDb::load(&config.geo.database));
        let server = api::start(&config.server, &config.geo, db)?;

        Ok(Self { server })
    }

    pub async fn run(self) -> Result<()> {
        info!("GeoEcho started");
        self.server.await?;
        Ok(())
    }
}
